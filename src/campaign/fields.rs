//! Validation of client-submitted campaign fields.
//!
//! Bodies are accepted as loosely-typed json so that every problem in a
//! request can be reported at once, each tied to the field that caused it.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;
use crate::violations::{CampaignField, Violation};

use super::{Campaign, CampaignId, Platform, Status};

pub const TITLE_MAX_LENGTH: usize = 200;
pub const BUDGET_MAX_DIGITS: u32 = 10;
pub const BUDGET_DECIMAL_PLACES: u32 = 2;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Campaign fields as submitted. A field is `None` when it was absent from the
/// body; an explicit `null` is kept as `Some(Value::Null)`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CampaignFields {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub platform: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub budget: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub start_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub end_date: Option<Value>,
}

/// A fully validated set of fields, enough to make a campaign.
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignDraft {
    pub title: String,
    pub platform: Platform,
    pub budget: Decimal,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CampaignDraft {
    pub fn into_campaign(self, id: CampaignId) -> Campaign {
        Campaign {
            id,
            title: self.title,
            platform: self.platform,
            budget: self.budget,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Validated fields of a partial update; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignChanges {
    pub title: Option<String>,
    pub platform: Option<Platform>,
    pub budget: Option<Decimal>,
    pub status: Option<Status>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CampaignChanges {
    pub fn apply(self, campaign: &mut Campaign) {
        if let Some(title) = self.title {
            campaign.title = title;
        }
        if let Some(platform) = self.platform {
            campaign.platform = platform;
        }
        if let Some(budget) = self.budget {
            campaign.budget = budget;
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
        if let Some(start_date) = self.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            campaign.end_date = end_date;
        }
    }
}

impl CampaignFields {
    /// Validates a body that must carry every field.
    pub fn validate_complete(&self) -> Result<CampaignDraft, Error> {
        let mut violations = vec![];

        let title = required(&self.title, CampaignField::Title, parse_title, &mut violations);
        let platform = required(
            &self.platform,
            CampaignField::Platform,
            parse_platform,
            &mut violations,
        );
        let budget = required(&self.budget, CampaignField::Budget, parse_budget, &mut violations);
        let status = required(&self.status, CampaignField::Status, parse_status, &mut violations);
        let start_date = required(
            &self.start_date,
            CampaignField::StartDate,
            |value| parse_date(CampaignField::StartDate, value),
            &mut violations,
        );
        let end_date = required(
            &self.end_date,
            CampaignField::EndDate,
            |value| parse_date(CampaignField::EndDate, value),
            &mut violations,
        );

        match (title, platform, budget, status, start_date, end_date) {
            (
                Some(title),
                Some(platform),
                Some(budget),
                Some(status),
                Some(start_date),
                Some(end_date),
            ) if violations.is_empty() => Ok(CampaignDraft {
                title,
                platform,
                budget,
                status,
                start_date,
                end_date,
            }),
            _ => Err(Error::ValidationFailed { violations }),
        }
    }

    /// Validates only the fields that are present.
    pub fn validate_partial(&self) -> Result<CampaignChanges, Error> {
        let mut violations = vec![];

        let changes = CampaignChanges {
            title: optional(&self.title, parse_title, &mut violations),
            platform: optional(&self.platform, parse_platform, &mut violations),
            budget: optional(&self.budget, parse_budget, &mut violations),
            status: optional(&self.status, parse_status, &mut violations),
            start_date: optional(
                &self.start_date,
                |value| parse_date(CampaignField::StartDate, value),
                &mut violations,
            ),
            end_date: optional(
                &self.end_date,
                |value| parse_date(CampaignField::EndDate, value),
                &mut violations,
            ),
        };

        if !violations.is_empty() {
            return Err(Error::ValidationFailed { violations });
        }

        Ok(changes)
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn required<T>(
    value: &Option<Value>,
    field: CampaignField,
    parse: impl FnOnce(&Value) -> Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    if value.is_none() {
        violations.push(Violation::FieldRequired { field });
    }

    optional(value, parse, violations)
}

fn optional<T>(
    value: &Option<Value>,
    parse: impl FnOnce(&Value) -> Result<T, Violation>,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match parse(value.as_ref()?) {
        Ok(parsed) => Some(parsed),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn expect_str(field: CampaignField, value: &Value) -> Result<&str, Violation> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(Violation::FieldNull { field }),
        _ => Err(Violation::FieldWrongType {
            field,
            expected: "string",
        }),
    }
}

fn parse_title(value: &Value) -> Result<String, Violation> {
    let field = CampaignField::Title;
    let title = expect_str(field, value)?.trim();

    if title.is_empty() {
        return Err(Violation::FieldBlank { field });
    }

    let length = title.chars().count();
    if length > TITLE_MAX_LENGTH {
        return Err(Violation::FieldTooLong {
            field,
            max_length: TITLE_MAX_LENGTH,
            length,
        });
    }

    Ok(title.to_owned())
}

fn parse_platform(value: &Value) -> Result<Platform, Violation> {
    let field = CampaignField::Platform;
    let choice = expect_str(field, value)?;

    Platform::from_choice(choice).ok_or_else(|| Violation::UnknownChoice {
        field,
        value: choice.to_owned(),
        choices: Platform::CHOICES,
    })
}

fn parse_status(value: &Value) -> Result<Status, Violation> {
    let field = CampaignField::Status;
    let choice = expect_str(field, value)?;

    Status::from_choice(choice).ok_or_else(|| Violation::UnknownChoice {
        field,
        value: choice.to_owned(),
        choices: Status::CHOICES,
    })
}

fn parse_budget(value: &Value) -> Result<Decimal, Violation> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Null => {
            return Err(Violation::FieldNull {
                field: CampaignField::Budget,
            })
        }
        _ => {
            return Err(Violation::FieldWrongType {
                field: CampaignField::Budget,
                expected: "decimal",
            })
        }
    };

    let mut budget = match Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        Ok(budget) => budget,
        // a real number, just beyond what a decimal can hold
        Err(_) if text.parse::<f64>().map_or(false, f64::is_finite) => {
            return Err(Violation::BudgetTooManyDigits {
                max_digits: BUDGET_MAX_DIGITS,
            })
        }
        Err(_) => return Err(Violation::BudgetMalformed { value: text }),
    };

    let digits = budget.mantissa().unsigned_abs().to_string().len() as u32;
    let decimal_places = budget.scale();
    let whole_digits = digits.saturating_sub(decimal_places);

    if digits.max(decimal_places) > BUDGET_MAX_DIGITS {
        return Err(Violation::BudgetTooManyDigits {
            max_digits: BUDGET_MAX_DIGITS,
        });
    }
    if decimal_places > BUDGET_DECIMAL_PLACES {
        return Err(Violation::BudgetTooManyDecimalPlaces {
            max_decimal_places: BUDGET_DECIMAL_PLACES,
        });
    }
    if whole_digits > BUDGET_MAX_DIGITS - BUDGET_DECIMAL_PLACES {
        return Err(Violation::BudgetTooManyWholeDigits {
            max_whole_digits: BUDGET_MAX_DIGITS - BUDGET_DECIMAL_PLACES,
        });
    }

    budget.rescale(BUDGET_DECIMAL_PLACES);
    Ok(budget)
}

fn parse_date(field: CampaignField, value: &Value) -> Result<NaiveDate, Violation> {
    let text = expect_str(field, value)?;

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| Violation::DateMalformed {
        field,
        value: text.to_owned(),
        expected_format: "YYYY-MM-DD",
    })
}
