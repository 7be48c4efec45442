use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignField {
    Title,
    Platform,
    Budget,
    Status,
    StartDate,
    EndDate,
}

/// A single reason a submitted field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING-KEBAB-CASE")]
pub enum Violation {
    FieldRequired {
        field: CampaignField,
    },
    FieldNull {
        field: CampaignField,
    },
    FieldWrongType {
        field: CampaignField,
        expected: &'static str,
    },
    FieldBlank {
        field: CampaignField,
    },
    FieldTooLong {
        field: CampaignField,
        max_length: usize,
        length: usize,
    },
    UnknownChoice {
        field: CampaignField,
        value: String,
        choices: &'static [&'static str],
    },
    BudgetMalformed {
        value: String,
    },
    BudgetTooManyDigits {
        max_digits: u32,
    },
    BudgetTooManyDecimalPlaces {
        max_decimal_places: u32,
    },
    BudgetTooManyWholeDigits {
        max_whole_digits: u32,
    },
    DateMalformed {
        field: CampaignField,
        value: String,
        expected_format: &'static str,
    },
}
