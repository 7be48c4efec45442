use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod fields;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub title: String,
    pub platform: Platform,
    pub budget: Decimal,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Platform {
    Instagram,
    Facebook,
    LinkedIn,
}

impl Platform {
    pub const CHOICES: &'static [&'static str] = &["Instagram", "Facebook", "LinkedIn"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
        }
    }

    pub fn from_choice(value: &str) -> Option<Platform> {
        match value {
            "Instagram" => Some(Platform::Instagram),
            "Facebook" => Some(Platform::Facebook),
            "LinkedIn" => Some(Platform::LinkedIn),
            _ => None,
        }
    }
}

// declaration order is the order used when reporting stats
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Status {
    Active,
    Paused,
    Completed,
}

impl Status {
    pub const CHOICES: &'static [&'static str] = &["Active", "Paused", "Completed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Paused => "Paused",
            Status::Completed => "Completed",
        }
    }

    pub fn from_choice(value: &str) -> Option<Status> {
        match value {
            "Active" => Some(Status::Active),
            "Paused" => Some(Status::Paused),
            "Completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// Optional narrowing applied when listing campaigns.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CampaignFilter {
    pub status: Option<Status>,
    pub platform: Option<Platform>,
}

impl CampaignFilter {
    pub fn matches(&self, campaign: &Campaign) -> bool {
        self.status.map_or(true, |status| campaign.status == status)
            && self
                .platform
                .map_or(true, |platform| campaign.platform == platform)
    }
}
