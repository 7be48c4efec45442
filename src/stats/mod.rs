use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::campaign::{Campaign, Status};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TotalBudget {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

/// Summary over every stored campaign.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CampaignStats {
    pub status_counts: Vec<StatusCount>,
    pub total_budget: TotalBudget,
    pub total_campaigns: u64,
}

impl CampaignStats {
    pub fn compute(campaigns: &[Campaign]) -> CampaignStats {
        let mut counts: BTreeMap<Status, u64> = BTreeMap::new();
        let mut total: Option<Decimal> = None;

        for campaign in campaigns {
            *counts.entry(campaign.status).or_default() += 1;
            total = Some(total.unwrap_or_default() + campaign.budget);
        }

        CampaignStats {
            status_counts: counts
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            total_budget: TotalBudget { total },
            total_campaigns: campaigns.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::campaign::{CampaignId, Platform};

    fn campaign(id: i64, status: Status, budget: Decimal) -> Campaign {
        Campaign {
            id: CampaignId::from_raw(id),
            title: format!("Campaign {}", id),
            platform: Platform::Facebook,
            budget,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    #[test]
    fn empty_set_has_no_counts_and_null_total() {
        let stats = CampaignStats::compute(&[]);

        assert_eq!(
            stats,
            CampaignStats {
                status_counts: vec![],
                total_budget: TotalBudget { total: None },
                total_campaigns: 0,
            }
        );
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({
                "status_counts": [],
                "total_budget": { "total": null },
                "total_campaigns": 0,
            })
        );
    }

    #[test]
    fn counts_group_by_status_in_declaration_order() {
        let stats = CampaignStats::compute(&[
            campaign(1, Status::Paused, Decimal::new(1000, 2)),
            campaign(2, Status::Active, Decimal::new(2550, 2)),
            campaign(3, Status::Active, Decimal::new(-50, 2)),
        ]);

        assert_eq!(
            stats.status_counts,
            vec![
                StatusCount {
                    status: Status::Active,
                    count: 2
                },
                StatusCount {
                    status: Status::Paused,
                    count: 1
                },
            ]
        );
        assert_eq!(stats.total_budget.total, Some(Decimal::new(3500, 2)));
        assert_eq!(stats.total_campaigns, 3);
    }
}
