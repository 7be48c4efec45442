use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::campaign::{Campaign, Platform, Status};
use crate::database::Database;
use crate::error::Error;

struct SeedCampaign {
    title: &'static str,
    platform: Platform,
    budget_cents: i64,
    status: Status,
    start_date: (i32, u32, u32),
    end_date: (i32, u32, u32),
}

const SEED_CAMPAIGNS: &[SeedCampaign] = &[
    SeedCampaign {
        title: "Fall Launch",
        platform: Platform::Instagram,
        budget_cents: 150000,
        status: Status::Active,
        start_date: (2024, 9, 1),
        end_date: (2024, 9, 30),
    },
    SeedCampaign {
        title: "Holiday Retargeting",
        platform: Platform::Facebook,
        budget_cents: 82050,
        status: Status::Paused,
        start_date: (2024, 11, 15),
        end_date: (2024, 12, 31),
    },
    SeedCampaign {
        title: "Hiring Push",
        platform: Platform::LinkedIn,
        budget_cents: 40000,
        status: Status::Completed,
        start_date: (2024, 3, 1),
        end_date: (2024, 4, 15),
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, Error> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| {
            Error::ExistentialState(format!("invalid seed date {}-{}-{}", year, month, day))
        })
}

/// Replaces whatever is stored with a small set of demo campaigns.
pub async fn seed(db: &dyn Database) -> Result<(), Error> {
    db.drop().await?;

    for seed in SEED_CAMPAIGNS {
        let campaign = Campaign {
            id: db.campaigns().next_campaign_id().await?,
            title: seed.title.to_string(),
            platform: seed.platform,
            budget: Decimal::new(seed.budget_cents, 2),
            status: seed.status,
            start_date: date(seed.start_date)?,
            end_date: date(seed.end_date)?,
        };

        db.campaigns().insert_campaign(&campaign).await?;
    }

    info!("seeded {} campaigns", SEED_CAMPAIGNS.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::CampaignFilter;
    use crate::database::test::MemoryDatabase;

    #[tokio::test]
    async fn seed_replaces_existing_campaigns() {
        let db = MemoryDatabase::new();
        seed(&db).await.unwrap();
        seed(&db).await.unwrap();

        let campaigns = db
            .campaigns()
            .fetch_campaigns(&CampaignFilter::default())
            .await
            .unwrap();

        assert_eq!(campaigns.len(), SEED_CAMPAIGNS.len());
        assert_eq!(campaigns[0].title, "Fall Launch");
        assert_eq!(campaigns[0].budget.to_string(), "1500.00");
    }
}
