use crate::campaign::CampaignFilter;
use crate::database::Database;
use crate::error::Error;

use super::CampaignStats;

#[tracing::instrument(skip(db))]
pub async fn get_campaign_stats(db: &dyn Database) -> Result<CampaignStats, Error> {
    let campaigns = db
        .campaigns()
        .fetch_campaigns(&CampaignFilter::default())
        .await?;

    Ok(CampaignStats::compute(&campaigns))
}
