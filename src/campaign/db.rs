use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use crate::database::MongoCampaignStore;
use crate::error::Error;

use super::{Campaign, CampaignFilter, CampaignId};

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn next_campaign_id(&self) -> Result<CampaignId, Error>;

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn fetch_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    async fn update_campaign(&self, campaign: &Campaign) -> Result<(), Error>;

    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), Error>;
}

fn filter_document(filter: &CampaignFilter) -> Document {
    let mut doc = Document::new();
    if let Some(status) = filter.status {
        doc.insert("status", status.as_str());
    }
    if let Some(platform) = filter.platform {
        doc.insert("platform", platform.as_str());
    }
    doc
}

fn campaign_id_from_counter(counter: Option<Document>) -> Result<CampaignId, Error> {
    let counter = counter
        .ok_or_else(|| Error::ExistentialState("campaign id counter is missing".into()))?;

    let seq = counter
        .get_i64("seq")
        .map_err(|_| Error::ExistentialState("campaign id counter is malformed".into()))?;

    Ok(CampaignId::from_raw(seq))
}

fn require_affected(count: u64, campaign_id: CampaignId) -> Result<(), Error> {
    if count == 0 {
        return Err(Error::CampaignDoesNotExist { campaign_id });
    }

    Ok(())
}

#[async_trait]
impl CampaignStore for MongoCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn next_campaign_id(&self) -> Result<CampaignId, Error> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters
            .find_one_and_update(
                bson::doc! { "_id": "campaigns" },
                bson::doc! { "$inc": { "seq": 1_i64 } },
                options,
            )
            .await?;

        campaign_id_from_counter(counter)
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        self.campaigns.insert_one(campaign, None).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>, Error> {
        let options = FindOptions::builder().sort(bson::doc! { "_id": 1 }).build();

        let campaigns: Vec<Campaign> = self
            .campaigns
            .find(filter_document(filter), options)
            .await?
            .try_collect()
            .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign = self
            .campaigns
            .find_one(bson::doc! { "_id": campaign_id }, None)
            .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        let result = self
            .campaigns
            .replace_one(bson::doc! { "_id": campaign.id }, campaign, None)
            .await?;

        require_affected(result.matched_count, campaign.id)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: CampaignId) -> Result<(), Error> {
        let result = self
            .campaigns
            .delete_one(bson::doc! { "_id": campaign_id }, None)
            .await?;

        require_affected(result.deleted_count, campaign_id)
    }
}
