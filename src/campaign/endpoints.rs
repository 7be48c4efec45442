use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, patch, post, put, HttpResponse};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::fields::CampaignFields;
use super::manager::{self, UpdateMode};
use super::{Campaign, CampaignFilter, CampaignId, Platform, Status};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CampaignBody {
    pub id: CampaignId,
    pub title: String,
    pub platform: Platform,
    pub budget: Decimal,
    pub status: Status,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            title: campaign.title,
            platform: campaign.platform,
            budget: campaign.budget,
            status: campaign.status,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
        }
    }
}

#[post("/campaigns/")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    body: Json<CampaignFields>,
) -> Result<HttpResponse, Error> {
    let campaign = manager::create_campaign(&***db, &body).await?;

    Ok(HttpResponse::Created().json(CampaignBody::render(campaign)))
}

#[get("/campaigns/")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Box<dyn Database>>,
    query: Query<CampaignFilter>,
) -> Result<Json<Vec<CampaignBody>>, Error> {
    let campaigns = manager::get_campaigns(&***db, &query).await?;

    let body = campaigns.into_iter().map(CampaignBody::render).collect();

    Ok(Json(body))
}

#[get("/campaigns/{campaign_id}/")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[put("/campaigns/{campaign_id}/")]
#[tracing::instrument(skip(db))]
pub async fn replace_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
    body: Json<CampaignFields>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign =
        manager::update_campaign(&***db, campaign_id, &body, UpdateMode::Full).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[patch("/campaigns/{campaign_id}/")]
#[tracing::instrument(skip(db))]
pub async fn modify_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
    body: Json<CampaignFields>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();
    let campaign =
        manager::update_campaign(&***db, campaign_id, &body, UpdateMode::Partial).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[delete("/campaigns/{campaign_id}/")]
#[tracing::instrument(skip(db))]
pub async fn delete_campaign(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();
    manager::delete_campaign(&***db, campaign_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
