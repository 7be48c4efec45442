use crate::database::Database;
use crate::error::Error;

use super::fields::CampaignFields;
use super::{Campaign, CampaignFilter, CampaignId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// every field must be supplied
    Full,
    /// only supplied fields are changed
    Partial,
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: &dyn Database,
    fields: &CampaignFields,
) -> Result<Campaign, Error> {
    let draft = fields.validate_complete()?;

    let campaign_id = db.campaigns().next_campaign_id().await?;
    let campaign = draft.into_campaign(campaign_id);

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: &dyn Database,
    filter: &CampaignFilter,
) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns(filter).await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignDoesNotExist { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &dyn Database,
    campaign_id: CampaignId,
    fields: &CampaignFields,
    mode: UpdateMode,
) -> Result<Campaign, Error> {
    let mut campaign = get_campaign_by_id(db, campaign_id).await?;

    match mode {
        UpdateMode::Full => campaign = fields.validate_complete()?.into_campaign(campaign_id),
        UpdateMode::Partial => fields.validate_partial()?.apply(&mut campaign),
    }

    db.campaigns().update_campaign(&campaign).await?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn delete_campaign(db: &dyn Database, campaign_id: CampaignId) -> Result<(), Error> {
    db.campaigns().delete_campaign(campaign_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{Platform, Status};
    use crate::database::test::MockDatabase;
    use crate::violations::{CampaignField, Violation};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    fn fall_launch(campaign_id: CampaignId) -> Campaign {
        Campaign {
            id: campaign_id,
            title: "Fall Launch".into(),
            platform: Platform::Instagram,
            budget: Decimal::new(150000, 2),
            status: Status::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        }
    }

    fn fields(value: serde_json::Value) -> CampaignFields {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn can_create_campaign() {
        let mut db = MockDatabase::new();
        let called_insert = Arc::new(Mutex::new(false));
        let called_insert_clone = Arc::clone(&called_insert);
        db.campaigns.on_next_campaign_id = Box::new(|_| Ok(CampaignId::from_raw(7)));
        db.campaigns.on_insert_campaign = Box::new(move |campaign| {
            *called_insert_clone.lock().unwrap() = true;
            assert_eq!(campaign, fall_launch(CampaignId::from_raw(7)));
            Ok(())
        });

        let campaign = create_campaign(
            &db,
            &fields(serde_json::json!({
                "title": "Fall Launch",
                "platform": "Instagram",
                "budget": "1500.00",
                "status": "Active",
                "start_date": "2024-09-01",
                "end_date": "2024-09-30",
            })),
        )
        .await
        .unwrap();

        assert_eq!(campaign.id, CampaignId::from_raw(7));
        assert_eq!(campaign.title, "Fall Launch".to_string());
        assert!(
            *called_insert.lock().unwrap(),
            "db.insert_campaign was not called"
        );
    }

    #[tokio::test]
    async fn create_campaign_rejects_invalid_fields_without_touching_store() {
        let db = MockDatabase::new();

        let body = fields(serde_json::json!({ "platform": "TikTok" }));
        let result = create_campaign(&db, &body).await;

        match result.unwrap_err() {
            Error::ValidationFailed { violations } => {
                assert!(violations.contains(&Violation::UnknownChoice {
                    field: CampaignField::Platform,
                    value: "TikTok".into(),
                    choices: Platform::CHOICES,
                }));
                assert!(violations.contains(&Violation::FieldRequired {
                    field: CampaignField::Title
                }));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_campaign_by_id_returns_campaign() {
        let mut db = MockDatabase::new();
        let test_campaign_id = CampaignId::from_raw(3);
        let called_get_by_id = Arc::new(Mutex::new(false));
        let called_get_by_id_clone = Arc::clone(&called_get_by_id);
        db.campaigns.on_fetch_campaign_by_id = Box::new(move |campaign_id| {
            *called_get_by_id_clone.lock().unwrap() = true;
            assert_eq!(campaign_id, test_campaign_id);
            Ok(Some(fall_launch(campaign_id)))
        });

        let campaign = get_campaign_by_id(&db, test_campaign_id).await.unwrap();

        assert_eq!(campaign, fall_launch(test_campaign_id));
        assert!(
            *called_get_by_id.lock().unwrap(),
            "db.fetch_campaign_by_id was not called"
        );
    }

    #[tokio::test]
    async fn get_campaign_by_id_returns_error_if_doesnt_exist() {
        let mut db = MockDatabase::new();
        let test_campaign_id = CampaignId::from_raw(3);
        db.campaigns.on_fetch_campaign_by_id = Box::new(|_| Ok(None));

        let campaign_result = get_campaign_by_id(&db, test_campaign_id).await;

        assert_eq!(
            campaign_result.unwrap_err(),
            Error::CampaignDoesNotExist {
                campaign_id: test_campaign_id
            }
        );
    }

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() {
        let mut db = MockDatabase::new();
        let test_campaign_id = CampaignId::from_raw(5);
        let stored = Arc::new(Mutex::new(None));
        let stored_clone = Arc::clone(&stored);
        db.campaigns.on_fetch_campaign_by_id =
            Box::new(|campaign_id| Ok(Some(fall_launch(campaign_id))));
        db.campaigns.on_update_campaign = Box::new(move |campaign| {
            *stored_clone.lock().unwrap() = Some(campaign);
            Ok(())
        });

        let campaign = update_campaign(
            &db,
            test_campaign_id,
            &fields(serde_json::json!({ "status": "Paused", "budget": 900 })),
            UpdateMode::Partial,
        )
        .await
        .unwrap();

        let expected = Campaign {
            status: Status::Paused,
            budget: Decimal::new(90000, 2),
            ..fall_launch(test_campaign_id)
        };
        assert_eq!(campaign, expected);
        assert_eq!(*stored.lock().unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn full_update_requires_every_field() {
        let mut db = MockDatabase::new();
        db.campaigns.on_fetch_campaign_by_id =
            Box::new(|campaign_id| Ok(Some(fall_launch(campaign_id))));

        let result = update_campaign(
            &db,
            CampaignId::from_raw(5),
            &fields(serde_json::json!({ "status": "Paused" })),
            UpdateMode::Full,
        )
        .await;

        assert!(matches!(result, Err(Error::ValidationFailed { .. })));
    }

    #[tokio::test]
    async fn update_of_missing_campaign_is_not_found_before_validation() {
        let mut db = MockDatabase::new();
        db.campaigns.on_fetch_campaign_by_id = Box::new(|_| Ok(None));

        let result = update_campaign(
            &db,
            CampaignId::from_raw(9),
            &fields(serde_json::json!({ "platform": "TikTok" })),
            UpdateMode::Partial,
        )
        .await;

        assert_eq!(
            result.unwrap_err(),
            Error::CampaignDoesNotExist {
                campaign_id: CampaignId::from_raw(9)
            }
        );
    }
}
