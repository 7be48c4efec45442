use actix_web::get;
use actix_web::web::{Data, Json};

use crate::database::Database;
use crate::error::Error;

use super::{manager, CampaignStats};

#[get("/stats/")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_stats(
    db: Data<Box<dyn Database>>,
) -> Result<Json<CampaignStats>, Error> {
    let stats = manager::get_campaign_stats(&***db).await?;

    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::database::test::MemoryDatabase;
    use crate::database::Database;
    use crate::routes;

    #[actix_web::test]
    async fn stats_reflect_created_campaigns() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(
                    Box::new(MemoryDatabase::new()) as Box<dyn Database>
                ))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats/").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            stats,
            json!({
                "status_counts": [],
                "total_budget": { "total": null },
                "total_campaigns": 0,
            })
        );

        let req = test::TestRequest::post()
            .uri("/api/campaigns/")
            .set_json(json!({
                "title": "Fall Launch",
                "platform": "Instagram",
                "budget": "1500.00",
                "status": "Active",
                "start_date": "2024-09-01",
                "end_date": "2024-09-30",
            }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/api/stats/").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            stats,
            json!({
                "status_counts": [{ "status": "Active", "count": 1 }],
                "total_budget": { "total": 1500.0 },
                "total_campaigns": 1,
            })
        );

        for status in ["Active", "Paused"] {
            let req = test::TestRequest::post()
                .uri("/api/campaigns/")
                .set_json(json!({
                    "title": "Follow-up",
                    "platform": "Facebook",
                    "budget": 100,
                    "status": status,
                    "start_date": "2024-10-01",
                    "end_date": "2024-10-31",
                }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/stats/").to_request();
        let stats: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            stats["status_counts"],
            json!([
                { "status": "Active", "count": 2 },
                { "status": "Paused", "count": 1 },
            ])
        );
        assert_eq!(stats["total_budget"]["total"], json!(1700.0));
        assert_eq!(stats["total_campaigns"], 3);
    }
}
