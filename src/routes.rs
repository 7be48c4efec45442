use actix_web::web::{self, JsonConfig, PathConfig, QueryConfig, ServiceConfig};
use actix_web::{HttpResponse, ResponseError};

use crate::error::Error;
use crate::{campaign, news, stats};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, req| {
        // an id that cannot be parsed names no record
        tracing::debug!("unresolvable path {}: {}", req.path(), err);
        Error::PathDoesNotExist.into()
    }))
    .app_data(QueryConfig::default().error_handler(|err, _req| {
        // format query errors with custom format
        Error::InvalidQuery(err).into()
    }))
    .service(
        web::scope("/api")
            .service(campaign::endpoints::create_campaign)
            .service(campaign::endpoints::get_campaigns)
            .service(campaign::endpoints::get_campaign_by_id)
            .service(campaign::endpoints::replace_campaign)
            .service(campaign::endpoints::modify_campaign)
            .service(campaign::endpoints::delete_campaign)
            .service(stats::endpoints::get_campaign_stats)
            .service(news::endpoints::get_marketing_news)
            .default_service(web::to(path_does_not_exist)),
    );
}

pub async fn path_does_not_exist() -> HttpResponse {
    Error::PathDoesNotExist.error_response()
}
