use actix_web::get;
use actix_web::http::header::ContentType;
use actix_web::web::Data;
use actix_web::HttpResponse;

use crate::error::Error;

use super::NewsSource;

#[get("/news/")]
#[tracing::instrument(skip(news))]
pub async fn get_marketing_news(
    news: Data<Box<dyn NewsSource>>,
) -> Result<HttpResponse, Error> {
    let body = news.fetch_news().await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
