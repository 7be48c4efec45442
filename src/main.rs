use campaign_tracker::{AppConfig, Error};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    campaign_tracker::init_logging(&config.logging);

    campaign_tracker::run(config).await
}
