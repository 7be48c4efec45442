use std::time::Duration;

use actix_cors::Cors;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod news;
pub mod routes;
pub mod seed;
pub mod stats;
pub mod typedid;
pub mod violations;

pub use crate::campaign::{CampaignBody, CampaignFilter, Platform, Status};
pub use crate::config::AppConfig;
pub use crate::error::Error;
pub use crate::news::{HttpNewsSource, NewsSource};

use crate::config::{CorsConfig, LoggingConfig};
use crate::database::{Database, MongoDatabase};

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();
}

fn cors(config: &CorsConfig) -> Cors {
    if config.allowed_origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default().allow_any_method().allow_any_header();
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Names the hosts and database only, the uri may carry credentials.
fn describe_database(options: &ClientOptions, name: &str) -> String {
    let hosts: Vec<String> = options.hosts.iter().map(ToString::to_string).collect();

    format!("{}/{}", hosts.join(","), name)
}

pub async fn run(config: AppConfig) -> Result<(), Error> {
    let options = ClientOptions::parse(&config.database.uri).await?;
    info!(
        "connecting to db: {}",
        describe_database(&options, &config.database.name)
    );
    let client = Client::with_options(options)?;
    let db = MongoDatabase::initialize(client.database(&config.database.name)).await?;

    if config.database.seed {
        seed::seed(&db).await?;
    }

    let news = HttpNewsSource::new(
        config.news.url.clone(),
        Duration::from_secs(config.news.timeout_secs),
    )?;

    let db = Data::new(Box::new(db) as Box<dyn Database>);
    let news = Data::new(Box::new(news) as Box<dyn NewsSource>);
    let cors_config = config.cors.clone();

    info!(
        "listening on {}:{}",
        config.server.host, config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(news.clone())
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(routes::configure)
            .default_service(web::to(routes::path_does_not_exist))
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await?;

    Ok(())
}
