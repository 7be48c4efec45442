use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Error;

const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "CAMPAIGN_TRACKER";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    /// drop the database and insert demo campaigns on startup
    pub seed: bool,
}

impl Default for DatabaseConfig {
    fn default() -> DatabaseConfig {
        DatabaseConfig {
            uri: "mongodb://localhost:27017".into(),
            name: "campaign_tracker".into(),
            seed: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> NewsConfig {
        NewsConfig {
            url: "https://dummyjson.com/products".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `*` allows any origin; empty keeps the same-origin policy
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Loads `config.toml` (optional) overridden by `CAMPAIGN_TRACKER__*`
    /// environment variables, e.g. `CAMPAIGN_TRACKER__SERVER__PORT=9000`.
    pub fn load() -> Result<AppConfig, Error> {
        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("[server]\nport = 9000\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert!(!config.database.seed);
        assert_eq!(config.news.url, "https://dummyjson.com/products");
        assert_eq!(config.news.timeout_secs, 10);
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn sections_can_be_overridden() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(
                r#"
                [database]
                name = "tracker_test"
                seed = true

                [news]
                timeout_secs = 3

                [cors]
                allowed_origins = ["http://localhost:3000"]
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database.name, "tracker_test");
        assert!(config.database.seed);
        assert_eq!(config.news.timeout_secs, 3);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }
}
