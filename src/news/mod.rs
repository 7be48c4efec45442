use std::time::Duration;

use actix_web::web::Bytes;
use async_trait::async_trait;
use serde::de::IgnoredAny;
use tracing::warn;

use crate::error::Error;

pub mod endpoints;
pub use endpoints::*;

/// Somewhere marketing news can be read from, as raw json.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn fetch_news(&self) -> Result<Bytes, Error>;
}

/// Reads news with a single GET against a fixed upstream url.
pub struct HttpNewsSource {
    url: String,
    client: reqwest::Client,
}

impl HttpNewsSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<HttpNewsSource, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                warn!("failed to build news client: {}", err);
                Error::ExistentialState("news client could not be built".into())
            })?;

        Ok(HttpNewsSource {
            url: url.into(),
            client,
        })
    }
}

fn upstream_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        warn!("news upstream timed out: {}", err);
        Error::UpstreamTimedOut
    } else {
        warn!("news upstream unreachable: {}", err);
        Error::UpstreamUnreachable
    }
}

#[async_trait]
impl NewsSource for HttpNewsSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_news(&self) -> Result<Bytes, Error> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(upstream_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!("news upstream {} responded with {}", self.url, status);
            return Err(Error::UpstreamRespondedWithError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(upstream_error)?;

        if let Err(err) = serde_json::from_slice::<IgnoredAny>(&body) {
            warn!("news upstream returned malformed json: {}", err);
            return Err(Error::UpstreamReturnedInvalidJson);
        }

        Ok(body)
    }
}
