// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Upper bound for a single source download.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the HTTP client used to reach the dataset source.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("building HTTP client")
}

/// GET `url` and return the body as text; non-2xx responses are errors.
pub async fn get_text(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status {}", url))?
        .text()
        .await
        .with_context(|| format!("Reading text from {}", url))
}
