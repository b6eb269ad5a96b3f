//! Fetching the forecast and observed payloads.
//!
//! A source is either an `http(s)` URL or a local path. Both payloads are
//! fetched concurrently and the session is only built once both have
//! arrived; a failure in either aborts the load.

use anyhow::Context;
use hrv_data::ViewerSession;
use hrv_forecast::{ForecastStore, ObservedStore};
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const MAX_TRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Where a payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

impl FromStr for Source {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Source::Url(s.to_string()))
        } else {
            Ok(Source::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn http_client() -> anyhow::Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// GET a URL, retrying with exponential backoff on transport errors and
/// non-OK statuses.
async fn fetch_url(client: &Client, url: &str) -> anyhow::Result<String> {
    let mut sleep_millis: u64 = 1000;
    let mut last_error = None;

    for attempt in 1..=MAX_TRIES {
        match client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                return response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body from {url}"));
            }
            Ok(response) => {
                warn!(
                    "Attempt {}/{}: Bad response status for {}: {}",
                    attempt,
                    MAX_TRIES,
                    url,
                    response.status()
                );
                last_error = Some(anyhow::anyhow!("{url} returned {}", response.status()));
            }
            Err(e) => {
                warn!("Attempt {}/{}: Request failed for {}: {}", attempt, MAX_TRIES, url, e);
                last_error = Some(e.into());
            }
        }

        if attempt < MAX_TRIES {
            info!("Sleeping for {} milliseconds before retry for {}", sleep_millis, url);
            tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
            sleep_millis *= 2;
        }
    }

    Err(last_error
        .unwrap_or_else(|| anyhow::anyhow!("no attempts made"))
        .context(format!("All attempts failed for {url}")))
}

/// Read a source's full text.
pub async fn fetch_text(client: &Client, source: &Source) -> anyhow::Result<String> {
    match source {
        Source::Url(url) => fetch_url(client, url).await,
        Source::Path(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Fetch both payloads concurrently, then build the session stores.
pub async fn load_session(forecast: &Source, observed: &Source) -> anyhow::Result<ViewerSession> {
    let client = http_client()?;
    info!("Loading forecast from {} and observations from {}", forecast, observed);

    let (forecast_csv, observed_json) =
        tokio::try_join!(fetch_text(&client, forecast), fetch_text(&client, observed))?;

    let forecasts = ForecastStore::load(&forecast_csv);
    let observed = ObservedStore::load(&observed_json)
        .with_context(|| format!("Failed to load observed data from {observed}"))?;
    Ok(ViewerSession::new(forecasts, observed))
}

/// Fetch and parse only the forecast payload.
pub async fn load_forecasts(forecast: &Source) -> anyhow::Result<ForecastStore> {
    let client = http_client()?;
    let forecast_csv = fetch_text(&client, forecast).await?;
    Ok(ForecastStore::load(&forecast_csv))
}
