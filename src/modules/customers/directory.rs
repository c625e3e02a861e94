//! Client side of the hotel existence check.

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use concierge_kernel::settings::HotelDirectorySettings;
use reqwest::{Client, Url};
use thiserror::Error;

/// What the hotel service said about a hotel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelLookup {
    /// The hotel service answered with a 2xx status
    Found,
    /// Any other status; server-side failures are reported as absence too
    Missing { status: u16 },
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("problem with request to hotel service at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Answers whether a hotel exists.
#[async_trait]
pub trait HotelDirectory: Send + Sync {
    async fn lookup(&self, hotel_id: &str) -> Result<HotelLookup, DirectoryError>;
}

/// [`HotelDirectory`] backed by `GET {base_url}/hotels/{hotel_id}` on the
/// hotel service. One attempt per lookup, bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct HttpHotelDirectory {
    client: Client,
    base_url: Url,
}

impl HttpHotelDirectory {
    pub fn new(settings: &HotelDirectorySettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .with_context(|| format!("invalid hotel directory url '{}'", settings.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "hotel directory url '{}' cannot carry a path",
                settings.base_url
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .context("failed to build hotel directory client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The hotel id is pushed as a single, percent-encoded path segment.
    pub fn hotel_url(&self, hotel_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("hotels").push(hotel_id);
        }
        url
    }
}

#[async_trait]
impl HotelDirectory for HttpHotelDirectory {
    async fn lookup(&self, hotel_id: &str) -> Result<HotelLookup, DirectoryError> {
        let url = self.hotel_url(hotel_id);
        tracing::debug!(%url, "checking hotel existence");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| DirectoryError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(HotelLookup::Found)
        } else {
            Ok(HotelLookup::Missing {
                status: status.as_u16(),
            })
        }
    }
}
