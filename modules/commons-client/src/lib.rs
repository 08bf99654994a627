pub mod error;

pub use error::{CommonsError, Result};

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_ENDPOINT: &str = "https://commons.wikimedia.org/w/api.php";

/// Max attempts per lookup, counting the first.
const MAX_ATTEMPTS: u32 = 3;
/// Fixed spacing between retry attempts.
const RETRY_BACKOFF: Duration = Duration::from_secs(2);
/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Requested thumbnail render width in pixels.
pub const THUMB_WIDTH: u32 = 512;

// --- Response types ---

#[derive(Debug, Deserialize)]
struct ImageInfoResponse {
    #[serde(default)]
    query: Option<QuerySection>,
}

#[derive(Debug, Default, Deserialize)]
struct QuerySection {
    #[serde(default)]
    pages: HashMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

/// Metadata for one image asset: license, dimensions, URLs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub thumburl: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub extmetadata: ExtMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtMetadata {
    #[serde(rename = "LicenseShortName")]
    pub license_short_name: Option<MetaValue>,
    #[serde(rename = "Artist")]
    pub artist: Option<MetaValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaValue {
    #[serde(default)]
    pub value: String,
}

impl ImageInfo {
    /// Short license name, e.g. "CC BY-SA 4.0". Empty if unrecorded.
    pub fn license(&self) -> &str {
        self.extmetadata
            .license_short_name
            .as_ref()
            .map(|m| m.value.as_str())
            .unwrap_or("")
    }

    /// Raw artist markup as recorded on the file page. Usually HTML.
    pub fn attribution_html(&self) -> &str {
        self.extmetadata
            .artist
            .as_ref()
            .map(|m| m.value.as_str())
            .unwrap_or("")
    }

    /// Preferred display URL: the rendered thumbnail when available,
    /// otherwise the original upload.
    pub fn display_url(&self) -> &str {
        self.thumburl
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.url)
    }
}

// --- Client ---

pub struct CommonsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl CommonsClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_endpoint(user_agent, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(user_agent: &str, endpoint: String) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, endpoint })
    }

    /// Look up imageinfo for a file by its Commons filename.
    ///
    /// Returns `Ok(None)` when the file exists in no page or carries no
    /// imageinfo (a definitive miss, not retried). Transient failures
    /// are retried with fixed spacing; the last error is returned once
    /// attempts are exhausted.
    pub async fn image_info(&self, filename: &str) -> Result<Option<ImageInfo>> {
        let title = format!("File:{filename}");
        let width = THUMB_WIDTH.to_string();
        let mut last_err: Option<CommonsError> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let resp = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("action", "query"),
                    ("titles", title.as_str()),
                    ("prop", "imageinfo"),
                    ("iiprop", "extmetadata|url|size"),
                    ("iiurlwidth", width.as_str()),
                    ("format", "json"),
                ])
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await;

            match resp {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        let body = resp.text().await.unwrap_or_default();
                        last_err = Some(CommonsError::Api {
                            status: status.as_u16(),
                            message: body.chars().take(200).collect(),
                        });
                    } else {
                        match resp.json::<ImageInfoResponse>().await {
                            Ok(parsed) => {
                                let info = parsed
                                    .query
                                    .unwrap_or_default()
                                    .pages
                                    .into_values()
                                    .find_map(|p| p.imageinfo.into_iter().next());
                                return Ok(info);
                            }
                            Err(e) => last_err = Some(CommonsError::Parse(e.to_string())),
                        }
                    }
                }
                Err(e) => last_err = Some(e.into()),
            }

            if attempt < MAX_ATTEMPTS {
                debug!(filename, attempt, "Commons imageinfo lookup failed, retrying");
                tokio::time::sleep(RETRY_BACKOFF).await;
            }
        }

        warn!(filename, attempts = MAX_ATTEMPTS, "Commons imageinfo lookup exhausted retries");
        Err(last_err.unwrap_or_else(|| CommonsError::Network("no attempts made".to_string())))
    }
}
