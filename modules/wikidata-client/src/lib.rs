pub mod error;
pub mod query;
pub mod types;

pub use error::{Result, WikidataError};
pub use types::{SparqlBinding, SparqlResponse, SparqlRow};

use std::time::Duration;

use tracing::{error, warn};

const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Max attempts per query, counting the first.
const MAX_ATTEMPTS: u32 = 3;
/// Per-request timeout. Broad discovery queries run long on the public endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
/// Backoff per attempt after HTTP 429 (linear: 30s, then 60s).
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(30);
/// Fixed backoff after a request timeout.
const TIMEOUT_BACKOFF: Duration = Duration::from_secs(10);
/// Fixed backoff after any other transport or server failure.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

pub struct SparqlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SparqlClient {
    /// Client against the public Wikidata endpoint. The endpoint's
    /// etiquette policy requires a descriptive User-Agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_endpoint(user_agent, DEFAULT_ENDPOINT.to_string())
    }

    /// Point the client at a non-default endpoint (mirrors, tests).
    pub fn with_endpoint(user_agent: &str, endpoint: String) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, endpoint })
    }

    /// Run one SELECT query and return its result bindings.
    ///
    /// Retries up to [`MAX_ATTEMPTS`]: linearly increasing backoff on
    /// HTTP 429, fixed backoff on timeouts and other transient failures.
    /// The last failure is returned once attempts are exhausted; the
    /// caller decides whether that aborts anything (the pipeline treats
    /// an exhausted query as zero results).
    pub async fn select(&self, sparql: &str) -> Result<Vec<SparqlRow>> {
        let mut last_err: Option<WikidataError> = None;

        for attempt in 1..=MAX_ATTEMPTS {
            let resp = self
                .client
                .get(&self.endpoint)
                .query(&[("query", sparql), ("format", "json")])
                .header("Accept", "application/sparql-results+json")
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await;

            match resp {
                Ok(resp) if resp.status().as_u16() == 429 => {
                    last_err = Some(WikidataError::RateLimited(attempt));
                    if attempt < MAX_ATTEMPTS {
                        let wait = RATE_LIMIT_BACKOFF * attempt;
                        warn!(
                            attempt,
                            wait_secs = wait.as_secs(),
                            "Rate limited by SPARQL endpoint, backing off"
                        );
                        tokio::time::sleep(wait).await;
                    }
                }
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        let body = resp.text().await.unwrap_or_default();
                        last_err = Some(WikidataError::Api {
                            status: status.as_u16(),
                            message: body.chars().take(300).collect(),
                        });
                        if attempt < MAX_ATTEMPTS {
                            warn!(attempt, status = status.as_u16(), "SPARQL request failed, retrying");
                            tokio::time::sleep(ERROR_BACKOFF).await;
                        }
                        continue;
                    }
                    match resp.json::<SparqlResponse>().await {
                        Ok(parsed) => return Ok(parsed.results.bindings),
                        Err(e) => {
                            last_err = Some(WikidataError::Parse(e.to_string()));
                            if attempt < MAX_ATTEMPTS {
                                warn!(attempt, error = %e, "Undecodable SPARQL response, retrying");
                                tokio::time::sleep(ERROR_BACKOFF).await;
                            }
                        }
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_err = Some(WikidataError::Network(e.to_string()));
                    if attempt < MAX_ATTEMPTS {
                        warn!(attempt, "SPARQL query timed out, retrying");
                        tokio::time::sleep(TIMEOUT_BACKOFF).await;
                    }
                }
                Err(e) => {
                    last_err = Some(e.into());
                    if attempt < MAX_ATTEMPTS {
                        warn!(attempt, "SPARQL transport error, retrying");
                        tokio::time::sleep(ERROR_BACKOFF).await;
                    }
                }
            }
        }

        error!(attempts = MAX_ATTEMPTS, "SPARQL query failed after all retries");
        Err(last_err.unwrap_or_else(|| WikidataError::Network("no attempts made".to_string())))
    }
}
