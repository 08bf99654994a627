//! Uploader: pushes final records to the external REST store in
//! batches with upsert-on-conflict semantics.
//!
//! Best-effort per batch — a failed batch is logged and counted but the
//! remaining batches still run. The whole stage is skipped with a
//! warning when store credentials are absent.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use peopleseed_common::{AuditLog, Candidate, Config};
use tracing::{error, info, warn};

use crate::export::ExportRecord;
use crate::stats::RunStats;

pub const BATCH_SIZE: usize = 50;
const PEOPLE_BATCH_DELAY: Duration = Duration::from_millis(200);
const AUDIT_BATCH_DELAY: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl StoreClient {
    fn new(user_agent: &str, base_url: &str, key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build store HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
        })
    }

    /// POST one batch to a collection with merge-duplicates resolution.
    /// 200/201 is success; anything else is an error for the caller to
    /// count, never to propagate past the stage.
    async fn upsert_batch<T: serde::Serialize>(&self, collection: &str, batch: &[T]) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&batch)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("Store request to {collection} failed"))?;

        let status = resp.status().as_u16();
        if !matches!(status, 200 | 201) {
            let body: String = resp.text().await.unwrap_or_default().chars().take(300).collect();
            bail!("Store {collection} upsert failed (status {status}): {body}");
        }
        Ok(())
    }
}

/// Upload survivors then the audit trail. Returns Ok even when batches
/// fail; only client construction errors propagate.
pub async fn upload(
    config: &Config,
    candidates: &[Candidate],
    audit: &AuditLog,
    stats: &mut RunStats,
) -> Result<()> {
    let Some((base_url, key)) = config.store_credentials() else {
        warn!("Store credentials not set, skipping upload");
        return Ok(());
    };

    let client = StoreClient::new(&config.user_agent, base_url, key)?;

    info!(count = candidates.len(), "Uploading people records");
    for batch in candidates.chunks(BATCH_SIZE) {
        let records: Vec<ExportRecord<'_>> = batch.iter().map(ExportRecord::from).collect();
        match client.upsert_batch("people", &records).await {
            Ok(()) => stats.uploaded_ok += batch.len(),
            Err(e) => {
                error!(error = %e, batch_len = batch.len(), "People batch upsert failed");
                stats.upload_failed += batch.len();
            }
        }
        tokio::time::sleep(PEOPLE_BATCH_DELAY).await;
    }
    info!(ok = stats.uploaded_ok, failed = stats.upload_failed, "People upload complete");

    info!(count = audit.len(), "Uploading audit entries");
    for batch in audit.entries().chunks(BATCH_SIZE) {
        if let Err(e) = client.upsert_batch("audit_log", batch).await {
            error!(error = %e, batch_len = batch.len(), "Audit batch upsert failed");
        }
        tokio::time::sleep(AUDIT_BATCH_DELAY).await;
    }

    Ok(())
}
