//! Headshot resolver: enriches candidates with license-compliant image
//! metadata from the Commons imageinfo API.
//!
//! Candidates with no filename, or whose lookup fails after the client's
//! retry budget, are dropped from the resolved set entirely. This is a
//! silent filter — only the safety filter writes audit entries.

use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use commons_client::CommonsClient;
use peopleseed_common::{strip_html, Candidate};
use tracing::{debug, info};

use crate::snapshot::{Stage, StageStore};
use crate::stats::RunStats;

/// Pause between per-candidate imageinfo lookups.
const LOOKUP_DELAY: Duration = Duration::from_millis(300);

pub async fn resolve(
    client: &CommonsClient,
    store: &dyn StageStore,
    candidates: Vec<Candidate>,
    stats: &mut RunStats,
) -> Result<Vec<Candidate>> {
    if let Some(cached) = store.load(Stage::WithHeadshots)? {
        stats.headshots_resolved = cached.len();
        return Ok(cached);
    }

    let total = candidates.len();
    info!(total, "Resolving headshots");
    let mut resolved: Vec<Candidate> = Vec::new();

    for mut candidate in candidates {
        if candidate.headshot_filename.is_empty() {
            stats.headshots_dropped += 1;
            continue;
        }

        let info = match client.image_info(&candidate.headshot_filename).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                debug!(qid = %candidate.qid, file = %candidate.headshot_filename, "No imageinfo, dropping");
                stats.headshots_dropped += 1;
                tokio::time::sleep(LOOKUP_DELAY).await;
                continue;
            }
            Err(e) => {
                debug!(qid = %candidate.qid, error = %e, "Imageinfo lookup failed, dropping");
                stats.headshots_dropped += 1;
                tokio::time::sleep(LOOKUP_DELAY).await;
                continue;
            }
        };

        candidate.headshot_url = info.display_url().to_string();
        candidate.headshot_source = format!(
            "https://commons.wikimedia.org/wiki/File:{}",
            urlencoding::encode(&candidate.headshot_filename)
        );
        candidate.headshot_license = info.license().to_string();
        candidate.headshot_attribution = strip_html(info.attribution_html());
        candidate.headshot_width = info.width;
        candidate.headshot_height = info.height;
        candidate.last_verified_at = Some(Utc::now());

        resolved.push(candidate);
        tokio::time::sleep(LOOKUP_DELAY).await;
    }

    info!(resolved = resolved.len(), total, "Headshot resolution complete");
    stats.headshots_resolved = resolved.len();
    store.save(Stage::WithHeadshots, &resolved)?;
    Ok(resolved)
}
