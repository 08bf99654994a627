//! Deduplicator: collapses candidates that refer to the same person,
//! in three ordered passes — QID, shared social handle, normalized name.
//!
//! Dedup drops are silent (no audit entries); the earlier candidate in
//! iteration order is always the one retained, and surviving relative
//! order is preserved. Handle collisions are only detected when both
//! candidates expose the same platform key — no cross-platform identity
//! resolution is attempted.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use peopleseed_common::{normalize_name, Candidate};
use tracing::info;

use crate::snapshot::{Stage, StageStore};
use crate::stats::RunStats;

/// The three passes as a pure function. Idempotent: running it on its
/// own output changes nothing.
pub fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    // Pass 1: QID. Upstream should already guarantee uniqueness.
    let mut seen_qids: HashSet<String> = HashSet::new();
    let unique: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| seen_qids.insert(c.qid.clone()))
        .collect();

    let mut removed: HashSet<String> = HashSet::new();

    // Pass 2: same (platform, handle) pair claimed by an earlier candidate.
    let mut handle_claims: HashMap<String, String> = HashMap::new();
    for candidate in &unique {
        for (platform, handle) in &candidate.platform_handles {
            let key = format!("{platform}:{}", handle.to_lowercase());
            match handle_claims.get(&key) {
                Some(owner) if owner != &candidate.qid => {
                    removed.insert(candidate.qid.clone());
                }
                _ => {
                    handle_claims.insert(key, candidate.qid.clone());
                }
            }
        }
    }

    // Pass 3: normalized-name collision, skipping handle-pass removals.
    let mut name_claims: HashMap<String, String> = HashMap::new();
    for candidate in &unique {
        if removed.contains(&candidate.qid) {
            continue;
        }
        let normalized = normalize_name(&candidate.name);
        match name_claims.get(&normalized) {
            Some(owner) if owner != &candidate.qid => {
                removed.insert(candidate.qid.clone());
            }
            _ => {
                name_claims.insert(normalized, candidate.qid.clone());
            }
        }
    }

    unique
        .into_iter()
        .filter(|c| !removed.contains(&c.qid))
        .collect()
}

/// Snapshot-aware stage wrapper around [`deduplicate`].
pub fn run(
    store: &dyn StageStore,
    candidates: Vec<Candidate>,
    stats: &mut RunStats,
) -> Result<Vec<Candidate>> {
    if let Some(cached) = store.load(Stage::Deduped)? {
        return Ok(cached);
    }

    let before = candidates.len();
    let deduped = deduplicate(candidates);
    stats.dedup_removed = before - deduped.len();

    info!(removed = stats.dedup_removed, remaining = deduped.len(), "Deduplication complete");
    store.save(Stage::Deduped, &deduped)?;
    Ok(deduped)
}
