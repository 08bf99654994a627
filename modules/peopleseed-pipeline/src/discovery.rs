//! Discovery orchestrator: runs every category's query plan against the
//! SPARQL endpoint and assembles the global candidate set.
//!
//! Queries run strictly sequentially with a politeness delay between
//! them. Across queries, the first one to surface a QID wins — later
//! duplicates are dropped silently, keeping the first query's parsed
//! category and profession label.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use peopleseed_common::Candidate;
use tracing::{info, warn};
use wikidata_client::{query, SparqlClient};

use crate::categories::{CategoryConfig, ExtraQuery, CATEGORIES};
use crate::parser;
use crate::snapshot::{Stage, StageStore};
use crate::stats::RunStats;

/// Mandatory pause between consecutive SPARQL queries.
const SPARQL_DELAY: Duration = Duration::from_secs(2);

/// Run the full discovery plan, or return the cached snapshot verbatim
/// if one exists.
pub async fn discover(
    client: &SparqlClient,
    store: &dyn StageStore,
    adult_cutoff_year: i32,
    stats: &mut RunStats,
) -> Result<Vec<Candidate>> {
    if let Some(cached) = store.load(Stage::Raw)? {
        stats.raw_discovered = cached.len();
        return Ok(cached);
    }

    let mut all: Vec<Candidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for cat in CATEGORIES {
        info!(category = cat.slug, "Discovering category");

        let primary = query::occupation_query(
            cat.occupations,
            cat.limit,
            cat.min_birth_year,
            adult_cutoff_year,
            cat.gender_filter,
        );
        run_query(client, &primary, cat, "primary", &mut all, &mut seen).await;

        for eq in cat.extra_queries {
            let (label, sparql) = match eq {
                ExtraQuery::TiktokHandleHolders => (
                    "tiktok_handle_holders",
                    query::tiktok_handle_query(cat.limit, cat.min_birth_year, adult_cutoff_year),
                ),
                ExtraQuery::YoutubeChannelHolders => (
                    "youtube_channel_holders",
                    query::youtube_channel_query(cat.limit, cat.min_birth_year, adult_cutoff_year),
                ),
                ExtraQuery::MemeSubjects => (
                    "meme_subjects",
                    query::meme_subject_query(cat.limit, cat.min_birth_year, adult_cutoff_year),
                ),
            };
            run_query(client, &sparql, cat, label, &mut all, &mut seen).await;
        }
    }

    info!(total = all.len(), "Discovery complete");
    stats.raw_discovered = all.len();
    store.save(Stage::Raw, &all)?;
    Ok(all)
}

/// Run one query, parse its rows, and fold new QIDs into the running
/// set. A query that exhausts its retries contributes zero results
/// instead of aborting the run.
async fn run_query(
    client: &SparqlClient,
    sparql: &str,
    cat: &CategoryConfig,
    kind: &str,
    all: &mut Vec<Candidate>,
    seen: &mut HashSet<String>,
) {
    let rows = match client.select(sparql).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                category = cat.slug,
                query = kind,
                error = %e,
                "Query failed after retries, continuing with zero results"
            );
            Vec::new()
        }
    };

    let row_count = rows.len();
    let parsed = parser::parse_rows(&rows, cat);
    let mut added = 0usize;
    for candidate in parsed {
        if seen.insert(candidate.qid.clone()) {
            all.push(candidate);
            added += 1;
        }
    }

    info!(
        category = cat.slug,
        query = kind,
        rows = row_count,
        new_candidates = added,
        "Query parsed"
    );
    tokio::time::sleep(SPARQL_DELAY).await;
}
