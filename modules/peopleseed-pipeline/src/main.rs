use anyhow::Result;
use chrono::{Datelike, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commons_client::CommonsClient;
use peopleseed_common::{AuditLog, Config};
use wikidata_client::SparqlClient;

use peopleseed_pipeline::snapshot::FsStageStore;
use peopleseed_pipeline::stats::RunStats;
use peopleseed_pipeline::{dedup, discovery, export, headshots, qa, safety, upload};

/// Default log level for the pipeline's own crates; RUST_LOG still
/// overrides per target.
const DEFAULT_LOG_DIRECTIVES: &[&str] = &[
    "peopleseed=info",
    "peopleseed_pipeline=info",
    "wikidata_client=info",
    "commons_client=info",
];

fn default_env_filter() -> Result<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(default_env_filter()?)
        .init();

    info!("Public-figure seed pipeline starting");
    let started = std::time::Instant::now();

    let config = Config::from_env();
    config.log_redacted();

    // Born this year or earlier counts as 18+.
    let adult_cutoff_year = Utc::now().year() - 18;

    let sparql = SparqlClient::new(&config.user_agent)?;
    let commons = CommonsClient::new(&config.user_agent)?;
    let store = FsStageStore::new(config.data_dir.join("intermediate"));

    let mut stats = RunStats::default();
    let mut audit = AuditLog::new();

    info!("── Stage 1: candidate discovery ──");
    let candidates = discovery::discover(&sparql, &store, adult_cutoff_year, &mut stats).await?;

    info!("── Stage 2: headshot resolution ──");
    let candidates = headshots::resolve(&commons, &store, candidates, &mut stats).await?;

    info!("── Stage 3: safety filtering ──");
    let candidates = safety::apply(&store, candidates, &mut audit, adult_cutoff_year, &mut stats)?;

    info!("── Stage 4: deduplication ──");
    let candidates = dedup::run(&store, candidates, &mut stats)?;

    info!("── Stage 5: export ──");
    let out_dir = config.data_dir.join("output");
    std::fs::create_dir_all(&out_dir)?;
    export::export_jsonl(&candidates, &out_dir.join("people_seed_v1.jsonl"))?;
    export::export_csv(&candidates, &out_dir.join("people_seed_v1.csv"))?;
    export::export_audit_log(audit.entries(), &out_dir.join("audit_log.jsonl"))?;
    stats.exported = candidates.len();

    info!("── Stage 6: store upload ──");
    upload::upload(&config, &candidates, &audit, &mut stats).await?;

    info!("── QA checks ──");
    let report = qa::run_checks(&candidates, &audit, adult_cutoff_year);
    qa::log_report(&report);

    info!(
        elapsed_secs = started.elapsed().as_secs(),
        final_records = candidates.len(),
        audit_entries = audit.len(),
        "Pipeline complete"
    );
    info!("{stats}");

    Ok(())
}
