//! Stage behavior tests, exercised through the in-memory stage store
//! with no filesystem or network: snapshot short-circuits, per-stage
//! counters, and the skip paths for missing inputs and credentials.

use std::path::PathBuf;

use commons_client::CommonsClient;
use peopleseed_common::{AuditAction, AuditLog, Candidate, Config};
use peopleseed_pipeline::snapshot::{MemStageStore, Stage, StageStore};
use peopleseed_pipeline::stats::RunStats;
use peopleseed_pipeline::{dedup, discovery, headshots, safety, upload};
use wikidata_client::SparqlClient;

const CUTOFF: i32 = 2006;

fn eligible(qid: &str, name: &str) -> Candidate {
    Candidate {
        qid: qid.to_string(),
        name: name.to_string(),
        category: "streamer".to_string(),
        birth_year: Some(1990),
        headshot_url: "https://upload.wikimedia.org/x.jpg".to_string(),
        headshot_license: "CC BY 4.0".to_string(),
        headshot_width: 512,
        headshot_height: 512,
        ..Default::default()
    }
}

#[test]
fn safety_filter_emits_one_entry_per_input() {
    let store = MemStageStore::new();
    let mut audit = AuditLog::new();
    let mut stats = RunStats::default();

    let mut minor = eligible("Q2", "Too Young");
    minor.birth_year = Some(2015);
    let mut unknown = eligible("Q3", "No Year");
    unknown.birth_year = None;

    let input = vec![eligible("Q1", "Alice"), minor, unknown];
    let safe = safety::apply(&store, input, &mut audit, CUTOFF, &mut stats).unwrap();

    assert_eq!(safe.len(), 1);
    assert_eq!(safe[0].qid, "Q1");
    assert_eq!(audit.len(), 3);
    let included = audit
        .entries()
        .iter()
        .filter(|e| e.action == AuditAction::Included)
        .count();
    assert_eq!(included, 1);
    assert_eq!(stats.filter_included, 1);
    assert_eq!(stats.filter_excluded, 2);
}

#[test]
fn cached_filter_snapshot_short_circuits_the_stage() {
    let store = MemStageStore::new();
    let cached = vec![eligible("Q9", "Cached Person")];
    store.save(Stage::Filtered, &cached).unwrap();

    let mut audit = AuditLog::new();
    let mut stats = RunStats::default();
    // Fresh input that would normally produce audit entries.
    let input = vec![eligible("Q1", "Alice"), eligible("Q2", "Bob")];
    let result = safety::apply(&store, input, &mut audit, CUTOFF, &mut stats).unwrap();

    // The cached set is returned verbatim and no verdicts are emitted.
    assert_eq!(result, cached);
    assert!(audit.is_empty());
}

#[test]
fn cached_dedup_snapshot_short_circuits_the_stage() {
    let store = MemStageStore::new();
    let cached = vec![eligible("Q9", "Cached Person")];
    store.save(Stage::Deduped, &cached).unwrap();

    let mut stats = RunStats::default();
    let input = vec![eligible("Q1", "Alice"), eligible("Q1", "Alice")];
    let result = dedup::run(&store, input, &mut stats).unwrap();

    assert_eq!(result, cached);
    assert_eq!(stats.dedup_removed, 0);
}

#[test]
fn dedup_stage_persists_its_output() {
    let store = MemStageStore::new();
    let mut stats = RunStats::default();

    let mut twin = eligible("Q2", "Alice");
    twin.platform_handles = [("twitter".to_string(), "alice".to_string())]
        .into_iter()
        .collect();
    let mut original = eligible("Q1", "Alice Smith");
    original.platform_handles = [("twitter".to_string(), "ALICE".to_string())]
        .into_iter()
        .collect();

    let result = dedup::run(&store, vec![original, twin], &mut stats).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].qid, "Q1");
    assert_eq!(stats.dedup_removed, 1);

    let snapshot = store.load(Stage::Deduped).unwrap().unwrap();
    assert_eq!(snapshot, result);
}

#[tokio::test]
async fn cached_discovery_snapshot_skips_all_queries() {
    let store = MemStageStore::new();
    let cached = vec![eligible("Q42", "Cached Person")];
    store.save(Stage::Raw, &cached).unwrap();

    // An unroutable endpoint: any actual query attempt would error out.
    let client =
        SparqlClient::with_endpoint("test-agent", "http://127.0.0.1:9/sparql".to_string()).unwrap();
    let mut stats = RunStats::default();

    let result = discovery::discover(&client, &store, CUTOFF, &mut stats)
        .await
        .unwrap();
    assert_eq!(result, cached);
    assert_eq!(stats.raw_discovered, 1);
}

#[tokio::test]
async fn cached_headshot_snapshot_skips_all_lookups() {
    let store = MemStageStore::new();
    let cached = vec![eligible("Q42", "Cached Person")];
    store.save(Stage::WithHeadshots, &cached).unwrap();

    let client =
        CommonsClient::with_endpoint("test-agent", "http://127.0.0.1:9/api.php".to_string())
            .unwrap();
    let mut stats = RunStats::default();

    let result = headshots::resolve(&client, &store, vec![eligible("Q1", "Alice")], &mut stats)
        .await
        .unwrap();
    assert_eq!(result, cached);
    assert_eq!(stats.headshots_resolved, 1);
}

#[tokio::test]
async fn empty_headshot_filename_drops_before_any_lookup() {
    let store = MemStageStore::new();
    // Unroutable endpoint: a lookup attempt for this candidate would fail
    // and burn the retry budget. None is ever issued.
    let client =
        CommonsClient::with_endpoint("test-agent", "http://127.0.0.1:9/api.php".to_string())
            .unwrap();
    let mut stats = RunStats::default();

    let no_file = eligible("Q1", "Alice"); // headshot_filename stays empty
    let result = headshots::resolve(&client, &store, vec![no_file], &mut stats)
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(stats.headshots_dropped, 1);
    assert_eq!(stats.headshots_resolved, 0);
}

#[tokio::test]
async fn upload_is_skipped_without_store_credentials() {
    let config = Config {
        store_url: None,
        store_key: None,
        data_dir: PathBuf::from("data"),
        user_agent: "test-agent".to_string(),
    };
    let audit = AuditLog::new();
    let mut stats = RunStats::default();

    upload::upload(&config, &[eligible("Q1", "Alice")], &audit, &mut stats)
        .await
        .unwrap();

    assert_eq!(stats.uploaded_ok, 0);
    assert_eq!(stats.upload_failed, 0);
}
