//! Parser tests: raw SPARQL rows → Candidates.
//!
//! Each test hand-crafts row JSON, runs parse_rows, and asserts on the
//! resulting candidates. No I/O, no network.

use peopleseed_pipeline::categories::by_slug;
use peopleseed_pipeline::parser::parse_rows;
use wikidata_client::SparqlRow;

fn row(json: &str) -> SparqlRow {
    serde_json::from_str(json).expect("invalid test row JSON")
}

fn entity(qid: &str) -> String {
    format!("http://www.wikidata.org/entity/{qid}")
}

fn person_row(qid: &str, label: &str, extra: &str) -> SparqlRow {
    let sep = if extra.is_empty() { "" } else { "," };
    row(&format!(
        r#"{{
            "person": {{"type": "uri", "value": "{}"}},
            "personLabel": {{"type": "literal", "value": "{label}"}}{sep}
            {extra}
        }}"#,
        entity(qid)
    ))
}

#[test]
fn duplicate_qid_rows_merge_into_one_candidate() {
    // Spec scenario: first row has no Twitter handle, second has one.
    let rows = vec![
        person_row("Q1", "Alice", r#""instagramHandle": {"type": "literal", "value": "x"}"#),
        person_row(
            "Q1",
            "Alice",
            r#""twitterHandle": {"type": "literal", "value": "alice"}"#,
        ),
    ];
    let cat = by_slug("streamer").unwrap();
    let candidates = parse_rows(&rows, cat);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].qid, "Q1");
    assert_eq!(
        candidates[0].platform_handles.get("twitter").map(String::as_str),
        Some("alice")
    );
}

#[test]
fn first_seen_handle_wins_per_platform() {
    let rows = vec![
        person_row(
            "Q1",
            "Alice",
            r#""twitterHandle": {"type": "literal", "value": "first"}"#,
        ),
        person_row(
            "Q1",
            "Alice",
            r#""twitterHandle": {"type": "literal", "value": "second"}"#,
        ),
    ];
    let candidates = parse_rows(&rows, by_slug("streamer").unwrap());

    assert_eq!(candidates.len(), 1);
    assert_eq!(
        candidates[0].platform_handles.get("twitter").map(String::as_str),
        Some("first")
    );
}

#[test]
fn rows_without_identifier_are_skipped() {
    let rows = vec![row(
        r#"{"personLabel": {"type": "literal", "value": "Nobody"}}"#,
    )];
    assert!(parse_rows(&rows, by_slug("athlete").unwrap()).is_empty());
}

#[test]
fn label_equal_to_qid_signals_labeling_failure() {
    let rows = vec![
        person_row("Q77", "Q77", ""),
        person_row("Q78", "", ""),
        person_row("Q79", "Real Name", ""),
    ];
    let candidates = parse_rows(&rows, by_slug("athlete").unwrap());
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].qid, "Q79");
}

#[test]
fn full_row_populates_all_fields() {
    let rows = vec![row(&format!(
        r#"{{
            "person": {{"type": "uri", "value": "{}"}},
            "personLabel": {{"type": "literal", "value": "Alice Streamer"}},
            "personDescription": {{"type": "literal", "value": "game streamer"}},
            "birthDate": {{"type": "literal", "value": "1995-06-15T00:00:00Z"}},
            "genderLabel": {{"type": "literal", "value": "female"}},
            "image": {{"type": "uri", "value": "http://commons.wikimedia.org/wiki/Special:FilePath/Alice%20Streamer.jpg"}},
            "tiktokHandle": {{"type": "literal", "value": "alicestreams"}}
        }}"#,
        entity("Q100")
    ))];
    let cat = by_slug("streamer").unwrap();
    let candidates = parse_rows(&rows, cat);

    assert_eq!(candidates.len(), 1);
    let c = &candidates[0];
    assert_eq!(c.name, "Alice Streamer");
    assert_eq!(c.description, "game streamer");
    assert_eq!(c.profession, "Streamer");
    assert_eq!(c.category, "streamer");
    assert_eq!(c.birth_year, Some(1995));
    assert_eq!(c.gender, "female");
    assert_eq!(c.headshot_filename, "Alice Streamer.jpg");
    assert_eq!(c.platform_handles.get("tiktok").map(String::as_str), Some("alicestreams"));
    assert_eq!(c.source_urls, vec!["https://www.wikidata.org/wiki/Q100".to_string()]);
}

#[test]
fn unparseable_birth_date_leaves_year_unknown() {
    let rows = vec![person_row(
        "Q5",
        "Bob",
        r#""birthDate": {"type": "literal", "value": "unknown value"}"#,
    )];
    let candidates = parse_rows(&rows, by_slug("athlete").unwrap());
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].birth_year, None);
}

#[test]
fn first_seen_order_is_preserved() {
    let rows = vec![
        person_row("Q3", "Carol", ""),
        person_row("Q1", "Alice", ""),
        person_row("Q3", "Carol", ""),
        person_row("Q2", "Bob", ""),
    ];
    let candidates = parse_rows(&rows, by_slug("athlete").unwrap());
    let qids: Vec<&str> = candidates.iter().map(|c| c.qid.as_str()).collect();
    assert_eq!(qids, vec!["Q3", "Q1", "Q2"]);
}
