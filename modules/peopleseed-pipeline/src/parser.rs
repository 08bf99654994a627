//! Converts raw SPARQL result rows into Candidates.
//!
//! Pure conversion layer: no I/O, fully testable with hand-crafted rows.
//! Rows sharing a QID within one call collapse into a single Candidate,
//! with optional handle fields merged first-wins per platform.

use std::collections::{BTreeMap, HashMap};

use peopleseed_common::Candidate;
use wikidata_client::SparqlRow;

use crate::categories::CategoryConfig;

/// Result variable → platform key for the social handle columns.
const HANDLE_VARS: [(&str, &str); 4] = [
    ("twitterHandle", "twitter"),
    ("instagramHandle", "instagram"),
    ("tiktokHandle", "tiktok"),
    ("youtubeChannelId", "youtube"),
];

/// Extract the trailing QID from an entity URI. Empty input yields "".
pub fn extract_qid(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or("")
}

/// First four characters of an ISO date, parsed as a year. Any failure
/// leaves the birth year unknown rather than erroring.
pub fn parse_birth_year(date: &str) -> Option<i32> {
    date.get(..4)?.parse().ok()
}

/// Final path segment of an image URI, percent-decoded.
fn image_filename(uri: &str) -> String {
    let last = uri.rsplit('/').next().unwrap_or("");
    urlencoding::decode(last)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| last.to_string())
}

/// Fill-if-absent merge of a row's handle fields into a candidate.
/// The first row to surface a platform's handle wins.
fn merge_handles(handles: &mut BTreeMap<String, String>, row: &SparqlRow) {
    for (var, platform) in HANDLE_VARS {
        if let Some(value) = row.value(var) {
            handles
                .entry(platform.to_string())
                .or_insert_with(|| value.to_string());
        }
    }
}

/// Parse one query's rows into unique Candidates, in first-seen order.
///
/// Rows are skipped entirely when the entity URI carries no QID, or when
/// the label is empty or equals the QID (the label service's signal that
/// no real name exists in the requested language).
pub fn parse_rows(rows: &[SparqlRow], category: &CategoryConfig) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let qid = extract_qid(row.value("person").unwrap_or(""));
        if qid.is_empty() {
            continue;
        }

        // Duplicate row for an already-parsed entity (multiple occupation
        // matches): merge its handles, never create a second Candidate.
        if let Some(&i) = index.get(qid) {
            merge_handles(&mut candidates[i].platform_handles, row);
            continue;
        }

        let name = row.value("personLabel").unwrap_or("").trim();
        if name.is_empty() || name == qid {
            continue;
        }

        let birth_year = row.value("birthDate").and_then(parse_birth_year);
        let headshot_filename = row.value("image").map(image_filename).unwrap_or_default();

        let mut platform_handles = BTreeMap::new();
        merge_handles(&mut platform_handles, row);

        let candidate = Candidate {
            qid: qid.to_string(),
            name: name.to_string(),
            description: row.value("personDescription").unwrap_or("").to_string(),
            profession: category.profession.to_string(),
            category: category.slug.to_string(),
            birth_year,
            gender: row.value("genderLabel").unwrap_or("").to_string(),
            platform_handles,
            headshot_filename,
            source_urls: vec![format!("https://www.wikidata.org/wiki/{qid}")],
            ..Default::default()
        };

        index.insert(qid.to_string(), candidates.len());
        candidates.push(candidate);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_qid_takes_last_segment() {
        assert_eq!(extract_qid("http://www.wikidata.org/entity/Q42"), "Q42");
        assert_eq!(extract_qid("Q42"), "Q42");
        assert_eq!(extract_qid(""), "");
    }

    #[test]
    fn parse_birth_year_takes_leading_four_digits() {
        assert_eq!(parse_birth_year("1995-03-02T00:00:00Z"), Some(1995));
        assert_eq!(parse_birth_year("1995"), Some(1995));
        assert_eq!(parse_birth_year("19"), None);
        assert_eq!(parse_birth_year("abcd-01-01"), None);
        assert_eq!(parse_birth_year(""), None);
    }

    #[test]
    fn image_filename_decodes_percent_escapes() {
        assert_eq!(
            image_filename("http://commons.wikimedia.org/wiki/Special:FilePath/Jane%20Doe%202019.jpg"),
            "Jane Doe 2019.jpg"
        );
    }
}
