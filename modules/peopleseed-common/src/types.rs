use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A prospective public-figure record, keyed by its Wikidata QID.
///
/// Created by the result parser, enriched in place by the headshot
/// resolver, and only ever *selected* (never mutated) by the safety
/// filter and deduplicator. Every merge and dedup operation preserves
/// exactly one Candidate per QID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable external entity identifier — the dedup primary key.
    pub qid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    /// Free-text gender label; may be empty.
    #[serde(default)]
    pub gender: String,
    /// Platform name → handle/ID. At most one entry per platform;
    /// BTreeMap keeps serialization and iteration deterministic.
    #[serde(default)]
    pub platform_handles: BTreeMap<String, String>,
    #[serde(default)]
    pub headshot_filename: String,
    #[serde(default)]
    pub headshot_url: String,
    #[serde(default)]
    pub headshot_source: String,
    #[serde(default)]
    pub headshot_license: String,
    #[serde(default)]
    pub headshot_attribution: String,
    #[serde(default)]
    pub headshot_width: u32,
    #[serde(default)]
    pub headshot_height: u32,
    #[serde(default)]
    pub source_urls: Vec<String>,
    #[serde(default)]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// A record is export-ready once it holds a name, profession,
    /// display URL, source page reference, license, and attribution.
    pub fn export_ready(&self) -> bool {
        !self.name.is_empty()
            && !self.profession.is_empty()
            && !self.headshot_url.is_empty()
            && !self.headshot_source.is_empty()
            && !self.headshot_license.is_empty()
            && !self.headshot_attribution.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_ready_requires_all_fields() {
        let mut c = Candidate {
            qid: "Q1".to_string(),
            name: "Alice".to_string(),
            profession: "Streamer".to_string(),
            headshot_url: "https://example.org/a.jpg".to_string(),
            headshot_source: "https://example.org/File:a.jpg".to_string(),
            headshot_license: "CC BY 4.0".to_string(),
            headshot_attribution: "Alice Photographer".to_string(),
            ..Default::default()
        };
        assert!(c.export_ready());

        c.headshot_license.clear();
        assert!(!c.export_ready());
    }
}
