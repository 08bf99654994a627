//! Export: serializes the final candidate set and audit trail to
//! durable files — line-delimited JSON plus a flattened CSV.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use peopleseed_common::{AuditEntry, Candidate};
use serde::Serialize;
use tracing::info;

/// The output record schema shared by the JSONL export and the store
/// upload.
#[derive(Debug, Serialize)]
pub struct ExportRecord<'a> {
    pub name: &'a str,
    pub profession: &'a str,
    pub category: &'a str,
    pub aliases: &'a [String],
    pub platform_handles: &'a BTreeMap<String, String>,
    pub headshot_url: &'a str,
    pub headshot_source: &'a str,
    pub headshot_license: &'a str,
    pub headshot_attribution: &'a str,
    pub source_urls: &'a [String],
    pub wikidata_qid: &'a str,
    pub birth_year: Option<i32>,
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Candidate> for ExportRecord<'a> {
    fn from(c: &'a Candidate) -> Self {
        Self {
            name: &c.name,
            profession: &c.profession,
            category: &c.category,
            aliases: &c.aliases,
            platform_handles: &c.platform_handles,
            headshot_url: &c.headshot_url,
            headshot_source: &c.headshot_source,
            headshot_license: &c.headshot_license,
            headshot_attribution: &c.headshot_attribution,
            source_urls: &c.source_urls,
            wikidata_qid: &c.qid,
            birth_year: c.birth_year,
            last_verified_at: c.last_verified_at,
        }
    }
}

const CSV_HEADER: &str = "name,profession,category,aliases,platform_handles,headshot_url,headshot_source,headshot_license,headshot_attribution,source_urls,wikidata_qid,birth_year,last_verified_at";

pub fn export_jsonl(candidates: &[Candidate], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for candidate in candidates {
        serde_json::to_writer(&mut writer, &ExportRecord::from(candidate))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(count = candidates.len(), path = %path.display(), "Exported JSONL");
    Ok(())
}

pub fn export_csv(candidates: &[Candidate], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{CSV_HEADER}")?;
    for candidate in candidates {
        let row = csv_row(candidate)?;
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    info!(count = candidates.len(), path = %path.display(), "Exported CSV");
    Ok(())
}

pub fn export_audit_log(entries: &[AuditEntry], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        serde_json::to_writer(&mut writer, entry)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(count = entries.len(), path = %path.display(), "Exported audit log");
    Ok(())
}

/// Flatten one candidate into a CSV line: lists joined with "; ",
/// the handle map as a JSON object string.
fn csv_row(c: &Candidate) -> Result<String> {
    let fields = [
        c.name.clone(),
        c.profession.clone(),
        c.category.clone(),
        c.aliases.join("; "),
        serde_json::to_string(&c.platform_handles)?,
        c.headshot_url.clone(),
        c.headshot_source.clone(),
        c.headshot_license.clone(),
        c.headshot_attribution.clone(),
        c.source_urls.join("; "),
        c.qid.clone(),
        c.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        c.last_verified_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    ];
    Ok(fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(","))
}

/// Quote a field when it contains the separator, quotes, or newlines;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
