//! Safety filter: ordered, auditable exclusion policy.
//!
//! Every candidate entering this stage receives exactly one audit entry
//! — the first matching rule wins and evaluation short-circuits. The
//! filter selects; it never mutates candidates.

use anyhow::Result;
use peopleseed_common::{AuditDetails, AuditLog, Candidate};
use tracing::info;

use crate::snapshot::{Stage, StageStore};
use crate::stats::RunStats;

/// Substrings in a description that flag a suspected minor. Matched
/// case-insensitively against free text; "16" and "17" are blunt and
/// known to over-match, which is accepted policy here.
pub const SUSPECTED_MINOR_SIGNALS: &[&str] = &["16", "17", "high school", "teen"];

/// A headshot needs at least one dimension at or above this.
pub const MIN_IMAGE_DIM: u32 = 256;

/// Evaluate the ordered rule set for one candidate. Pure.
///
/// `adult_cutoff_year` is the latest birth year that counts as 18+
/// (current year minus 18, boundary inclusive).
pub fn evaluate(candidate: &Candidate, adult_cutoff_year: i32) -> AuditDetails {
    let Some(birth_year) = candidate.birth_year else {
        return AuditDetails::MissingBirthYear;
    };

    if birth_year > adult_cutoff_year {
        return AuditDetails::Under18 { birth_year };
    }

    let description = candidate.description.to_lowercase();
    for signal in SUSPECTED_MINOR_SIGNALS {
        if description.contains(signal) {
            return AuditDetails::SuspectedMinorSignal {
                signal: (*signal).to_string(),
                description: candidate.description.clone(),
            };
        }
    }

    if candidate.headshot_url.is_empty() {
        return AuditDetails::NoHeadshot;
    }

    if candidate.headshot_license.is_empty() {
        return AuditDetails::NoLicense;
    }

    if candidate.headshot_width < MIN_IMAGE_DIM && candidate.headshot_height < MIN_IMAGE_DIM {
        return AuditDetails::ImageTooSmall {
            width: candidate.headshot_width,
            height: candidate.headshot_height,
        };
    }

    AuditDetails::Included {
        category: candidate.category.clone(),
        birth_year,
    }
}

/// Apply the filter to the whole set, recording one verdict per input.
pub fn apply(
    store: &dyn StageStore,
    candidates: Vec<Candidate>,
    audit: &mut AuditLog,
    adult_cutoff_year: i32,
    stats: &mut RunStats,
) -> Result<Vec<Candidate>> {
    if let Some(cached) = store.load(Stage::Filtered)? {
        stats.filter_included = cached.len();
        return Ok(cached);
    }

    let total = candidates.len();
    info!(total, "Applying safety filters");
    let mut safe: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        let verdict = evaluate(&candidate, adult_cutoff_year);
        let included = matches!(verdict, AuditDetails::Included { .. });
        audit.record(&candidate.qid, &candidate.name, verdict);
        if included {
            safe.push(candidate);
        } else {
            stats.filter_excluded += 1;
        }
    }

    info!(included = safe.len(), excluded = stats.filter_excluded, total, "Safety filter complete");
    stats.filter_included = safe.len();
    store.save(Stage::Filtered, &safe)?;
    Ok(safe)
}
