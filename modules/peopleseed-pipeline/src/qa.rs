//! Post-run QA checks over the final dataset. Informational only: a
//! failed check is logged loudly but never fails the run.

use std::collections::BTreeMap;

use peopleseed_common::{AuditLog, Candidate};
use tracing::{info, warn};

use crate::categories::CATEGORIES;

#[derive(Debug)]
pub struct QaReport {
    /// Records missing any export-ready field.
    pub missing_fields: usize,
    /// Records whose birth year falls after the adult cutoff.
    pub minors: usize,
    pub audit_entries: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub total: usize,
}

impl QaReport {
    pub fn passed(&self) -> bool {
        self.missing_fields == 0 && self.minors == 0 && self.audit_entries > 0
    }
}

pub fn run_checks(candidates: &[Candidate], audit: &AuditLog, adult_cutoff_year: i32) -> QaReport {
    let missing_fields = candidates.iter().filter(|c| !c.export_ready()).count();
    let minors = candidates
        .iter()
        .filter(|c| c.birth_year.is_some_and(|y| y > adult_cutoff_year))
        .count();

    let mut category_counts: BTreeMap<String, usize> = BTreeMap::new();
    for c in candidates {
        *category_counts.entry(c.category.clone()).or_default() += 1;
    }

    QaReport {
        missing_fields,
        minors,
        audit_entries: audit.len(),
        category_counts,
        total: candidates.len(),
    }
}

/// Log the report, one line per check plus the category breakdown
/// against configured targets.
pub fn log_report(report: &QaReport) {
    check("all records have required fields", report.missing_fields == 0);
    check("no minors in public seed", report.minors == 0);
    check("audit log present", report.audit_entries > 0);

    for cat in CATEGORIES {
        let count = report.category_counts.get(cat.slug).copied().unwrap_or(0);
        info!(
            category = cat.slug,
            count,
            target = cat.limit,
            "Category breakdown"
        );
    }
    info!(total = report.total, audit_entries = report.audit_entries, "QA complete");
}

fn check(name: &str, ok: bool) {
    if ok {
        info!(check = name, "QA PASS");
    } else {
        warn!(check = name, "QA FAIL");
    }
}
