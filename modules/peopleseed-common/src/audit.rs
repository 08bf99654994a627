//! Append-only audit trail of inclusion/exclusion decisions.
//!
//! The safety filter emits exactly one verdict per candidate per run.
//! `AuditLog` is the single writer seam: stages that decide receive it
//! `&mut`, everything else reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Included,
    Excluded,
}

/// Typed verdict payload. Serializes with a `reason` discriminator so
/// downstream consumers can filter by reason code without guessing at
/// free-form maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AuditDetails {
    MissingBirthYear,
    #[serde(rename = "under_18")]
    Under18 {
        birth_year: i32,
    },
    SuspectedMinorSignal {
        signal: String,
        description: String,
    },
    NoHeadshot,
    NoLicense,
    ImageTooSmall {
        width: u32,
        height: u32,
    },
    Included {
        category: String,
        birth_year: i32,
    },
}

impl AuditDetails {
    pub fn action(&self) -> AuditAction {
        match self {
            AuditDetails::Included { .. } => AuditAction::Included,
            _ => AuditAction::Excluded,
        }
    }
}

/// One immutable inclusion/exclusion decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub person_qid: String,
    pub person_name: String,
    pub action: AuditAction,
    pub details: AuditDetails,
    pub created_at: DateTime<Utc>,
}

/// Append-only accumulator threaded through the run.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, qid: &str, name: &str, details: AuditDetails) {
        self.entries.push(AuditEntry {
            person_qid: qid.to_string(),
            person_name: name.to_string(),
            action: details.action(),
            details,
            created_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
