pub mod audit;
pub mod config;
pub mod text;
pub mod types;

pub use audit::{AuditAction, AuditDetails, AuditEntry, AuditLog};
pub use config::Config;
pub use text::{normalize_name, strip_html};
pub use types::Candidate;
