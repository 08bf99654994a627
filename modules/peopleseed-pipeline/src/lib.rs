pub mod categories;
pub mod dedup;
pub mod discovery;
pub mod export;
pub mod headshots;
pub mod parser;
pub mod qa;
pub mod safety;
pub mod snapshot;
pub mod stats;
pub mod upload;
