//! Stage-boundary snapshots — the pipeline's resumability mechanism.
//!
//! Each stage writes its output through a [`StageStore`] before
//! returning, and checks for an existing snapshot on entry: presence
//! short-circuits the whole stage and the cached set is returned
//! verbatim. A terminated run resumes by trusting whatever snapshots
//! survived. Malformed snapshot content is a hard error — the operator
//! deletes the corrupt file to redo that stage.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use peopleseed_common::Candidate;
use tracing::info;

/// The four stage boundaries that checkpoint candidate sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Raw,
    WithHeadshots,
    Filtered,
    Deduped,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Raw => "candidates_raw",
            Stage::WithHeadshots => "candidates_with_headshots",
            Stage::Filtered => "candidates_filtered",
            Stage::Deduped => "candidates_deduped",
        }
    }

    fn file_name(self) -> String {
        format!("{}.jsonl", self.name())
    }
}

/// Storage seam for stage checkpoints. The filesystem implementation is
/// the production path; the in-memory one keeps resumability testable
/// without touching disk.
pub trait StageStore {
    /// The stage's cached output, or None if the stage has not completed.
    fn load(&self, stage: Stage) -> Result<Option<Vec<Candidate>>>;
    /// Persist a completed stage's output.
    fn save(&self, stage: Stage, candidates: &[Candidate]) -> Result<()>;
}

/// One line-delimited JSON file per stage under a base directory.
pub struct FsStageStore {
    dir: PathBuf,
}

impl FsStageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self, stage: Stage) -> PathBuf {
        self.dir.join(stage.file_name())
    }
}

impl StageStore for FsStageStore {
    fn load(&self, stage: Stage) -> Result<Option<Vec<Candidate>>> {
        let path = self.path(stage);
        if !path.exists() {
            return Ok(None);
        }

        let file = fs::File::open(&path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
        let mut candidates = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let candidate: Candidate = serde_json::from_str(&line).with_context(|| {
                format!("Malformed snapshot {} at line {}", path.display(), lineno + 1)
            })?;
            candidates.push(candidate);
        }

        info!(
            stage = stage.name(),
            count = candidates.len(),
            path = %path.display(),
            "Loaded stage snapshot"
        );
        Ok(Some(candidates))
    }

    fn save(&self, stage: Stage, candidates: &[Candidate]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create snapshot dir {}", self.dir.display()))?;
        let path = self.path(stage);
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create snapshot {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for candidate in candidates {
            serde_json::to_writer(&mut writer, candidate)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!(
            stage = stage.name(),
            count = candidates.len(),
            path = %path.display(),
            "Saved stage snapshot"
        );
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemStageStore {
    stages: Mutex<HashMap<Stage, Vec<Candidate>>>,
}

impl MemStageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StageStore for MemStageStore {
    fn load(&self, stage: Stage) -> Result<Option<Vec<Candidate>>> {
        let stages = self.stages.lock().unwrap_or_else(|e| e.into_inner());
        Ok(stages.get(&stage).cloned())
    }

    fn save(&self, stage: Stage, candidates: &[Candidate]) -> Result<()> {
        let mut stages = self.stages.lock().unwrap_or_else(|e| e.into_inner());
        stages.insert(stage, candidates.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(qid: &str) -> Candidate {
        Candidate {
            qid: qid.to_string(),
            name: format!("Person {qid}"),
            ..Default::default()
        }
    }

    #[test]
    fn fs_store_roundtrips_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStageStore::new(dir.path().to_path_buf());

        assert!(store.load(Stage::Raw).unwrap().is_none());

        let candidates = vec![sample("Q1"), sample("Q2")];
        store.save(Stage::Raw, &candidates).unwrap();

        let loaded = store.load(Stage::Raw).unwrap().unwrap();
        assert_eq!(loaded, candidates);
        // Other stages stay unpopulated.
        assert!(store.load(Stage::Filtered).unwrap().is_none());
    }

    #[test]
    fn fs_store_rejects_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStageStore::new(dir.path().to_path_buf());
        let path = dir.path().join("candidates_raw.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();

        let err = store.load(Stage::Raw).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn mem_store_roundtrips() {
        let store = MemStageStore::new();
        assert!(store.load(Stage::Deduped).unwrap().is_none());
        store.save(Stage::Deduped, &[sample("Q5")]).unwrap();
        assert_eq!(store.load(Stage::Deduped).unwrap().unwrap().len(), 1);
    }
}
