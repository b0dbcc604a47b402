//! Durable set of Canvas task ids that already have a reminder.
//!
//! File format: comma-separated decimal integers, no trailing delimiter.
//! A missing file is an empty set.
//!
//! # Invariants
//! - Ids are only ever added; the set grows monotonically across runs.
//! - The file is read at most once per store instance (`load` is idempotent).
//! - `mark_seen` never touches disk; only `persist` does, with a full atomic rewrite.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::KnownIdError;
use crate::storage::write_atomic;

pub struct KnownIdStore {
    path: PathBuf,
    ids: BTreeSet<i64>,
    loaded: bool,
}

impl KnownIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: BTreeSet::new(),
            loaded: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read the file into memory. No-op once it has succeeded.
    ///
    /// Creates the parent directory if it is missing; an absent file yields
    /// an empty set.
    pub fn load(&mut self) -> Result<(), KnownIdError> {
        if self.loaded {
            return Ok(());
        }

        let init_err = |source| KnownIdError::Init {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(init_err)?;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(init_err(e)),
        };

        let parsed = parse_ids(&content).map_err(|value| KnownIdError::Corrupt {
            path: self.path.clone(),
            value,
        })?;
        self.ids.extend(parsed);
        self.loaded = true;

        tracing::debug!(count = self.ids.len(), path = %self.path.display(), "loaded known ids");
        Ok(())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Add ids in memory only.
    pub fn mark_seen<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.ids.extend(ids);
    }

    /// Atomically overwrite the file with the full current set.
    pub fn persist(&self) -> Result<(), KnownIdError> {
        write_atomic(&self.path, serialize_ids(&self.ids).as_bytes()).map_err(|source| {
            KnownIdError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!(count = self.ids.len(), path = %self.path.display(), "persisted known ids");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

fn parse_ids(content: &str) -> Result<Vec<i64>, String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map_err(|_| s.to_string()))
        .collect()
}

fn serialize_ids(ids: &BTreeSet<i64>) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
