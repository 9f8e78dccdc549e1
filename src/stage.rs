//! The staging area: pending additions and removals for the next commit.
//!
//! The record itself is a small JSON document at `.mingit/stage`. The
//! blob bytes for staged additions live in the store's `staging/` side
//! table, keyed by the IDs recorded here.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::object::Id;
use crate::repo::{Error, Result};
use crate::store::write_atomic;

/// Files staged for addition, mapped to their blob IDs, and files
/// marked for removal. Both collections iterate in sorted order.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct Stage {
    added: BTreeMap<String, Id>,
    removed: BTreeSet<String>,
}

impl Stage {
    pub(crate) fn load(path: &Path) -> Result<Stage> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(Error::StageRecord)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self).map_err(Error::StageRecord)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        write_atomic(dir, path, &json)?;
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub(crate) fn added(&self) -> &BTreeMap<String, Id> {
        &self.added
    }

    pub(crate) fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// The blob ID staged for this filename, if any.
    pub(crate) fn staged_id(&self, filename: &str) -> Option<&Id> {
        self.added.get(filename)
    }

    /// True if the stage mentions the filename on either side.
    pub(crate) fn mentions(&self, filename: &str) -> bool {
        self.added.contains_key(filename) || self.removed.contains(filename)
    }

    /// Stage a file for addition, clearing any removal mark. Returns
    /// the blob ID this replaces, if the file was already staged.
    pub(crate) fn stage(&mut self, filename: &str, id: Id) -> Option<Id> {
        self.removed.remove(filename);
        self.added.insert(filename.to_string(), id)
    }

    /// Withdraw a staged addition, returning its blob ID.
    pub(crate) fn unstage(&mut self, filename: &str) -> Option<Id> {
        self.added.remove(filename)
    }

    /// Mark a tracked file for removal by the next commit.
    pub(crate) fn mark_removed(&mut self, filename: &str) {
        self.removed.insert(filename.to_string());
    }

    /// Clear a removal mark. Returns true if one was present.
    pub(crate) fn unmark_removed(&mut self, filename: &str) -> bool {
        self.removed.remove(filename)
    }

    pub(crate) fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}
