//! The remote registry and object transfer between two stores on the
//! same filesystem.
//!
//! A remote is just a name mapped to a path: either another working
//! directory or its state directory directly. Transfer copies loose
//! objects byte-for-byte in their deflated form, commits after their
//! blobs, so a reader never sees a commit whose objects are missing.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::graph;
use crate::object::Id;
use crate::repo::{Error, Result, STATE_DIR};
use crate::store::{write_atomic, ObjectStore};

/// Named remote locations, stored as a JSON document at
/// `.mingit/remotes`. A missing file reads as an empty registry.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct Remotes {
    remotes: BTreeMap<String, PathBuf>,
}

impl Remotes {
    pub(crate) fn load(path: &Path) -> Result<Remotes> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Remotes::default())
            }
            Err(err) => return Err(err.into()),
        };

        serde_json::from_slice(&bytes).map_err(Error::RemoteRegistry)
    }

    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self).map_err(Error::RemoteRegistry)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        write_atomic(dir, path, &json)?;
        Ok(())
    }

    pub(crate) fn add(&mut self, name: &str, location: &Path) -> Result<()> {
        if self.remotes.contains_key(name) {
            return Err(Error::RemoteAlreadyExists(name.to_string()));
        }

        self.remotes.insert(name.to_string(), location.to_path_buf());
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<()> {
        match self.remotes.remove(name) {
            Some(_) => Ok(()),
            None => Err(Error::RemoteNotFound(name.to_string())),
        }
    }

    pub(crate) fn location(&self, name: &str) -> Result<&Path> {
        match self.remotes.get(name) {
            Some(location) => Ok(location),
            None => Err(Error::RemoteNotFound(name.to_string())),
        }
    }
}

/// Registered locations may name the state directory itself; reduce
/// either form to the working directory.
pub(crate) fn work_dir_of(location: &Path) -> PathBuf {
    if location.file_name() == Some(STATE_DIR.as_ref()) {
        match location.parent() {
            Some(parent) => parent.to_path_buf(),
            None => location.to_path_buf(),
        }
    } else {
        location.to_path_buf()
    }
}

/// Copy every object reachable from `tip` that `dst` is missing, blobs
/// before the commit that references them. Returns how many objects
/// were written.
pub(crate) fn copy_reachable(src: &ObjectStore, dst: &ObjectStore, tip: &Id) -> Result<usize> {
    let mut commit_ids: Vec<Id> = graph::ancestors(src, tip)?.into_iter().collect();
    commit_ids.sort();

    let mut copied = 0;

    for commit_id in commit_ids {
        if dst.contains(&commit_id) {
            continue;
        }

        let commit = src.commit(&commit_id)?;
        for blob_id in commit.files().values() {
            if !dst.contains(blob_id) {
                dst.put_raw(blob_id, &src.read_raw(blob_id)?)?;
                copied += 1;
            }
        }

        dst.put_raw(&commit_id, &src.read_raw(&commit_id)?)?;
        copied += 1;
    }

    Ok(copied)
}
