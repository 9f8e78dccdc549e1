//! Branch refs and the HEAD pointer.
//!
//! A branch is one file under `refs/heads/<name>` holding a commit ID
//! in hex plus a newline. Remote-tracking branches live under
//! `refs/remotes/<remote>/<branch>` in the same format. `HEAD` is a
//! symbolic ref naming the current branch, always in the form
//! `ref: refs/heads/<name>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::object::Id;
use crate::repo::{Error, Result};
use crate::store::write_atomic;

const HEAD_PREFIX: &str = "ref: refs/heads/";

#[derive(Debug)]
pub(crate) struct RefStore {
    state_dir: PathBuf,
}

impl RefStore {
    pub(crate) fn new(state_dir: &Path) -> RefStore {
        RefStore {
            state_dir: state_dir.to_path_buf(),
        }
    }

    fn heads_dir(&self) -> PathBuf {
        self.state_dir.join("refs").join("heads")
    }

    fn remotes_dir(&self) -> PathBuf {
        self.state_dir.join("refs").join("remotes")
    }

    fn head_path(&self) -> PathBuf {
        self.state_dir.join("HEAD")
    }

    /// Name of the branch HEAD points at.
    pub(crate) fn head_branch(&self) -> Result<String> {
        let text = fs::read_to_string(self.head_path())?;

        let branch = text
            .strip_prefix(HEAD_PREFIX)
            .map(|rest| rest.trim_end().to_string())
            .filter(|branch| !branch.is_empty());

        branch.ok_or(Error::CorruptHead)
    }

    /// Point HEAD at a branch. The branch need not exist yet; init
    /// writes HEAD before the first ref.
    pub(crate) fn set_head_branch(&self, branch: &str) -> Result<()> {
        let text = format!("{}{}\n", HEAD_PREFIX, branch);
        write_atomic(&self.state_dir, &self.head_path(), text.as_bytes())?;
        Ok(())
    }

    /// The commit ID a branch points at, or `None` if no such branch.
    pub(crate) fn read(&self, branch: &str) -> Result<Option<Id>> {
        read_ref(&self.heads_dir().join(branch), branch)
    }

    /// Point a branch at a commit, creating it if absent.
    pub(crate) fn write(&self, branch: &str, id: &Id) -> Result<()> {
        write_ref(&self.state_dir, &self.heads_dir().join(branch), id)
    }

    pub(crate) fn exists(&self, branch: &str) -> bool {
        self.heads_dir().join(branch).is_file()
    }

    pub(crate) fn delete(&self, branch: &str) -> Result<()> {
        fs::remove_file(self.heads_dir().join(branch))?;
        Ok(())
    }

    /// The commit ID a remote-tracking ref points at.
    pub(crate) fn read_remote(&self, remote: &str, branch: &str) -> Result<Option<Id>> {
        let name = format!("{}/{}", remote, branch);
        read_ref(&self.remotes_dir().join(remote).join(branch), &name)
    }

    /// Point a remote-tracking ref at a commit.
    pub(crate) fn write_remote(&self, remote: &str, branch: &str, id: &Id) -> Result<()> {
        let path = self.remotes_dir().join(remote).join(branch);
        write_ref(&self.state_dir, &path, id)
    }

    /// Resolve a name against local branches first, then against
    /// remote-tracking refs if it carries a `remote/branch` shape.
    pub(crate) fn read_any(&self, name: &str) -> Result<Option<Id>> {
        if let Some(id) = self.read(name)? {
            return Ok(Some(id));
        }

        if let Some(slash) = name.find('/') {
            let (remote, branch) = name.split_at(slash);
            return self.read_remote(remote, &branch[1..]);
        }

        Ok(None)
    }

    /// All local branch names, sorted.
    pub(crate) fn branches(&self) -> Result<Vec<String>> {
        let mut out = Vec::new();
        walk(&self.heads_dir(), "", &mut out)?;
        out.sort();
        Ok(out)
    }
}

fn read_ref(path: &Path, name: &str) -> Result<Option<Id>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    match Id::from_hex(text.trim_end()) {
        Ok(id) => Ok(Some(id)),
        Err(err) => Err(Error::CorruptRef {
            name: name.to_string(),
            source: err,
        }),
    }
}

fn write_ref(state_dir: &Path, path: &Path, id: &Id) -> Result<()> {
    let text = format!("{}\n", id);
    write_atomic(state_dir, path, text.as_bytes())?;
    Ok(())
}

fn walk(dir: &Path, prefix: &str, out: &mut Vec<String>) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    for entry in entries {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };

        let qualified = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        if entry.file_type()?.is_dir() {
            walk(&entry.path(), &qualified, out)?;
        } else {
            out.push(qualified);
        }
    }

    Ok(())
}
