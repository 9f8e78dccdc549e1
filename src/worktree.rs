//! A flat view of the working directory: every plain file except the
//! repository state directory. Subdirectories are outside the model
//! and are left alone.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::object::{Blob, Commit};
use crate::repo::{Error, Result, STATE_DIR};
use crate::stage::Stage;
use crate::store::ObjectStore;

#[derive(Debug)]
pub(crate) struct Worktree {
    dir: PathBuf,
}

impl Worktree {
    pub(crate) fn new(dir: &Path) -> Worktree {
        Worktree {
            dir: dir.to_path_buf(),
        }
    }

    fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub(crate) fn exists(&self, filename: &str) -> bool {
        self.path_of(filename).exists()
    }

    pub(crate) fn is_file(&self, filename: &str) -> bool {
        self.path_of(filename).is_file()
    }

    /// Names of all plain files in the working directory, sorted.
    pub(crate) fn files(&self) -> Result<Vec<String>> {
        let mut out = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name == STATE_DIR {
                continue;
            }
            out.push(name);
        }

        out.sort();
        Ok(out)
    }

    pub(crate) fn read(&self, filename: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.path_of(filename))?)
    }

    /// Hash the file's current content into a blob, without staging it.
    pub(crate) fn snapshot(&self, filename: &str) -> Result<Blob> {
        Ok(Blob::new(filename, self.read(filename)?))
    }

    pub(crate) fn write(&self, filename: &str, content: &[u8]) -> Result<()> {
        fs::write(self.path_of(filename), content)?;
        Ok(())
    }

    /// Delete a file. Already gone is fine.
    pub(crate) fn remove(&self, filename: &str) -> Result<()> {
        match fs::remove_file(self.path_of(filename)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Working files that neither the head commit nor the stage knows
    /// about, sorted.
    pub(crate) fn untracked(&self, head: &Commit, stage: &Stage) -> Result<Vec<String>> {
        let mut out = Vec::new();

        for name in self.files()? {
            if head.tracked(&name).is_none() && !stage.mentions(&name) {
                out.push(name);
            }
        }

        Ok(out)
    }

    /// Refuse to overwrite work that was never committed: every
    /// untracked file must already hold exactly the content the target
    /// commit would put there. A file the target does not track can
    /// never match, so its mere presence blocks the switch.
    pub(crate) fn guard_overwrite(&self, untracked: &[String], target: &Commit) -> Result<()> {
        for name in untracked {
            let current = self.snapshot(name)?;
            if target.tracked(name) != Some(current.id()) {
                return Err(Error::UntrackedFileConflict);
            }
        }

        Ok(())
    }

    /// Delete every file the current head or the stage lays claim to.
    pub(crate) fn clear_tracked(&self, head: &Commit, stage: &Stage) -> Result<()> {
        for name in head.files().keys() {
            self.remove(name)?;
        }
        for name in stage.added().keys() {
            self.remove(name)?;
        }
        for name in stage.removed() {
            self.remove(name)?;
        }
        Ok(())
    }

    /// Write out every file a commit tracks.
    pub(crate) fn materialize(&self, target: &Commit, store: &ObjectStore) -> Result<()> {
        for (name, id) in target.files() {
            let blob = store.blob(id)?;
            self.write(name, blob.content())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use crate::object::Id;
    use tempfile::TempDir;

    fn temp_worktree() -> (TempDir, Worktree) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(STATE_DIR)).unwrap();
        let worktree = Worktree::new(dir.path());
        (dir, worktree)
    }

    fn tree_of(entries: &[(&str, &Id)]) -> Commit {
        let mut files = BTreeMap::new();
        for (name, id) in entries {
            files.insert(name.to_string(), (*id).clone());
        }
        Commit::new("snapshot", 1, Vec::new(), files)
    }

    #[test]
    fn files_skips_state_dir_and_subdirs() {
        let (dir, worktree) = temp_worktree();

        worktree.write("b.txt", b"b").unwrap();
        worktree.write("a.txt", b"a").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        assert_eq!(worktree.files().unwrap(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn read_write_remove() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("wug.txt", b"This is a wug.\n").unwrap();
        assert!(worktree.is_file("wug.txt"));
        assert_eq!(worktree.read("wug.txt").unwrap(), b"This is a wug.\n");

        worktree.remove("wug.txt").unwrap();
        assert!(!worktree.exists("wug.txt"));

        // Removing again is fine.
        worktree.remove("wug.txt").unwrap();
    }

    #[test]
    fn snapshot_hashes_current_content() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("wug.txt", b"This is a wug.\n").unwrap();
        let blob = worktree.snapshot("wug.txt").unwrap();

        assert_eq!(blob.filename(), "wug.txt");
        assert_eq!(
            blob.id(),
            Blob::new("wug.txt", b"This is a wug.\n".to_vec()).id()
        );
    }

    #[test]
    fn untracked_ignores_known_files() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("tracked.txt", b"t").unwrap();
        worktree.write("staged.txt", b"s").unwrap();
        worktree.write("loose.txt", b"l").unwrap();

        let tracked_blob = Blob::new("tracked.txt", b"t".to_vec());
        let head = tree_of(&[("tracked.txt", tracked_blob.id())]);

        let mut stage = Stage::default();
        stage.stage(
            "staged.txt",
            Blob::new("staged.txt", b"s".to_vec()).id().clone(),
        );

        assert_eq!(
            worktree.untracked(&head, &stage).unwrap(),
            vec!["loose.txt"]
        );
    }

    #[test]
    fn guard_blocks_untracked_with_different_content() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("loose.txt", b"local work").unwrap();

        let incoming = Blob::new("loose.txt", b"incoming".to_vec());
        let target = tree_of(&[("loose.txt", incoming.id())]);

        let untracked = vec!["loose.txt".to_string()];
        assert!(matches!(
            worktree.guard_overwrite(&untracked, &target),
            Err(Error::UntrackedFileConflict)
        ));
    }

    #[test]
    fn guard_blocks_untracked_the_target_ignores() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("loose.txt", b"local work").unwrap();
        let target = tree_of(&[]);

        let untracked = vec!["loose.txt".to_string()];
        assert!(matches!(
            worktree.guard_overwrite(&untracked, &target),
            Err(Error::UntrackedFileConflict)
        ));
    }

    #[test]
    fn guard_allows_identical_content() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("loose.txt", b"same bytes").unwrap();

        let incoming = Blob::new("loose.txt", b"same bytes".to_vec());
        let target = tree_of(&[("loose.txt", incoming.id())]);

        let untracked = vec!["loose.txt".to_string()];
        assert!(worktree.guard_overwrite(&untracked, &target).is_ok());
    }

    #[test]
    fn clear_tracked_removes_only_claimed_files() {
        let (_dir, worktree) = temp_worktree();

        worktree.write("tracked.txt", b"t").unwrap();
        worktree.write("staged.txt", b"s").unwrap();
        worktree.write("marked.txt", b"m").unwrap();
        worktree.write("loose.txt", b"l").unwrap();

        let tracked_blob = Blob::new("tracked.txt", b"t".to_vec());
        let head = tree_of(&[("tracked.txt", tracked_blob.id())]);

        let mut stage = Stage::default();
        stage.stage(
            "staged.txt",
            Blob::new("staged.txt", b"s".to_vec()).id().clone(),
        );
        stage.mark_removed("marked.txt");

        worktree.clear_tracked(&head, &stage).unwrap();

        assert!(!worktree.exists("tracked.txt"));
        assert!(!worktree.exists("staged.txt"));
        assert!(!worktree.exists("marked.txt"));
        assert!(worktree.exists("loose.txt"));
    }
}
