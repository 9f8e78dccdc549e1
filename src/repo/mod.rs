//! Ties the pieces together: one [`Repository`] owns the object store,
//! the staging area, the refs, and the working directory, and exposes
//! the whole operation surface from `add` through `pull`.
//!
//! Every operation runs against an explicit repository handle; nothing
//! consults process-global state, so two repositories (say, a local
//! one and the remote it pushes to) can be driven side by side from
//! one process.

mod error;
pub use error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::graph;
use crate::merge;
use crate::object::{Blob, Commit, Id};
use crate::refs::RefStore;
use crate::remote::{self, Remotes};
use crate::stage::Stage;
use crate::store::ObjectStore;
use crate::worktree::Worktree;

/// Name of the state directory a repository keeps under its working
/// directory.
pub const STATE_DIR: &str = ".mingit";

/// Name of the branch `init` creates and points HEAD at.
pub const DEFAULT_BRANCH: &str = "master";

/// The outcome of a merge that was allowed to proceed.
#[derive(Debug, PartialEq)]
pub enum MergeOutcome {
    /// The other tip is already an ancestor of head; nothing changed.
    AlreadyAncestor,
    /// Head was an ancestor of the other tip; the working tree now
    /// matches that tip and no merge commit was created.
    FastForwarded,
    /// A merge commit was created. `conflicts` lists the files written
    /// with conflict markers, sorted; empty means a clean merge.
    Merged { id: Id, conflicts: Vec<String> },
}

/// A sorted summary of branches and pending changes.
#[derive(Debug, PartialEq)]
pub struct StatusReport {
    /// The branch HEAD points at.
    pub current_branch: String,
    /// Every local branch, sorted, including the current one.
    pub branches: Vec<String>,
    /// Files staged for addition, sorted.
    pub staged: Vec<String>,
    /// Files marked for removal, sorted.
    pub removed: Vec<String>,
}

/// A version-controlled directory: a flat working tree plus the state
/// under its `.mingit` directory.
#[derive(Debug)]
pub struct Repository {
    work_dir: PathBuf,
    state_dir: PathBuf,
    store: ObjectStore,
    refs: RefStore,
    worktree: Worktree,
}

impl Repository {
    /// Create the state directory under `work_dir` and write the
    /// deterministic root commit, with `master` pointing at it.
    ///
    /// Because the root commit hashes identically in every repository,
    /// any two repositories created this way share an ancestor and can
    /// push and pull between each other from the start.
    pub fn init(work_dir: &Path) -> Result<Repository> {
        let state_dir = work_dir.join(STATE_DIR);
        if state_dir.is_dir() {
            return Err(Error::AlreadyInitialized);
        }

        fs::create_dir_all(state_dir.join("objects"))?;
        fs::create_dir_all(state_dir.join("staging"))?;
        fs::create_dir_all(state_dir.join("refs").join("heads"))?;
        fs::create_dir_all(state_dir.join("refs").join("remotes"))?;
        fs::write(
            state_dir.join("config"),
            "[core]\n\trepositoryformatversion = 0\n",
        )?;

        let repo = Repository::at(work_dir.to_path_buf(), state_dir);
        Stage::default().save(&repo.stage_path())?;

        let initial = Commit::initial();
        repo.store.put_commit(&initial)?;
        repo.refs.write(DEFAULT_BRANCH, initial.id())?;
        repo.refs.set_head_branch(DEFAULT_BRANCH)?;

        info!(root = %work_dir.display(), "initialized empty repository");
        Ok(repo)
    }

    /// Open the repository whose state directory sits under `work_dir`.
    pub fn open(work_dir: &Path) -> Result<Repository> {
        let state_dir = work_dir.join(STATE_DIR);
        if !state_dir.is_dir() {
            return Err(Error::NotInitialized);
        }

        Ok(Repository::at(work_dir.to_path_buf(), state_dir))
    }

    fn at(work_dir: PathBuf, state_dir: PathBuf) -> Repository {
        Repository {
            store: ObjectStore::new(&state_dir),
            refs: RefStore::new(&state_dir),
            worktree: Worktree::new(&work_dir),
            work_dir,
            state_dir,
        }
    }

    /// The working directory this repository controls.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn stage_path(&self) -> PathBuf {
        self.state_dir.join("stage")
    }

    fn remotes_path(&self) -> PathBuf {
        self.state_dir.join("remotes")
    }

    fn load_stage(&self) -> Result<Stage> {
        Stage::load(&self.stage_path())
    }

    fn save_stage(&self, stage: &Stage) -> Result<()> {
        stage.save(&self.stage_path())
    }

    /// Name of the branch HEAD points at.
    pub fn head_branch(&self) -> Result<String> {
        self.refs.head_branch()
    }

    /// ID of the commit at the tip of the current branch.
    pub fn head_id(&self) -> Result<Id> {
        let branch = self.refs.head_branch()?;
        self.refs.read(&branch)?.ok_or(Error::CorruptHead)
    }

    /// The commit at the tip of the current branch.
    pub fn head_commit(&self) -> Result<Commit> {
        self.store.commit(&self.head_id()?)
    }

    /// Stage a file's current content for the next commit.
    ///
    /// Staging is by value: the bytes are hashed and parked now, so
    /// later edits don't change what was staged. Re-adding identical
    /// content is a no-op, and re-adding the exact content the head
    /// commit already tracks clears any pending change for the file
    /// instead of staging one.
    pub fn add(&self, filename: &str) -> Result<()> {
        if !self.worktree.exists(filename) {
            return Err(Error::FileNotFound(filename.to_string()));
        }
        if !self.worktree.is_file(filename) {
            return Err(Error::NothingToStage(filename.to_string()));
        }

        let head = self.head_commit()?;
        let mut stage = self.load_stage()?;
        let blob = self.worktree.snapshot(filename)?;

        if head.tracked(filename) == Some(blob.id()) {
            if let Some(parked) = stage.unstage(filename) {
                self.store.discard_staged(&parked)?;
            }
            stage.unmark_removed(filename);
            self.save_stage(&stage)?;
            return Ok(());
        }

        if stage.staged_id(filename) == Some(blob.id()) {
            return Ok(());
        }

        if let Some(previous) = stage.stage(filename, blob.id().clone()) {
            self.store.discard_staged(&previous)?;
        }
        self.store.stage_blob(&blob)?;
        self.save_stage(&stage)?;

        debug!(file = filename, id = %blob.id(), "staged file");
        Ok(())
    }

    /// Unstage a file, or mark a tracked file for removal and delete
    /// its working copy. Deletion is best-effort; the caller may have
    /// already deleted the file.
    pub fn remove(&self, filename: &str) -> Result<()> {
        let head = self.head_commit()?;
        let mut stage = self.load_stage()?;

        let staged = stage.staged_id(filename).cloned();
        if staged.is_none() && head.tracked(filename).is_none() {
            return Err(Error::NothingToRemove(filename.to_string()));
        }

        if let Some(parked) = staged {
            stage.unstage(filename);
            self.store.discard_staged(&parked)?;
        } else {
            stage.mark_removed(filename);
            self.worktree.remove(filename)?;
        }

        self.save_stage(&stage)?;
        debug!(file = filename, "removed file");
        Ok(())
    }

    /// Record the staged changes as a new commit on the current branch
    /// and return its ID.
    pub fn commit(&self, message: &str) -> Result<Id> {
        if message.is_empty() {
            return Err(Error::EmptyCommitMessage);
        }

        let head_id = self.head_id()?;
        self.commit_with(message, head_id, None)
    }

    /// The shared tail of `commit` and `merge`: overlay the stage onto
    /// the first parent's file table and advance the current branch.
    ///
    /// Staged blobs are promoted and the commit object written before
    /// the branch ref moves, so a crash in between leaves at worst
    /// unreferenced objects, never a ref naming a missing commit.
    fn commit_with(&self, message: &str, first_parent: Id, second_parent: Option<Id>) -> Result<Id> {
        let mut stage = self.load_stage()?;
        if stage.is_empty() {
            return Err(Error::NothingToCommit);
        }

        let mut files = self.store.commit(&first_parent)?.files().clone();
        for (name, id) in stage.added() {
            files.insert(name.clone(), id.clone());
        }
        for name in stage.removed() {
            files.remove(name);
        }

        let mut parents = vec![first_parent];
        if let Some(parent) = second_parent {
            parents.push(parent);
        }

        let commit = Commit::new(message, unix_now(), parents, files);
        self.store.promote_staged()?;
        self.store.put_commit(&commit)?;

        let branch = self.refs.head_branch()?;
        self.refs.write(&branch, commit.id())?;

        stage.clear();
        self.save_stage(&stage)?;

        info!(id = %commit.id(), branch = %branch, "created commit");
        Ok(commit.id().clone())
    }

    /// The current branch's history, newest first, following first
    /// parents only.
    pub fn log(&self) -> Result<Vec<Commit>> {
        let mut out = Vec::new();
        let mut cursor = Some(self.head_id()?);

        while let Some(id) = cursor {
            let commit = self.store.commit(&id)?;
            cursor = commit.first_parent().cloned();
            out.push(commit);
        }

        Ok(out)
    }

    /// Every commit in the store, on any branch, ordered by ID.
    pub fn global_log(&self) -> Result<Vec<Commit>> {
        self.store.commits()
    }

    /// IDs of every commit whose message contains `needle`, ordered by
    /// ID. An empty result is not an error.
    pub fn find(&self, needle: &str) -> Result<Vec<Id>> {
        let ids = self
            .store
            .commits()?
            .into_iter()
            .filter(|commit| commit.message().contains(needle))
            .map(|commit| commit.id().clone())
            .collect();

        Ok(ids)
    }

    /// Summarize branches and pending changes.
    pub fn status(&self) -> Result<StatusReport> {
        let stage = self.load_stage()?;

        Ok(StatusReport {
            current_branch: self.refs.head_branch()?,
            branches: self.refs.branches()?,
            staged: stage.added().keys().cloned().collect(),
            removed: stage.removed().iter().cloned().collect(),
        })
    }

    /// Make the working tree match another branch's tip and point HEAD
    /// at that branch. The stage is cleared.
    pub fn checkout_branch(&self, branch: &str) -> Result<()> {
        let target_id = self
            .refs
            .read(branch)?
            .ok_or_else(|| Error::NoSuchBranch(branch.to_string()))?;

        if self.refs.head_branch()? == branch {
            return Err(Error::CannotCheckoutCurrentBranch(branch.to_string()));
        }

        let target = self.store.commit(&target_id)?;
        self.switch_to(&target)?;
        self.refs.set_head_branch(branch)?;

        debug!(branch = branch, "checked out branch");
        Ok(())
    }

    /// Replace the working tree with the target commit's files.
    ///
    /// The untracked-file guard runs first: any untracked file whose
    /// content differs from what the target would write blocks the
    /// switch. On success the stage is cleared, parked blobs and all.
    fn switch_to(&self, target: &Commit) -> Result<()> {
        let head = self.head_commit()?;
        let mut stage = self.load_stage()?;

        let untracked = self.worktree.untracked(&head, &stage)?;
        self.worktree.guard_overwrite(&untracked, target)?;

        self.worktree.clear_tracked(&head, &stage)?;
        self.worktree.materialize(target, &self.store)?;

        self.store.discard_all_staged()?;
        stage.clear();
        self.save_stage(&stage)?;
        Ok(())
    }

    /// Restore one file from the head commit, overwriting the working
    /// copy. The stage is not touched.
    pub fn checkout_file_from_head(&self, filename: &str) -> Result<()> {
        let head = self.head_commit()?;
        self.restore_file(&head, filename)
    }

    /// Restore one file from the commit a hex prefix resolves to.
    pub fn checkout_file_from_commit(&self, commit_prefix: &str, filename: &str) -> Result<()> {
        let id = self.store.resolve_commit_prefix(commit_prefix)?;
        let commit = self.store.commit(&id)?;
        self.restore_file(&commit, filename)
    }

    fn restore_file(&self, commit: &Commit, filename: &str) -> Result<()> {
        let blob_id = commit
            .tracked(filename)
            .ok_or_else(|| Error::FileNotFound(filename.to_string()))?;

        let blob = self.store.blob(blob_id)?;
        self.worktree.write(filename, blob.content())
    }

    /// Move the current branch to an arbitrary commit and make the
    /// working tree match it. HEAD keeps naming the same branch.
    pub fn reset(&self, commit_prefix: &str) -> Result<()> {
        let id = self.store.resolve_commit_prefix(commit_prefix)?;
        self.reset_to(&id)
    }

    fn reset_to(&self, id: &Id) -> Result<()> {
        let target = self.store.commit(id)?;
        self.switch_to(&target)?;

        let branch = self.refs.head_branch()?;
        self.refs.write(&branch, id)?;

        debug!(branch = %branch, id = %id, "reset branch");
        Ok(())
    }

    /// Create a branch pointing at the current head. Does not switch
    /// to it.
    pub fn branch(&self, name: &str) -> Result<()> {
        if self.refs.exists(name) {
            return Err(Error::BranchAlreadyExists(name.to_string()));
        }

        let head_id = self.head_id()?;
        self.refs.write(name, &head_id)
    }

    /// Delete a branch pointer. The commits it pointed at stay in the
    /// store.
    pub fn rm_branch(&self, name: &str) -> Result<()> {
        if !self.refs.exists(name) {
            return Err(Error::NoSuchBranch(name.to_string()));
        }
        if self.refs.head_branch()? == name {
            return Err(Error::CannotRemoveCurrentBranch);
        }

        self.refs.delete(name)
    }

    /// Merge another branch (or a remote-tracking tip, named
    /// `remote/branch`) into the current branch.
    ///
    /// The stage must be empty. If the other tip is already an
    /// ancestor nothing happens; if head is the ancestor the merge
    /// fast-forwards instead of committing. Otherwise every file is
    /// classified against the split point, conflicted files are
    /// written with markers and staged like any other change, and a
    /// two-parent commit records the result.
    pub fn merge(&self, other_name: &str) -> Result<MergeOutcome> {
        let mut stage = self.load_stage()?;
        if !stage.is_empty() {
            return Err(Error::MergeWithUncommittedChanges);
        }

        let other_id = self
            .refs
            .read_any(other_name)?
            .ok_or_else(|| Error::NoSuchBranch(other_name.to_string()))?;

        let current = self.refs.head_branch()?;
        if current == other_name {
            return Err(Error::CannotMergeSelf);
        }

        let head_id = self.head_id()?;
        let split = graph::split_point(&self.store, &head_id, &other_id)?;

        if split == other_id {
            return Ok(MergeOutcome::AlreadyAncestor);
        }
        if split == head_id {
            self.fast_forward(other_name, &other_id)?;
            info!(other = other_name, "fast-forwarded");
            return Ok(MergeOutcome::FastForwarded);
        }

        let head = self.store.commit(&head_id)?;
        let other = self.store.commit(&other_id)?;
        let base = self.store.commit(&split)?;

        let plan = merge::plan(&base, &head, &other);
        if plan.is_empty() {
            return Err(Error::NothingToCommit);
        }

        let untracked = self.worktree.untracked(&head, &stage)?;
        for name in &untracked {
            if plan.touches(name) {
                return Err(Error::UntrackedFileConflict);
            }
        }

        for name in &plan.removals {
            stage.mark_removed(name);
            self.worktree.remove(name)?;
        }

        for name in &plan.rewrites {
            // Classification guarantees the other side tracks the file.
            let blob_id = match other.tracked(name) {
                Some(id) => id,
                None => continue,
            };
            let blob = self.store.blob(blob_id)?;
            self.worktree.write(name, blob.content())?;
            stage.stage(name, blob_id.clone());
        }

        for name in &plan.conflicts {
            let ours = self.tracked_text(&head, name)?;
            let theirs = self.tracked_text(&other, name)?;
            let content = merge::conflict_file(&ours, &theirs);

            self.worktree.write(name, content.as_bytes())?;

            // The merge commit below references this blob, so it goes
            // straight into the permanent store rather than parking in
            // the staging directory.
            let blob = Blob::new(name, content.into_bytes());
            self.store.put_blob(&blob)?;
            stage.stage(name, blob.id().clone());
        }

        self.save_stage(&stage)?;

        let message = format!("Merged {} into {}.", other_name, current);
        let id = self.commit_with(&message, head_id, Some(other_id))?;

        info!(id = %id, other = other_name, conflicts = plan.conflicts.len(), "merged");
        Ok(MergeOutcome::Merged {
            id,
            conflicts: plan.conflicts,
        })
    }

    /// A merge where head is the split point. For a local branch this
    /// is exactly a checkout of that branch; for a remote-tracking tip
    /// there is no branch to switch to, so the current branch advances
    /// in place.
    fn fast_forward(&self, other_name: &str, other_id: &Id) -> Result<()> {
        if self.refs.exists(other_name) {
            self.checkout_branch(other_name)
        } else {
            self.reset_to(other_id)
        }
    }

    fn tracked_text(&self, commit: &Commit, filename: &str) -> Result<String> {
        Ok(match commit.tracked(filename) {
            Some(id) => String::from_utf8_lossy(self.store.blob(id)?.content()).into_owned(),
            None => String::new(),
        })
    }

    /// Register a remote under a name. The location may be the other
    /// repository's working directory or its state directory.
    pub fn add_remote(&self, name: &str, location: &Path) -> Result<()> {
        let mut remotes = Remotes::load(&self.remotes_path())?;
        remotes.add(name, location)?;
        remotes.save(&self.remotes_path())
    }

    /// Forget a remote. Its repository is untouched.
    pub fn rm_remote(&self, name: &str) -> Result<()> {
        let mut remotes = Remotes::load(&self.remotes_path())?;
        remotes.remove(name)?;
        remotes.save(&self.remotes_path())
    }

    fn open_remote(&self, name: &str) -> Result<Repository> {
        let remotes = Remotes::load(&self.remotes_path())?;
        let location = remotes.location(name)?;

        match Repository::open(&remote::work_dir_of(location)) {
            Ok(repo) => Ok(repo),
            Err(Error::NotInitialized) => Err(Error::RemoteNotFound(name.to_string())),
            Err(err) => Err(err),
        }
    }

    /// Append the current head's history to a branch on the remote.
    ///
    /// The remote branch must be absent or an ancestor of the local
    /// head; anything else needs a pull first. Objects copy before any
    /// ref moves, and if the remote has that branch checked out, its
    /// working tree is reset to the new tip (its untracked-file guard
    /// still applies).
    pub fn push(&self, remote_name: &str, branch: &str) -> Result<()> {
        let remote = self.open_remote(remote_name)?;
        let local_head = self.head_id()?;

        if let Some(remote_head) = remote.refs.read(branch)? {
            if remote_head != local_head
                && !graph::ancestors(&self.store, &local_head)?.contains(&remote_head)
            {
                return Err(Error::RequirePullFirst);
            }
        }

        let copied = remote::copy_reachable(&self.store, &remote.store, &local_head)?;

        if remote.refs.head_branch()? == branch {
            remote.reset_to(&local_head)?;
        } else {
            remote.refs.write(branch, &local_head)?;
        }

        info!(
            remote = remote_name,
            branch = branch,
            objects = copied,
            "pushed"
        );
        Ok(())
    }

    /// Copy a remote branch's history into the local store and record
    /// its tip under `refs/remotes/<remote>/<branch>`. The working
    /// tree and local branches are untouched.
    pub fn fetch(&self, remote_name: &str, branch: &str) -> Result<()> {
        let remote = self.open_remote(remote_name)?;

        let remote_head = remote.refs.read(branch)?.ok_or_else(|| {
            Error::NoSuchRemoteBranch(format!("{}/{}", remote_name, branch))
        })?;

        let copied = remote::copy_reachable(&remote.store, &self.store, &remote_head)?;
        self.refs.write_remote(remote_name, branch, &remote_head)?;

        info!(
            remote = remote_name,
            branch = branch,
            objects = copied,
            "fetched"
        );
        Ok(())
    }

    /// Fetch, then merge the remote-tracking tip into the current
    /// branch.
    pub fn pull(&self, remote_name: &str, branch: &str) -> Result<MergeOutcome> {
        self.fetch(remote_name, branch)?;
        self.merge(&format!("{}/{}", remote_name, branch))
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
