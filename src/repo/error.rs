use thiserror::Error;

use crate::object::{DecodeError, Id, ParseIdError};

/// Describes the potential error conditions that might arise from
/// mingit `Repository` operations.
///
/// The first group reports preconditions the caller can do something
/// about; the second group reports damaged or missing repository state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("repository is not initialized")]
    NotInitialized,

    #[error("a repository already exists here")]
    AlreadyInitialized,

    #[error("file does not exist: {0}")]
    FileNotFound(String),

    #[error("cannot stage {0}: not a plain file")]
    NothingToStage(String),

    #[error("file {0} is neither staged nor tracked")]
    NothingToRemove(String),

    #[error("commit message is empty")]
    EmptyCommitMessage,

    #[error("no changes staged for commit")]
    NothingToCommit,

    #[error("no branch named {0}")]
    NoSuchBranch(String),

    #[error("no commit with id {0}")]
    NoSuchCommit(String),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("cannot remove the current branch")]
    CannotRemoveCurrentBranch,

    #[error("already on branch {0}")]
    CannotCheckoutCurrentBranch(String),

    #[error("an untracked working file would be overwritten")]
    UntrackedFileConflict,

    #[error("the stage must be empty before a merge")]
    MergeWithUncommittedChanges,

    #[error("cannot merge a branch with itself")]
    CannotMergeSelf,

    #[error("no remote named {0}")]
    RemoteNotFound(String),

    #[error("remote {0} already exists")]
    RemoteAlreadyExists(String),

    #[error("remote has no branch named {0}")]
    NoSuchRemoteBranch(String),

    #[error("the remote branch is ahead of the local one")]
    RequirePullFirst,

    #[error("loose object {id} is corrupt")]
    CorruptObject {
        id: String,
        #[source]
        source: DecodeError,
    },

    #[error("missing object {0}")]
    MissingObject(String),

    #[error("HEAD is malformed")]
    CorruptHead,

    #[error("ref {name} is malformed")]
    CorruptRef {
        name: String,
        #[source]
        source: ParseIdError,
    },

    #[error("malformed stage record")]
    StageRecord(#[source] serde_json::Error),

    #[error("malformed remote registry")]
    RemoteRegistry(#[source] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(id: &Id, source: DecodeError) -> Error {
        Error::CorruptObject {
            id: id.to_string(),
            source,
        }
    }
}

/// A specialized `Result` type for mingit `Repository` operations.
pub type Result<T> = std::result::Result<T, Error>;
