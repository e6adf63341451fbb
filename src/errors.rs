//! Repository error kinds
//!
//! Structural failures (unknown branch, duplicate branch, operations that make
//! no sense in the current state) are typed so callers can tell them apart.
//! Merge conflicts are not errors: they are reported through
//! [`MergeOutcome`](crate::artifacts::merge::MergeOutcome).

use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Coarse classification of a [`RepositoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidState,
    InvalidArgument,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("branch {0} not found")]
    BranchNotFound(String),

    #[error("commit {0} not found")]
    CommitNotFound(ObjectId),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("nothing to commit (staging area is empty)")]
    NothingToCommit,

    #[error("cannot create branch: no commits exist yet")]
    NoCommitsYet,

    #[error("HEAD is detached (no active branch)")]
    DetachedHead,
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::BranchNotFound(_) | RepositoryError::CommitNotFound(_) => {
                ErrorKind::NotFound
            }
            RepositoryError::BranchAlreadyExists(_) => ErrorKind::AlreadyExists,
            RepositoryError::InvalidBranchName(_) => ErrorKind::InvalidArgument,
            RepositoryError::NothingToCommit
            | RepositoryError::NoCommitsYet
            | RepositoryError::DetachedHead => ErrorKind::InvalidState,
        }
    }

    /// Classify an error returned by a repository operation
    ///
    /// Returns `None` for failures that are not structural repository errors
    /// (I/O errors from the working tree, for instance).
    pub fn kind_of(error: &anyhow::Error) -> Option<ErrorKind> {
        error.downcast_ref::<RepositoryError>().map(Self::kind)
    }
}
