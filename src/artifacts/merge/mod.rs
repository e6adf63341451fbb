//! Merging of branch heads
//!
//! - `merge_base`: common ancestor search over the commit DAG
//! - `merge_engine`: three-way classification of file paths

use crate::artifacts::merge::merge_engine::Conflict;
use crate::artifacts::objects::object_id::ObjectId;

pub mod merge_base;
pub mod merge_engine;

/// What a `merge` call did to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// One of the two branches has no commits yet
    NothingToMerge,
    /// Both branches point at the same commit
    AlreadyUpToDate,
    /// A two-parent merge commit was created and HEAD advanced to it
    Merged(ObjectId),
    /// The merge stopped before committing; the staging area holds the
    /// best-effort result
    Conflicted(Vec<Conflict>),
}

impl MergeOutcome {
    pub fn is_conflicted(&self) -> bool {
        matches!(self, MergeOutcome::Conflicted(_))
    }
}
