//! Branch references and HEAD
//!
//! Branches are human-readable names pointing to a head commit (or to
//! nothing, before the first commit). HEAD is the currently checked-out
//! branch; a new commit advances HEAD's branch.
//!
//! ## Mutations
//!
//! - `checkout` selects which branch is current
//! - `update_head` advances the current branch to a new commit
//!
//! Branch heads are never moved by anything else.

use crate::artifacts::branch::branch::BranchReference;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use std::collections::HashMap;

/// Branch manager
///
/// Keeps branches in creation order, with a name index for lookups.
#[derive(Debug, Default)]
pub struct Refs {
    branches: Vec<BranchReference>,
    by_name: HashMap<String, usize>,
    /// Index of the checked-out branch, None while HEAD is detached
    current: Option<usize>,
}

impl Refs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a branch pointing at `target`
    ///
    /// # Errors
    ///
    /// `BranchAlreadyExists` if the name is taken.
    pub fn create_branch(&mut self, name: BranchName, target: Option<ObjectId>) -> Result<()> {
        if self.by_name.contains_key(name.as_ref()) {
            return Err(RepositoryError::BranchAlreadyExists(name.to_string()));
        }

        self.by_name.insert(name.to_string(), self.branches.len());
        self.branches.push(BranchReference::new(name, target));

        Ok(())
    }

    /// Make `name` the current branch
    ///
    /// # Errors
    ///
    /// `BranchNotFound` if no such branch exists; HEAD is left untouched.
    pub fn checkout(&mut self, name: &str) -> Result<&BranchReference> {
        let position = *self
            .by_name
            .get(name)
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))?;

        self.current = Some(position);
        Ok(&self.branches[position])
    }

    /// Advance the current branch to `commit_id`
    ///
    /// # Errors
    ///
    /// `DetachedHead` if no branch is checked out.
    pub fn update_head(&mut self, commit_id: ObjectId) -> Result<()> {
        let position = self.current.ok_or(RepositoryError::DetachedHead)?;
        self.branches[position].set_head(commit_id);

        Ok(())
    }

    pub fn current_branch(&self) -> Option<&BranchReference> {
        self.current.map(|position| &self.branches[position])
    }

    /// Head commit of the current branch, if any
    pub fn read_head(&self) -> Option<&ObjectId> {
        self.current_branch().and_then(BranchReference::head)
    }

    pub fn get_branch(&self, name: &str) -> Option<&BranchReference> {
        self.by_name.get(name).map(|&position| &self.branches[position])
    }

    /// All branches in creation order
    pub fn list_branches(&self) -> impl Iterator<Item = &BranchReference> {
        self.branches.iter()
    }
}
