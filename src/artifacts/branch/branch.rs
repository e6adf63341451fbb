//! Branch reference
//!
//! A branch is a name plus an optional head commit. A freshly initialised
//! repository has a `master` branch with no head until the first commit.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct BranchReference {
    name: BranchName,
    head: Option<ObjectId>,
}

impl BranchReference {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    pub fn set_head(&mut self, commit_id: ObjectId) {
        self.head = Some(commit_id);
    }
}
