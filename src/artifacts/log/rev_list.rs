//! Commit history traversal
//!
//! Depth-first walk over the commit DAG starting at a head commit. A stack
//! holds the commits still to visit; popping a commit yields it and pushes
//! its unvisited parents (first parent, then the merged-in parent). Each
//! reachable commit is yielded exactly once, so shared ancestors of a merge
//! appear a single time.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::HashSet;

#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: Option<ObjectId>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = &'r CommitRecord;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        let mut pending = Vec::new();
        let mut visited = HashSet::new();

        if let Some(start) = self.start {
            visited.insert(start.clone());
            pending.push(start);
        }

        RevListIntoIter {
            database: self.database,
            pending,
            visited,
        }
    }
}

#[derive(Clone)]
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    pending: Vec<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> Iterator for RevListIntoIter<'r> {
    type Item = &'r CommitRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.pending.pop() {
            // ids that are not stored are skipped, not fatal
            let Some(commit) = self.database.get_commit(&commit_id) else {
                continue;
            };

            for parent in commit.parents() {
                if self.visited.insert(parent.clone()) {
                    self.pending.push(parent.clone());
                }
            }

            return Some(commit);
        }

        None
    }
}
