//! Staging area
//!
//! The index tracks which files go into the next commit. Entries keep their
//! insertion order; re-adding a path replaces the existing snapshot in place
//! instead of moving it to the end.

use crate::artifacts::objects::file_snapshot::FileSnapshot;

#[derive(Debug, Clone, Default)]
pub struct Index {
    /// Staged snapshots in insertion order, unique by path
    entries: Vec<FileSnapshot>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a snapshot, replacing an existing entry with the same path
    pub fn add(&mut self, snapshot: FileSnapshot) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.path() == snapshot.path())
        {
            Some(existing) => *existing = snapshot,
            None => self.entries.push(snapshot),
        }
    }

    /// Unstage the entry at `path`; no-op if it is not staged
    pub fn remove(&mut self, path: &str) -> Option<FileSnapshot> {
        let position = self.entries.iter().position(|entry| entry.path() == path)?;
        Some(self.entries.remove(position))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[FileSnapshot] {
        &self.entries
    }
}
