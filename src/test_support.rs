//! In-memory commit graph builder shared by the unit tests

use crate::areas::database::Database;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::file_snapshot::FileSnapshot;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::MerkleTree;
use chrono::{FixedOffset, TimeZone};
use std::collections::HashMap;

pub(crate) struct CommitGraph {
    pub(crate) database: Database,
    ids: HashMap<String, ObjectId>,
    names: HashMap<ObjectId, String>,
}

impl CommitGraph {
    pub(crate) fn new() -> Self {
        Self {
            database: Database::new(),
            ids: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Store a commit named `name` with the given parents and file contents
    pub(crate) fn commit(&mut self, name: &str, parents: &[&str], files: &[(&str, &str)]) -> ObjectId {
        let snapshots = files
            .iter()
            .map(|(path, content)| FileSnapshot::new(*path, *content))
            .collect::<Vec<_>>();
        for (snapshot, (_, content)) in snapshots.iter().zip(files) {
            self.database
                .put_blob(snapshot.oid(), content)
                .expect("Failed to store blob");
        }

        // one hour apart so timestamps are distinct and ordered
        let timestamp = FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(1640995200 + self.ids.len() as i64 * 3600, 0)
            .unwrap();
        let mut parents = parents.iter().map(|parent| self.id(parent).clone());

        let commit = CommitRecord::new(
            name.to_string(),
            "tester".to_string(),
            timestamp,
            MerkleTree::hash(&snapshots),
            &snapshots,
            parents.next(),
            parents.next(),
        );
        let id = commit.id().clone();
        self.database.add_commit(commit).expect("Failed to add commit");

        self.ids.insert(name.to_string(), id.clone());
        self.names.insert(id.clone(), name.to_string());
        id
    }

    pub(crate) fn id(&self, name: &str) -> &ObjectId {
        self.ids
            .get(name)
            .unwrap_or_else(|| panic!("unknown commit {name}"))
    }

    pub(crate) fn get(&self, name: &str) -> &CommitRecord {
        self.database
            .get_commit(self.id(name))
            .unwrap_or_else(|| panic!("commit {name} not stored"))
    }

    pub(crate) fn name_of(&self, id: &ObjectId) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or("?")
    }
}
