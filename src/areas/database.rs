//! Content store
//!
//! Owns every commit record and every blob for the lifetime of the process.
//! Commits form an arena keyed by id; parent links are ids looked up here,
//! and since a parent must be stored before its child the graph cannot
//! contain cycles.
//!
//! Blobs are zlib-compressed and keyed by their snapshot hash. Storing the
//! same hash twice keeps the first content.

use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{Read, Write};

#[derive(Debug, Default)]
pub struct Database {
    commits: HashMap<ObjectId, CommitRecord>,
    blobs: HashMap<ObjectId, Bytes>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a commit and index it by id
    ///
    /// Callers guarantee distinct ids; every parent must already be stored.
    pub fn add_commit(&mut self, commit: CommitRecord) -> crate::errors::Result<&CommitRecord> {
        if let Some(parent) = commit.parents().find(|parent| !self.contains(parent)) {
            return Err(RepositoryError::CommitNotFound(parent.clone()));
        }

        let id = commit.id().clone();
        let commit = self.commits.entry(id).or_insert(commit);
        Ok(&*commit)
    }

    pub fn contains(&self, commit_id: &ObjectId) -> bool {
        self.commits.contains_key(commit_id)
    }

    pub fn get_commit(&self, commit_id: &ObjectId) -> Option<&CommitRecord> {
        self.commits.get(commit_id)
    }

    /// Look up a commit that must exist
    pub fn load_commit(&self, commit_id: &ObjectId) -> crate::errors::Result<&CommitRecord> {
        self.get_commit(commit_id)
            .ok_or_else(|| RepositoryError::CommitNotFound(commit_id.clone()))
    }

    pub fn commits_count(&self) -> usize {
        self.commits.len()
    }

    /// Store blob content unless the hash is already present
    pub fn put_blob(&mut self, oid: &ObjectId, content: &str) -> anyhow::Result<()> {
        // identical content across files and commits is stored once
        if let Entry::Vacant(entry) = self.blobs.entry(oid.clone()) {
            entry.insert(Self::compress(Bytes::copy_from_slice(content.as_bytes()))?);
        }

        Ok(())
    }

    /// Blob content for a hash, or an empty string for an unknown hash
    pub fn blob_content(&self, oid: &ObjectId) -> anyhow::Result<String> {
        match self.blobs.get(oid) {
            Some(compressed) => {
                let content = Self::decompress(compressed)?;
                String::from_utf8(content.to_vec())
                    .with_context(|| format!("blob {} is not valid UTF-8", oid))
            }
            None => Ok(String::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn blobs_count(&self) -> usize {
        self.blobs.len()
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress blob content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing blob content")
    }

    fn decompress(data: &Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data.as_ref());
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress blob content")?;

        Ok(decompressed_content.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::file_snapshot::FileSnapshot;
    use crate::artifacts::objects::tree::TreeHash;
    use chrono::{FixedOffset, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn database() -> Database {
        Database::new()
    }

    fn commit(message: &str, parent: Option<ObjectId>) -> CommitRecord {
        let timestamp = FixedOffset::east_opt(0)
            .unwrap()
            .timestamp_opt(1640995200, 0)
            .unwrap();
        CommitRecord::new(
            message.to_string(),
            "u".to_string(),
            timestamp,
            TreeHash::Empty,
            &[],
            parent,
            None,
        )
    }

    #[rstest]
    fn put_blob_is_idempotent(mut database: Database) -> anyhow::Result<()> {
        let snapshot = FileSnapshot::new("a.txt", "first");

        database.put_blob(snapshot.oid(), "first")?;
        database.put_blob(snapshot.oid(), "second")?;

        assert_eq!(database.blob_content(snapshot.oid())?, "first");
        assert_eq!(database.blobs_count(), 1);

        Ok(())
    }

    #[rstest]
    fn unknown_blob_reads_as_empty(database: Database) -> anyhow::Result<()> {
        assert_eq!(database.blob_content(&ObjectId::digest("missing"))?, "");

        Ok(())
    }

    #[rstest]
    fn blob_content_survives_compression(mut database: Database) -> anyhow::Result<()> {
        let content = "line one\nline two\n".repeat(64);
        let oid = FileSnapshot::hash_content("big.txt", &content);

        database.put_blob(&oid, &content)?;

        assert_eq!(database.blob_content(&oid)?, content);

        Ok(())
    }

    #[rstest]
    fn commits_are_indexed_by_id(mut database: Database) -> anyhow::Result<()> {
        let root = commit("root", None);
        let root_id = root.id().clone();
        database.add_commit(root)?;

        let child = commit("child", Some(root_id.clone()));
        let child_id = child.id().clone();
        database.add_commit(child)?;

        assert_eq!(database.commits_count(), 2);
        assert_eq!(database.get_commit(&child_id).unwrap().parent1(), Some(&root_id));
        assert!(database.get_commit(&ObjectId::digest("unknown")).is_none());

        Ok(())
    }

    #[rstest]
    fn rejects_commit_with_unknown_parent(mut database: Database) {
        let orphan = commit("orphan", Some(ObjectId::digest("nowhere")));

        assert_eq!(
            database.add_commit(orphan).unwrap_err(),
            RepositoryError::CommitNotFound(ObjectId::digest("nowhere"))
        );
        assert_eq!(database.commits_count(), 0);
    }
}
