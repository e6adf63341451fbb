//! Three-way merge
//!
//! Classifies every path of `ours` and `theirs` against their merge base by
//! comparing content hashes:
//!
//! | ours      | theirs    | base       | result                         |
//! |-----------|-----------|------------|--------------------------------|
//! | present   | absent    | absent     | keep ours                      |
//! | unchanged | absent    | present    | deleted by theirs, omit        |
//! | modified  | absent    | present    | Modify/Delete conflict, ours   |
//! | X         | X         | any        | keep                           |
//! | unchanged | modified  | any        | take theirs                    |
//! | modified  | unchanged | any        | keep ours                      |
//! | modified  | modified  | any        | Content conflict, markers      |
//! | absent    | present   | absent     | add theirs                     |
//! | absent    | unchanged | present    | deleted by ours, omit          |
//! | absent    | modified  | present    | Delete/Modify conflict, theirs |
//!
//! Paths of `ours` come first in their commit order, followed by the paths
//! only `theirs` has. Conflicts are data, not errors: the merged list is
//! always a best-effort union.

use crate::areas::database::Database;
use crate::artifacts::merge::merge_base::MergeBaseFinder;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::file_snapshot::FileSnapshot;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Modified on our side, deleted on theirs
    ModifyDelete,
    /// Both sides changed the content differently
    Content,
    /// Deleted on our side, modified on theirs
    DeleteModify,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConflictKind::ModifyDelete => "Modify/Delete",
            ConflictKind::Content => "Content",
            ConflictKind::DeleteModify => "Delete/Modify",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    path: String,
    kind: ConflictKind,
}

impl Conflict {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> ConflictKind {
        self.kind
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CONFLICT ({}): {}", self.kind, self.path)
    }
}

/// Outcome of merging two commits
///
/// Kept and taken files are trimmed snapshots (hash only); content-conflict
/// files carry their synthesized content.
#[derive(Debug, Clone)]
pub struct MergeResult {
    files: Vec<FileSnapshot>,
    conflicts: Vec<Conflict>,
    base: Option<ObjectId>,
}

impl MergeResult {
    pub fn files(&self) -> &[FileSnapshot] {
        &self.files
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Merge base the classification was made against
    pub fn base(&self) -> Option<&ObjectId> {
        self.base.as_ref()
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Conflict report, one `CONFLICT (<kind>): <path>` line per conflict
    pub fn report(&self) -> String {
        self.conflicts
            .iter()
            .map(|conflict| format!("{conflict}\n"))
            .collect()
    }
}

pub struct MergeEngine<'r> {
    database: &'r Database,
}

impl<'r> MergeEngine<'r> {
    pub fn new(database: &'r Database) -> Self {
        MergeEngine { database }
    }

    pub fn merge_commits(
        &self,
        ours: &CommitRecord,
        theirs: &CommitRecord,
    ) -> anyhow::Result<MergeResult> {
        let base = MergeBaseFinder::new(|commit_id| self.database.get_commit(commit_id))
            .find_merge_base(Some(ours.id()), Some(theirs.id()));

        debug_log!(
            "Merging {} into {} with base {:?}",
            theirs.id(),
            ours.id(),
            base.map(CommitRecord::id)
        );

        let our_files = Self::file_map(Some(ours));
        let their_files = Self::file_map(Some(theirs));
        let base_files = Self::file_map(base);

        let mut files = Vec::new();
        let mut conflicts = Vec::new();

        for ours_file in ours.files() {
            let path = ours_file.path();
            let ours_oid = ours_file.oid();
            let base_oid = base_files.get(path).copied();

            match their_files.get(path).copied() {
                None => match base_oid {
                    None => files.push(ours_file.to_trimmed()),
                    Some(base_oid) if base_oid == ours_oid => {}
                    Some(_) => {
                        conflicts.push(Self::conflict(path, ConflictKind::ModifyDelete));
                        files.push(ours_file.to_trimmed());
                    }
                },
                Some(theirs_oid) if theirs_oid == ours_oid => {
                    files.push(ours_file.to_trimmed());
                }
                Some(theirs_oid) => {
                    if base_oid == Some(ours_oid) {
                        files.push(FileSnapshot::trimmed(path, theirs_oid.clone()));
                    } else if base_oid == Some(theirs_oid) {
                        files.push(ours_file.to_trimmed());
                    } else {
                        conflicts.push(Self::conflict(path, ConflictKind::Content));
                        files.push(self.conflict_file(path, ours_oid, theirs_oid, theirs.id())?);
                    }
                }
            }
        }

        for theirs_file in theirs.files() {
            let path = theirs_file.path();
            if our_files.contains_key(path) {
                continue;
            }

            match base_files.get(path).copied() {
                None => files.push(theirs_file.to_trimmed()),
                Some(base_oid) if base_oid == theirs_file.oid() => {}
                Some(_) => {
                    conflicts.push(Self::conflict(path, ConflictKind::DeleteModify));
                    files.push(theirs_file.to_trimmed());
                }
            }
        }

        Ok(MergeResult {
            files,
            conflicts,
            base: base.map(|commit| commit.id().clone()),
        })
    }

    fn file_map(commit: Option<&CommitRecord>) -> HashMap<&str, &ObjectId> {
        commit
            .map(|commit| {
                commit
                    .files()
                    .iter()
                    .map(|file| (file.path(), file.oid()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn conflict(path: &str, kind: ConflictKind) -> Conflict {
        debug_log!("{} conflict on {}", kind, path);

        Conflict {
            path: path.to_string(),
            kind,
        }
    }

    /// File holding both versions between conflict markers
    fn conflict_file(
        &self,
        path: &str,
        ours_oid: &ObjectId,
        theirs_oid: &ObjectId,
        theirs_id: &ObjectId,
    ) -> anyhow::Result<FileSnapshot> {
        let ours_content = self.database.blob_content(ours_oid)?;
        let theirs_content = self.database.blob_content(theirs_oid)?;

        let content = format!(
            "<<<<<<< HEAD\n{}\n=======\n{}\n>>>>>>> {}\n",
            ours_content,
            theirs_content,
            theirs_id.to_short_oid()
        );

        Ok(FileSnapshot::new(path, content))
    }
}
