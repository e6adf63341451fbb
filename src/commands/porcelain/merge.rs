use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::merge::MergeOutcome;
use crate::artifacts::merge::merge_engine::MergeEngine;
use crate::artifacts::objects::file_snapshot::FileSnapshot;
use crate::errors::RepositoryError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Merge the head of `branch_name` into the current branch
    ///
    /// Every merged file is written to the working tree, then the staging
    /// area is replaced by the merge result. A clean result is committed
    /// right away with both heads as parents; a conflicted one is left
    /// staged for manual resolution.
    ///
    /// # Errors
    ///
    /// `BranchNotFound` if the branch does not exist. A failed write leaves
    /// the staging area and HEAD untouched, though files written before it
    /// stay on disk. Conflicts are not errors: they come back as
    /// [`MergeOutcome::Conflicted`].
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<MergeOutcome> {
        let theirs_head = self
            .refs()
            .get_branch(branch_name)
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()))?
            .head()
            .cloned();
        let ours_head = self.refs().read_head().cloned();

        let (Some(ours_id), Some(theirs_id)) = (ours_head, theirs_head) else {
            writeln!(self.writer(), "Nothing to merge.")?;
            return Ok(MergeOutcome::NothingToMerge);
        };
        if ours_id == theirs_id {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        writeln!(
            self.writer(),
            "Merging {} into {}...",
            branch_name,
            self.current_branch_name()
        )?;

        let (files, conflicts) = {
            let database = self.database();
            let ours = database.load_commit(&ours_id)?;
            let theirs = database.load_commit(&theirs_id)?;
            let result = MergeEngine::new(database).merge_commits(ours, theirs)?;

            let files = result
                .files()
                .iter()
                .map(|file| self.hydrate(file))
                .collect::<anyhow::Result<Vec<_>>>()?;

            (files, result.conflicts().to_vec())
        };

        // the staging area is only replaced once every file is on disk
        let mut merged = Index::new();
        for file in files {
            if let Some(content) = file.content() {
                self.working_tree().write_file(file.path(), content)?;
            }
            merged.add(file);
        }
        *self.index_mut() = merged;

        if !conflicts.is_empty() {
            writeln!(
                self.writer(),
                "{}",
                "MERGE CONFLICT! Fix conflicts manually.".red().bold()
            )?;
            for conflict in &conflicts {
                writeln!(self.writer(), "{conflict}")?;
            }

            return Ok(MergeOutcome::Conflicted(conflicts));
        }

        let message = format!("Merge branch '{branch_name}'");
        let author = self.config().merge_author().to_string();
        let merge_id = self.write_commit(&message, &author, Some(theirs_id))?;

        writeln!(self.writer(), "Merge successful.")?;

        Ok(MergeOutcome::Merged(merge_id))
    }

    /// Snapshot carrying the file's full content, read back from its blob if trimmed
    fn hydrate(&self, file: &FileSnapshot) -> anyhow::Result<FileSnapshot> {
        if !file.is_trimmed() {
            return Ok(file.clone());
        }

        let content = self.database().blob_content(file.oid())?;
        let mut hydrated = file.clone();
        hydrated.set_content(content);

        Ok(hydrated)
    }
}
