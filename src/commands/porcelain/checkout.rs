use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Restore the head commit's files of `branch_name`, then switch to it
    ///
    /// Files are written one at a time; if a write fails, the current branch
    /// is unchanged and the files written before the failure stay on disk.
    ///
    /// # Errors
    ///
    /// `BranchNotFound` if the branch does not exist; HEAD is left unchanged.
    pub fn checkout(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let head = self
            .refs()
            .get_branch(branch_name)
            .ok_or_else(|| RepositoryError::BranchNotFound(branch_name.to_string()))?
            .head()
            .cloned();

        if let Some(head) = &head {
            self.restore_files(head)?;
        }
        self.refs_mut().checkout(branch_name)?;

        writeln!(self.writer(), "Switched to branch '{branch_name}'")?;
        if let Some(head) = head {
            writeln!(
                self.writer(),
                "Files restored from commit {}",
                head.to_short_oid()
            )?;
        }

        Ok(())
    }

    fn restore_files(&self, commit_id: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().load_commit(commit_id)?;

        for file in commit.files() {
            let content = self.database().blob_content(file.oid())?;
            self.working_tree().write_file(file.path(), &content)?;
        }

        Ok(())
    }
}
