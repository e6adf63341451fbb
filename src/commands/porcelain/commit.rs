use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Commit the staged files on the current branch
    ///
    /// # Errors
    ///
    /// `NothingToCommit` if nothing is staged.
    pub fn commit(&mut self, message: &str, author: &str) -> anyhow::Result<ObjectId> {
        if self.index().is_empty() {
            return Err(RepositoryError::NothingToCommit.into());
        }

        let commit_id = self.write_commit(message, author, None)?;

        writeln!(
            self.writer(),
            "[{} {}] {}",
            self.current_branch_name(),
            commit_id.to_short_oid(),
            message.trim().lines().next().unwrap_or_default()
        )?;

        Ok(commit_id)
    }
}
