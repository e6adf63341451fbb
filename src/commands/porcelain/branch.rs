use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::RepositoryError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current head
    ///
    /// # Errors
    ///
    /// - `NoCommitsYet` if the current branch has no commit to branch from
    /// - `InvalidBranchName` if the name breaks ref-name rules
    /// - `BranchAlreadyExists` if the name is taken
    pub fn create_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let head = self
            .refs()
            .read_head()
            .cloned()
            .ok_or(RepositoryError::NoCommitsYet)?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.refs_mut()
            .create_branch(branch_name.clone(), Some(head))?;

        writeln!(self.writer(), "Branch created: {branch_name}")?;

        Ok(())
    }
}
