use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::MerkleTree;
use crate::errors::RepositoryError;

impl Repository {
    /// Record the staging area as a commit on the current branch
    ///
    /// Adds the commit, then stores the staged contents as blobs, advances
    /// HEAD to the new commit and clears the staging area. `merge_parent` is
    /// set for merge commits.
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        author: &str,
        merge_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if self.refs().current_branch().is_none() {
            return Err(RepositoryError::DetachedHead.into());
        }

        let staged = self.index().entries().to_vec();
        let tree_hash = MerkleTree::hash(&staged);

        let commit = CommitRecord::new(
            message.to_string(),
            author.to_string(),
            chrono::Local::now().into(),
            tree_hash,
            &staged,
            self.refs().read_head().cloned(),
            merge_parent,
        );
        let commit_id = self.database_mut().add_commit(commit)?.id().clone();

        for file in &staged {
            if let Some(content) = file.content() {
                self.database_mut().put_blob(file.oid(), content)?;
            }
        }

        self.refs_mut().update_head(commit_id.clone())?;
        self.index_mut().clear();

        Ok(commit_id)
    }
}
