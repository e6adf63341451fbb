use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// List `<hash> <path>` for every file of a commit, HEAD if none is given
    pub fn ls_files(&self, commit_id: Option<&str>) -> anyhow::Result<()> {
        let commit_id = match commit_id {
            Some(commit_id) => ObjectId::try_parse(commit_id.to_string())?,
            None => match self.refs().read_head() {
                Some(head) => head.clone(),
                None => return Ok(()),
            },
        };
        let commit = self.database().load_commit(&commit_id)?;

        for file in commit.files() {
            writeln!(self.writer(), "{} {}", file.oid(), file.path())?;
        }

        Ok(())
    }
}
