use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the content stored under `blob_id`
    ///
    /// Unknown hashes print nothing.
    pub fn cat_blob(&self, blob_id: &str) -> anyhow::Result<()> {
        let blob_id = ObjectId::try_parse(blob_id.to_string())?;
        let content = self.database().blob_content(&blob_id)?;

        write!(self.writer(), "{content}")?;

        Ok(())
    }
}
