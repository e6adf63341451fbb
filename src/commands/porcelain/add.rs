use crate::areas::repository::Repository;
use crate::artifacts::objects::file_snapshot::FileSnapshot;
use std::io::Write;

impl Repository {
    /// Stage `content` under `path`, replacing an earlier staging of the same path
    pub fn add(&mut self, path: &str, content: &str) -> anyhow::Result<()> {
        self.index_mut().add(FileSnapshot::new(path, content));

        writeln!(self.writer(), "File staged: {path}")?;

        Ok(())
    }

    /// Drop `path` from the staging area
    ///
    /// Returns whether anything was staged under that path.
    pub fn unstage(&mut self, path: &str) -> anyhow::Result<bool> {
        let removed = self.index_mut().remove(path).is_some();

        if removed {
            writeln!(self.writer(), "File unstaged: {path}")?;
        }

        Ok(removed)
    }
}
