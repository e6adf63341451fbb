//! Working directory
//!
//! Checkout and merge restore files through a [`WorkingTree`]. Each file is
//! an independent write, so a failure midway leaves the files written so far
//! in place: restoration is not transactional.

use anyhow::Context;
use std::path::{Component, Path, PathBuf};

/// Destination for restored file content
pub trait WorkingTree {
    /// Write `content` to `path`, creating parent directories and
    /// overwriting any existing file
    fn write_file(&self, path: &str, content: &str) -> anyhow::Result<()>;
}

/// Working tree rooted at a directory on disk
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Resolve a repository path against the workspace root
    ///
    /// Only plain relative paths are accepted; absolute paths and `..`
    /// components would escape the workspace.
    fn resolve(&self, file_path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(file_path);

        if file_path.is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            anyhow::bail!("path escapes the workspace: {:?}", file_path);
        }

        Ok(self.path.join(relative))
    }
}

impl WorkingTree for Workspace {
    fn write_file(&self, file_path: &str, content: &str) -> anyhow::Result<()> {
        let file_path = self.resolve(file_path)?;

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }

        std::fs::write(&file_path, content)
            .with_context(|| format!("Unable to write file {}", file_path.display()))
    }
}
