use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{WorkingTree, Workspace};
use crate::artifacts::branch::branch::BranchReference;
use crate::artifacts::branch::branch_name::{BranchName, DEFAULT_BRANCH};
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::CommitRecord;
use crate::artifacts::objects::file_snapshot::FileSnapshot;
use anyhow::Context;
use derive_new::new;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name reported by `current_branch_name` while no branch is checked out
pub const DETACHED: &str = "Detached";

pub const DEFAULT_MERGE_AUTHOR: &str = "MergeUser";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RepositoryConfig {
    /// Branch created and checked out when the repository starts
    default_branch: String,
    /// Author recorded on merge commits
    merge_author: String,
}

impl RepositoryConfig {
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    pub fn merge_author(&self) -> &str {
        &self.merge_author
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig::new(DEFAULT_BRANCH.to_string(), DEFAULT_MERGE_AUTHOR.to_string())
    }
}

pub struct Repository {
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    refs: Refs,
    working_tree: Box<dyn WorkingTree>,
    config: RepositoryConfig,
}

impl Repository {
    /// Open a repository whose working tree is the directory at `path`
    ///
    /// The directory is created if missing. History lives in memory only.
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Unable to create working directory {path}"))?;
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("Unable to resolve working directory {path}"))?;

        Self::with_working_tree(
            Box::new(Workspace::new(path.into_boxed_path())),
            writer,
            RepositoryConfig::default(),
        )
    }

    /// Build a repository around any working tree
    ///
    /// Starts with the configured default branch checked out and no commits.
    pub fn with_working_tree(
        working_tree: Box<dyn WorkingTree>,
        writer: Box<dyn std::io::Write>,
        config: RepositoryConfig,
    ) -> anyhow::Result<Self> {
        let default_branch = BranchName::try_parse(config.default_branch().to_string())?;

        let mut refs = Refs::new();
        refs.create_branch(default_branch.clone(), None)?;
        refs.checkout(default_branch.as_ref())?;

        Ok(Repository {
            writer: RefCell::new(writer),
            database: Database::new(),
            index: Index::new(),
            refs,
            working_tree,
            config,
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub(crate) fn database_mut(&mut self) -> &mut Database {
        &mut self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub(crate) fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn working_tree(&self) -> &dyn WorkingTree {
        &*self.working_tree
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Name of the checked-out branch, or `Detached`
    pub fn current_branch_name(&self) -> String {
        self.refs
            .current_branch()
            .map(|branch| branch.name().to_string())
            .unwrap_or_else(|| DETACHED.to_string())
    }

    pub fn head_commit(&self) -> Option<&CommitRecord> {
        self.refs
            .read_head()
            .and_then(|head| self.database.get_commit(head))
    }

    pub fn staged_files(&self) -> &[FileSnapshot] {
        self.index.entries()
    }

    /// All branches in creation order
    pub fn branches(&self) -> impl Iterator<Item = &BranchReference> {
        self.refs.list_branches()
    }

    /// Commits reachable from HEAD, newest first
    pub fn history(&self) -> Vec<&CommitRecord> {
        RevList::new(&self.database, self.refs.read_head().cloned())
            .into_iter()
            .collect()
    }
}
