use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitRecord;
use colored::Colorize;
use std::io::Write;

const SEPARATOR: &str = "------------------------------------------";

/// Tree hash prefix shown by `log`
const TREE_HASH_PREFIX_LENGTH: usize = 10;

impl Repository {
    /// Print the history reachable from HEAD, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let history = self.history();

        if history.is_empty() {
            writeln!(self.writer(), "No history yet")?;
            return Ok(());
        }

        writeln!(
            self.writer(),
            "===== Commit History for '{}' =====",
            self.current_branch_name()
        )?;
        for commit in history {
            self.show_commit(commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit: &CommitRecord) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "{}", format!("Commit: {}", commit.id()).yellow())?;
        writeln!(writer, "Author: {}", commit.author())?;
        writeln!(writer, "Date:   {}", commit.readable_timestamp())?;

        let tree_hash = commit.tree_hash().as_str();
        if commit.tree_hash().is_empty() {
            writeln!(writer, "Tree:   {tree_hash}")?;
        } else {
            let prefix = &tree_hash[..TREE_HASH_PREFIX_LENGTH.min(tree_hash.len())];
            writeln!(writer, "Tree:   {prefix}...")?;
        }

        if let (Some(parent1), Some(parent2)) = (commit.parent1(), commit.parent2()) {
            writeln!(
                writer,
                "Merge:  {} {}",
                parent1.to_short_oid(),
                parent2.to_short_oid()
            )?;
        }

        writeln!(writer)?;
        for line in commit.message().lines() {
            writeln!(writer, "    {line}")?;
        }
        writeln!(writer, "{SEPARATOR}")?;

        Ok(())
    }
}
