//! Plumbing commands (low-level access to stored objects)
//!
//! ## Commands
//!
//! - `cat-blob`: Print the content stored under a blob hash
//! - `ls-files`: List the path and hash of every file in a commit

pub mod cat_blob;
pub mod ls_files;
mod write_commit;
