//! Repository operations
//!
//! - `plumbing`: Direct access to stored blobs and commit file lists
//! - `porcelain`: The version-control workflow (add, commit, checkout, branch, merge, log)
//!
//! Every operation is an `impl Repository` block, so they all share the
//! repository's stores and output writer.

pub mod plumbing;
pub mod porcelain;
