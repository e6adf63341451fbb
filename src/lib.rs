//! A small in-memory version-control engine
//!
//! Content-addressed blob storage, Merkle tree hashing of staged files, a
//! commit DAG with branch references, and three-way merging with conflict
//! detection.
//!
//! - `areas`: the stores a repository is made of (content store, staging
//!   area, branch references, working tree) and the `Repository` facade
//! - `artifacts`: data types and graph algorithms (objects, branches,
//!   history traversal, merge base search, three-way merge)
//! - `commands`: repository operations (add, commit, checkout, branch,
//!   merge, log, plus plumbing helpers)
//! - `errors`: structural error kinds

/// Debug logging for the merge algorithms, compiled in with the `debug_merge` feature
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Processing commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

#[cfg(test)]
pub(crate) mod test_support;
