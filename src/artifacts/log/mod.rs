//! Commit history traversal
//!
//! `RevList` walks the commit DAG depth-first from a starting commit,
//! pushing the first parent before the second and visiting shared
//! ancestors once.

pub mod rev_list;
