//! Repository components
//!
//! - `database`: content store for commits and blobs
//! - `index`: staging area for the next commit
//! - `refs`: branch references and HEAD
//! - `repository`: facade coordinating the components
//! - `workspace`: working directory the checked-out files are written to

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
