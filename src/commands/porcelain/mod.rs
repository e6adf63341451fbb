//! Porcelain commands (user-facing repository operations)
//!
//! ## Commands
//!
//! - `add`: Stage file content (and `unstage` to drop it)
//! - `commit`: Record the staged files as a commit
//! - `checkout`: Switch branches and restore files
//! - `branch`: Create a branch at the current head
//! - `merge`: Three-way merge of another branch into the current one
//! - `log`: Show commit history

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod log;
pub mod merge;
