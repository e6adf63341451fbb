//! Object types and hashing
//!
//! Everything the repository stores is identified by a SHA-1 hash:
//!
//! - **FileSnapshot**: a path plus its content (while staged) and content hash
//! - **Tree**: Merkle tree over a set of snapshots, summarised by a root hash
//! - **Commit**: snapshot list with metadata (author, message, parents, tree hash)

pub mod commit;
pub mod file_snapshot;
pub mod object_id;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object ID
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
