//! File actions module.
//!
//! Deletion is the only mutating action: for every duplicate set the
//! first-discovered member is kept and the rest are removed immediately.
//! There is no trash or undo; per-file failures are warnings and never
//! abort the batch.

pub mod delete;

pub use delete::{delete_redundant, remove_file, BatchDeleteResult, DeleteError, DeleteResult};
