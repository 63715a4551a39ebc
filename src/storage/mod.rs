//! Persistence for finished discovery runs
//!
//! The pipeline hands its finished page tree to a [`PageStore`]; the default
//! backend writes one JSON snapshot file per run. The snapshot round-trips
//! the full tree including embedded content records.

mod json_store;
mod traits;

pub use json_store::JsonFileStore;
pub use traits::{PageStore, Snapshot, StorageError, StorageResult};
