//! # fsmsh-storage
//!
//! Persistence layer for fsmsh.
//!
//! This crate provides:
//! - Versioned, checksummed binary snapshots of the whole automaton
//! - The fixed human-readable configuration dump used by `PRINT`
//! - Filename conventions for snapshot artifacts

pub mod dump;
pub mod error;
pub mod snapshot;

pub use dump::{render_configuration, write_configuration};
pub use error::StorageError;
pub use snapshot::{
    is_snapshot_path, is_valid_snapshot_name, load_snapshot, save_snapshot, SNAPSHOT_MAGIC,
    SNAPSHOT_VERSION,
};
