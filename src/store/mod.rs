//! Crash-safe persistence for training state.
//!
//! One state root directory owns four files: the configuration, the
//! dataset, the persisted model and the append-only event log. The model
//! file is only ever replaced wholesale through an atomic
//! write-temp-then-rename sequence, so a reader observes either the old
//! content in full or the new content in full, never a mix.
//!
//! The layer assumes a single writer process per state root. No locking is
//! implemented; concurrent writers to the same root produce undefined
//! interleavings.

pub mod disk;
pub mod model;
pub mod state;

use thiserror::Error;

/// Errors raised by the persistence layer.
///
/// `Io` is fatal to the calling operation and leaves prior on-disk state
/// intact: a failed save means "state unchanged", never "state possibly
/// half-written". `Corrupt` aborts loading; a malformed persisted model is
/// not auto-repaired.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt model state: {0}")]
    Corrupt(String),
}
