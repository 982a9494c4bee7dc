//! Configuration snapshot backend
//!
//! Serves `config.<key>.<key>...` from a JSON file loaded once and cached by
//! file name.

pub mod store;

pub use store::{ConfigStore, SnapshotCache};
