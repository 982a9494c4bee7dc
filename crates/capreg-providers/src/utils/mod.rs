//! Shared utilities for backend implementations

pub mod json_path;

pub use json_path::walk;
