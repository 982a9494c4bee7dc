//! Application ports
//!
//! Registration slices through which provider crates make backends and
//! loadable modules discoverable.

pub mod registry;
