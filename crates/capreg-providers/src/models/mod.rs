//! Model finder backend
//!
//! `models.<model>.<filter>...` returns the first record of `<model>`
//! matching every filter: numeric segments compare against the primary key,
//! other segments require a truthy attribute of that name. Filters combine
//! as a conjunction.

pub mod finder;
pub mod json_source;

pub use finder::{ModelFinder, parse_filter};
pub use json_source::JsonModelSource;
