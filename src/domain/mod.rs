//! Domain types mirrored from the candidate API.

pub mod candidate;
pub mod datatable;
pub mod types;
