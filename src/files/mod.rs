//! File helpers shared by the session core.
//!
//! Every helper opens, uses and closes its file within the call; no handle
//! outlives an operation.

pub mod paths;
pub mod rewrite;

pub use paths::{diff_path_for, expand_home, temp_path_for};
pub use rewrite::{append, atomic_write, truncate};
