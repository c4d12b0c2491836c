//! Workspace-level package holding the end-to-end tests of the ifacegen crates.
pub use ifacegen_core::*;
