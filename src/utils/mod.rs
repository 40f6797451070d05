//! Utility functions module
//!
//! Currently hosts project-root anchored path resolution used by the
//! configuration loaders and the TLS trust builder.

pub mod paths;

pub use paths::*;
