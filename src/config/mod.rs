//! Configuration management module
//!
//! This module handles layered configuration resolution from multiple
//! sources: compiled-in defaults, YAML/JSON files, per-environment file
//! variants, dotenv-style env-files and process environment variables,
//! merged in a fixed ascending-precedence order.

pub mod loader;
pub mod overlay;
pub mod resolver;
pub mod settings;

pub use resolver::{resolve, LoadPolicy, Resolver};
pub use settings::*;
