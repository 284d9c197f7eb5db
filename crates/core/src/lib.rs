//! Core types and utilities for giks
//!
//! This is the foundation crate (Layer 0) that all other giks crates depend on.
//! It provides:
//! - The shared error taxonomy
//! - The catalogue of supported git hooks
//! - Absolute path handling
//!
//! This crate has no dependencies on other giks crates.

pub mod error;
pub mod hook;
pub mod path;

pub use error::{Error, Result};
pub use hook::GitHook;
pub use path::AbsPath;
