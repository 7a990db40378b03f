//! Core types for the XRF interpreter.
//!
//! This module defines the foundation the rest of the crate builds on:
//!
//! - **Error**: the fatal-error hierarchy and `ChunkLocation` context
//! - **Stack**: the bounds-checked value stack
//!
//! # Layer 0 - No Internal Dependencies
//!
//! This module has no dependencies on other XRF modules, allowing it to be
//! imported by all other layers.

pub mod error;
pub mod stack;

// Re-export primary types at module level
pub use error::{ChunkLocation, ErrorCategory, XrfError, XrfResult};
pub use stack::Stack;
