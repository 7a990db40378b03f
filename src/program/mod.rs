//! Program representation for the XRF interpreter.
//!
//! XRF program text is a stream of hexadecimal-digit opcodes grouped into
//! fixed 5-opcode chunks, the unit of jump-target addressing. This module
//! holds the opcode alphabet, the chunked program store with its per-chunk
//! visited flags, and the loader that validates raw text into a `Program`.
//!
//! # Layer 1 - Depends on core only
//!
//! The loader is the single producer of chunks: once a `Program` exists,
//! its alignment invariants hold by construction.

pub mod loader;
pub mod opcode;
pub mod store;

// Re-export primary types at module level
pub use loader::{load_file, parse};
pub use opcode::Opcode;
pub use store::{Chunk, Program, OPCODES_PER_CHUNK};
