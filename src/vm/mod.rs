//! Virtual machine for XRF chunk execution.
//!
//! The interpreter drives a fetch-execute-jump loop over the chunked
//! program: execute one chunk's five opcode slots, mark the chunk visited,
//! then read the stack's top value as the index of the next chunk. There
//! is no program counter beyond the cursor - the stack top doubles as the
//! jump target after every chunk, so control flow is fully data-dependent.
//!
//! # Layer 2 - Depends on core and program

pub mod interpreter;

// Re-export from interpreter
pub use interpreter::{ChunkFlow, Interpreter, RunConfig};
