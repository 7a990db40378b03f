// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (no internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Program (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod program;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: VM (depends on core, program)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// Re-export the primary types at the crate root
pub use crate::core::{ChunkLocation, ErrorCategory, Stack, XrfError, XrfResult};
pub use program::{load_file, parse, Chunk, Opcode, Program, OPCODES_PER_CHUNK};
pub use vm::{ChunkFlow, Interpreter, RunConfig};
