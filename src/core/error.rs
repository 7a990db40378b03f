//! Error types for the XRF interpreter.
//!
//! Every error in XRF is fatal: the interpreter either executes a halt
//! opcode or dies with a descriptive message. There is no recovery path,
//! so the hierarchy stays flat and every variant carries enough context
//! to print a self-contained diagnostic.
//!
//! # Error Categories
//!
//! - **Load Errors**: malformed program text, detected before execution
//! - **Runtime Errors**: stack underflow and invalid jumps during execution
//! - **I/O Errors**: failures on the program file or the byte streams

use std::fmt;

/// Position of an opcode inside the chunked program, for error reporting.
///
/// A `slot` of `None` names the end-of-chunk boundary, where the jump
/// target is read rather than an opcode executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkLocation {
    /// Index of the chunk being executed.
    pub chunk: usize,
    /// Slot within the chunk (0-4), or `None` at the chunk boundary.
    pub slot: Option<usize>,
}

impl ChunkLocation {
    pub fn at_slot(chunk: usize, slot: usize) -> Self {
        Self {
            chunk,
            slot: Some(slot),
        }
    }

    pub fn at_boundary(chunk: usize) -> Self {
        Self { chunk, slot: None }
    }
}

impl fmt::Display for ChunkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(slot) => write!(f, "chunk {}, slot {}", self.chunk, slot),
            None => write!(f, "chunk {}, end of chunk", self.chunk),
        }
    }
}

/// Fatal error raised by the loader, the program store, or the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XrfError {
    // ═══════════════════════════════════════════════════════════════════
    // Load Errors
    // ═══════════════════════════════════════════════════════════════════
    /// A non-whitespace character outside `0-9A-F` in the program text.
    UnknownSymbol {
        symbol: char,
        line: usize,
        column: usize,
    },

    /// Opcode count is not a multiple of the chunk size.
    TruncatedProgram { opcode_count: usize },

    /// The program text contains no opcodes at all.
    EmptyProgram,

    // ═══════════════════════════════════════════════════════════════════
    // Runtime Errors
    // ═══════════════════════════════════════════════════════════════════
    /// An operation required more stack values than were present.
    StackUnderflow {
        operation: String,
        required: usize,
        available: usize,
        location: ChunkLocation,
    },

    /// A chunk index handed to the program store is out of range.
    ChunkOutOfRange { index: usize, chunk_count: usize },

    /// The jump target read from the stack names a nonexistent chunk.
    InvalidJump {
        target: u32,
        chunk_count: usize,
        location: ChunkLocation,
    },

    /// The host refused to provide memory for stack growth.
    Allocation { what: String },

    // ═══════════════════════════════════════════════════════════════════
    // I/O Errors
    // ═══════════════════════════════════════════════════════════════════
    /// A failure on the program file or on the input/output byte streams.
    Io {
        operation: String,
        path: Option<String>,
        message: String,
    },
}

impl fmt::Display for XrfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrfError::UnknownSymbol {
                symbol,
                line,
                column,
            } => {
                write!(
                    f,
                    "line {}, column {}: unknown symbol '{}' in program text",
                    line, column, symbol
                )
            }
            XrfError::TruncatedProgram { opcode_count } => {
                write!(
                    f,
                    "program has {} opcodes, which is not a multiple of 5",
                    opcode_count
                )
            }
            XrfError::EmptyProgram => {
                write!(f, "program contains no opcodes")
            }
            XrfError::StackUnderflow {
                operation,
                required,
                available,
                location,
            } => {
                write!(
                    f,
                    "[{}] stack underflow in {}: requires {} value{}, only {} available",
                    location,
                    operation,
                    required,
                    if *required == 1 { "" } else { "s" },
                    available
                )
            }
            XrfError::ChunkOutOfRange { index, chunk_count } => {
                write!(
                    f,
                    "chunk index {} out of range (program has {} chunks)",
                    index, chunk_count
                )
            }
            XrfError::InvalidJump {
                target,
                chunk_count,
                location,
            } => {
                write!(
                    f,
                    "[{}] cannot jump to nonexistent chunk {} (program has {} chunks)",
                    location, target, chunk_count
                )
            }
            XrfError::Allocation { what } => {
                write!(f, "unable to allocate additional space for {}", what)
            }
            XrfError::Io {
                operation,
                path,
                message,
            } => {
                if let Some(p) = path {
                    write!(f, "I/O error during {} on '{}': {}", operation, p, message)
                } else {
                    write!(f, "I/O error during {}: {}", operation, message)
                }
            }
        }
    }
}

impl std::error::Error for XrfError {}

impl XrfError {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            XrfError::UnknownSymbol { .. }
            | XrfError::TruncatedProgram { .. }
            | XrfError::EmptyProgram => ErrorCategory::Load,

            XrfError::StackUnderflow { .. }
            | XrfError::ChunkOutOfRange { .. }
            | XrfError::InvalidJump { .. }
            | XrfError::Allocation { .. } => ErrorCategory::Runtime,

            XrfError::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Get the location of a runtime error, if it has one.
    pub fn location(&self) -> Option<ChunkLocation> {
        match self {
            XrfError::StackUnderflow { location, .. }
            | XrfError::InvalidJump { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Runtime,
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Load => write!(f, "load"),
            ErrorCategory::Runtime => write!(f, "runtime"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Result type alias for XRF operations.
pub type XrfResult<T> = Result<T, XrfError>;
