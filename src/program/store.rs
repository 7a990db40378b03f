//! The chunked program store.
//!
//! Holds the validated opcode sequence partitioned into 5-opcode chunks,
//! plus one visited flag per chunk. The store does no symbol or alignment
//! validation of its own: the `Chunk` array type makes misaligned input
//! unrepresentable, and the loader guarantees everything else before a
//! `Program` is constructed.

use super::opcode::Opcode;
use crate::core::error::{XrfError, XrfResult};

/// Number of opcode slots per chunk, the unit of jump addressing.
pub const OPCODES_PER_CHUNK: usize = 5;

/// One fixed-size instruction chunk.
pub type Chunk = [Opcode; OPCODES_PER_CHUNK];

/// The validated, chunked program plus per-chunk visited flags.
#[derive(Debug, Clone)]
pub struct Program {
    chunks: Vec<Chunk>,
    visited: Vec<bool>,
}

impl Program {
    /// Build a program from already-validated chunks. All visited flags
    /// start false.
    pub fn new(chunks: Vec<Chunk>) -> Self {
        let count = chunks.len();
        Self {
            chunks,
            visited: vec![false; count],
        }
    }

    /// Total number of chunks.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The 5 opcodes of the given chunk.
    pub fn chunk(&self, index: usize) -> XrfResult<Chunk> {
        self.check_index(index)?;
        Ok(self.chunks[index])
    }

    /// Whether the given chunk has completed a prior execution.
    pub fn is_visited(&self, index: usize) -> XrfResult<bool> {
        self.check_index(index)?;
        Ok(self.visited[index])
    }

    /// Record that the given chunk has completed an execution.
    pub fn mark_visited(&mut self, index: usize) -> XrfResult<()> {
        self.check_index(index)?;
        self.visited[index] = true;
        Ok(())
    }

    fn check_index(&self, index: usize) -> XrfResult<()> {
        if index >= self.chunks.len() {
            Err(XrfError::ChunkOutOfRange {
                index,
                chunk_count: self.chunks.len(),
            })
        } else {
            Ok(())
        }
    }
}
