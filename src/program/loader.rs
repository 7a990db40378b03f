//! Loader for XRF program text.
//!
//! Scans a raw character stream, ignoring whitespace, and validates that
//! every remaining symbol is one of the 16 opcodes and that the total
//! opcode count is a positive multiple of 5. A program that fails any of
//! these checks is refused before a store is ever constructed.

use super::opcode::Opcode;
use super::store::{Chunk, Program, OPCODES_PER_CHUNK};
use crate::core::error::{XrfError, XrfResult};
use std::fs;
use std::path::Path;

/// Validate raw program text and build the chunked program.
pub fn parse(source: &[u8]) -> XrfResult<Program> {
    let mut opcodes = Vec::with_capacity(source.len());
    let mut line = 1usize;
    let mut column = 0usize;

    for &byte in source {
        if byte == b'\n' {
            line += 1;
            column = 0;
            continue;
        }
        column += 1;
        if byte.is_ascii_whitespace() {
            continue;
        }
        let symbol = byte as char;
        match Opcode::from_symbol(symbol) {
            Some(op) => opcodes.push(op),
            None => {
                return Err(XrfError::UnknownSymbol {
                    symbol,
                    line,
                    column,
                })
            }
        }
    }

    if opcodes.is_empty() {
        return Err(XrfError::EmptyProgram);
    }
    if opcodes.len() % OPCODES_PER_CHUNK != 0 {
        return Err(XrfError::TruncatedProgram {
            opcode_count: opcodes.len(),
        });
    }

    let mut chunks: Vec<Chunk> = Vec::with_capacity(opcodes.len() / OPCODES_PER_CHUNK);
    for slots in opcodes.chunks_exact(OPCODES_PER_CHUNK) {
        chunks.push([slots[0], slots[1], slots[2], slots[3], slots[4]]);
    }
    Ok(Program::new(chunks))
}

/// Read a program file and parse its contents.
pub fn load_file<P: AsRef<Path>>(path: P) -> XrfResult<Program> {
    let path = path.as_ref();
    let source = fs::read(path).map_err(|e| XrfError::Io {
        operation: "read".to_string(),
        path: Some(path.display().to_string()),
        message: e.to_string(),
    })?;
    parse(&source)
}
