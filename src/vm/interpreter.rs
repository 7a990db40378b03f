//! The XRF execution engine.
//!
//! Owns the value stack, the program store, and the byte streams; dispatches
//! one chunk at a time. A chunk's visited flag is captured once at entry and
//! drives the `8`/`C` conditional skips for the whole chunk, even though the
//! flag itself is only raised after the chunk completes.
//!
//! # Termination
//!
//! Only the halt opcode ends a run successfully. Every other exit is an
//! `XrfError` propagated out of `run`; the caller decides the process exit.

use crate::core::error::{ChunkLocation, XrfError, XrfResult};
use crate::core::stack::Stack;
use crate::program::opcode::Opcode;
use crate::program::store::{Chunk, Program, OPCODES_PER_CHUNK};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Read, Write};

/// Configuration for one interpreter run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Seed for the shuffle RNG, fixed once at startup.
    pub seed: u64,
    /// Trace chunk dispatch on stderr.
    pub trace: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            trace: false,
        }
    }
}

/// How a single chunk execution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkFlow {
    /// All slots exhausted, or an early return; end-of-chunk logic applies.
    Completed,
    /// A halt opcode fired; the whole run is over.
    Halted,
}

/// The XRF interpreter: program store, value stack, and byte streams.
pub struct Interpreter<R, W> {
    /// The chunked program and its visited flags.
    pub program: Program,
    /// The value stack, sole jump-target oracle.
    pub stack: Stack,
    /// Chunks dispatched so far, the halting chunk included.
    pub chunks_dispatched: u64,
    /// Opcode slots actually executed (skipped slots excluded).
    pub opcodes_executed: u64,
    /// Input byte stream for the read opcode.
    pub input: R,
    /// Output byte stream for the write opcode.
    pub output: W,
    rng: StdRng,
    trace: bool,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Create an interpreter over a loaded program and a pair of byte
    /// streams. The stack starts empty and the cursor at chunk 0.
    pub fn new(program: Program, config: RunConfig, input: R, output: W) -> Self {
        Self {
            program,
            stack: Stack::new(),
            chunks_dispatched: 0,
            opcodes_executed: 0,
            input,
            output,
            rng: StdRng::seed_from_u64(config.seed),
            trace: config.trace,
        }
    }

    /// Drive the fetch-execute-jump loop until a halt opcode or a fatal
    /// error. Output is flushed on every exit path.
    pub fn run(&mut self) -> XrfResult<()> {
        match self.run_loop() {
            Ok(()) => self.output.flush().map_err(|e| XrfError::Io {
                operation: "flush".to_string(),
                path: None,
                message: e.to_string(),
            }),
            Err(err) => {
                let _ = self.output.flush();
                Err(err)
            }
        }
    }

    fn run_loop(&mut self) -> XrfResult<()> {
        let mut cursor = 0usize;

        loop {
            let visited = self.program.is_visited(cursor)?;
            let chunk = self.program.chunk(cursor)?;
            if self.trace {
                eprintln!(
                    "chunk {:>4}  visited={}  depth={}",
                    cursor,
                    visited,
                    self.stack.depth()
                );
            }
            self.chunks_dispatched += 1;

            match self.execute_chunk(cursor, chunk, visited)? {
                ChunkFlow::Halted => {
                    if self.trace {
                        eprintln!(
                            "halted after {} chunks ({} opcodes)",
                            self.chunks_dispatched, self.opcodes_executed
                        );
                    }
                    return Ok(());
                }
                ChunkFlow::Completed => {}
            }

            self.program.mark_visited(cursor)?;

            // The stack top doubles as the jump target; it is read, not
            // popped, so the target value survives into the next chunk.
            let boundary = ChunkLocation::at_boundary(cursor);
            let target = self.stack.peek("chunk jump", boundary)?;
            if target as usize >= self.program.chunk_count() {
                return Err(XrfError::InvalidJump {
                    target,
                    chunk_count: self.program.chunk_count(),
                    location: boundary,
                });
            }
            cursor = target as usize;
        }
    }

    /// Execute the five slots of one chunk.
    ///
    /// `visited` is the flag captured at chunk entry; the skip opcodes
    /// consult it, never the live flag.
    fn execute_chunk(&mut self, index: usize, chunk: Chunk, visited: bool) -> XrfResult<ChunkFlow> {
        let mut slot = 0;
        while slot < OPCODES_PER_CHUNK {
            let op = chunk[slot];
            let location = ChunkLocation::at_slot(index, slot);
            self.opcodes_executed += 1;

            match op {
                Opcode::Read => {
                    let value = self.read_byte()?.map(u32::from).unwrap_or(0);
                    self.stack.push(value)?;
                }
                Opcode::Write => {
                    let value = self.stack.pop(op.name(), location)?;
                    self.write_byte(value as u8)?;
                }
                Opcode::Drop => {
                    self.stack.pop(op.name(), location)?;
                }
                Opcode::Dup => self.stack.dup(location)?,
                Opcode::Swap => self.stack.swap(location)?,
                Opcode::Inc => {
                    let top = self.stack.peek_mut(op.name(), location)?;
                    *top = top.wrapping_add(1);
                }
                Opcode::Dec => {
                    let top = self.stack.peek_mut(op.name(), location)?;
                    *top = top.saturating_sub(1);
                }
                Opcode::Add => {
                    self.stack.require(2, op.name(), location)?;
                    let addend = self.stack.pop(op.name(), location)?;
                    let top = self.stack.peek_mut(op.name(), location)?;
                    *top = top.wrapping_add(addend);
                }
                Opcode::SkipIfFirstVisit => {
                    if !visited {
                        slot += 1;
                    }
                }
                Opcode::SendToBottom => self.stack.send_to_bottom(location)?,
                Opcode::Return => return Ok(ChunkFlow::Completed),
                Opcode::Halt => return Ok(ChunkFlow::Halted),
                Opcode::SkipIfRevisit => {
                    if visited {
                        slot += 1;
                    }
                }
                Opcode::Shuffle => self.stack.shuffle(&mut self.rng),
                Opcode::AbsDiff => {
                    self.stack.require(2, op.name(), location)?;
                    let popped = self.stack.pop(op.name(), location)?;
                    let top = self.stack.peek_mut(op.name(), location)?;
                    *top = popped.abs_diff(*top);
                }
                Opcode::Nop => {}
            }
            slot += 1;
        }
        Ok(ChunkFlow::Completed)
    }

    /// Read one byte from the input stream; `None` at end of input.
    fn read_byte(&mut self) -> XrfResult<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(XrfError::Io {
                        operation: "read".to_string(),
                        path: None,
                        message: e.to_string(),
                    })
                }
            }
        }
    }

    fn write_byte(&mut self, byte: u8) -> XrfResult<()> {
        self.output.write_all(&[byte]).map_err(|e| XrfError::Io {
            operation: "write".to_string(),
            path: None,
            message: e.to_string(),
        })
    }
}
