//! Stack type for the XRF interpreter.
//!
//! The stack is the sole runtime value store and, through its top value,
//! also the jump-target oracle for chunk dispatch. Every operation that
//! needs elements is underflow-checked and reports the opcode name and
//! chunk location of the violation.

use super::error::{ChunkLocation, XrfError, XrfResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// A bounds-checked LIFO stack of unsigned 32-bit values.
#[derive(Clone, Default)]
pub struct Stack {
    values: Vec<u32>,
}

impl Stack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Get the current depth of the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Check if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Push a value onto the stack.
    ///
    /// Growth is reserved up front so that an out-of-memory host shows up
    /// as an `Allocation` error instead of an abort.
    pub fn push(&mut self, value: u32) -> XrfResult<()> {
        self.values
            .try_reserve(1)
            .map_err(|_| XrfError::Allocation {
                what: "stack space".to_string(),
            })?;
        self.values.push(value);
        Ok(())
    }

    /// Pop a value with underflow checking.
    pub fn pop(&mut self, operation: &str, location: ChunkLocation) -> XrfResult<u32> {
        self.values.pop().ok_or_else(|| XrfError::StackUnderflow {
            operation: operation.to_string(),
            required: 1,
            available: 0,
            location,
        })
    }

    /// Peek at the top value with underflow checking.
    pub fn peek(&self, operation: &str, location: ChunkLocation) -> XrfResult<u32> {
        self.values
            .last()
            .copied()
            .ok_or_else(|| XrfError::StackUnderflow {
                operation: operation.to_string(),
                required: 1,
                available: 0,
                location,
            })
    }

    /// Mutable access to the top value with underflow checking.
    pub fn peek_mut(&mut self, operation: &str, location: ChunkLocation) -> XrfResult<&mut u32> {
        self.values
            .last_mut()
            .ok_or_else(|| XrfError::StackUnderflow {
                operation: operation.to_string(),
                required: 1,
                available: 0,
                location,
            })
    }

    /// Ensure at least n elements are on the stack.
    pub fn require(&self, n: usize, operation: &str, location: ChunkLocation) -> XrfResult<()> {
        if self.values.len() < n {
            Err(XrfError::StackUnderflow {
                operation: operation.to_string(),
                required: n,
                available: self.values.len(),
                location,
            })
        } else {
            Ok(())
        }
    }

    /// Duplicate the top value.
    pub fn dup(&mut self, location: ChunkLocation) -> XrfResult<()> {
        let top = self.peek("duplicate", location)?;
        self.push(top)
    }

    /// Exchange the top two values in place.
    pub fn swap(&mut self, location: ChunkLocation) -> XrfResult<()> {
        self.require(2, "swap", location)?;
        let len = self.values.len();
        self.values.swap(len - 1, len - 2);
        Ok(())
    }

    /// Move the top value to the bottom of the stack, preserving the
    /// relative order of everything else. No-op on a single element.
    ///
    /// O(n): the backing vector shifts every element down one slot.
    pub fn send_to_bottom(&mut self, location: ChunkLocation) -> XrfResult<()> {
        let top = self.pop("send to bottom", location)?;
        self.values.insert(0, top);
        Ok(())
    }

    /// Uniformly permute the stack contents in place.
    ///
    /// No-op on 0 or 1 elements.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.values.shuffle(rng);
    }

    /// Get a reference to the underlying values, bottom first.
    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack{:?}", self.values)
    }
}
