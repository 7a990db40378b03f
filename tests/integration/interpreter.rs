//! Integration tests for the execution engine.
//!
//! Component: VM (Interpreter)
//!
//! These tests verify:
//! - I/O opcodes over real byte streams (read, write, end-of-input)
//! - Stack opcodes observed through output bytes
//! - Chunk-addressed control flow with computed jump targets
//! - History-sensitive branching via the per-chunk visited flags
//! - Fatal-error conditions and their diagnostics

#![cfg(test)]

use crate::common::*;

use xrf::{ChunkLocation, XrfError};

// =============================================================================
// I/O Opcodes
// =============================================================================

mod io_opcodes {
    use super::*;

    #[test]
    fn echoes_one_input_byte() {
        // read, write, halt
        let output = run_ok("01B00", b"X");
        assert_eq!(output, b"X");
    }

    #[test]
    fn read_pushes_zero_at_end_of_input() {
        let output = run_ok("01B00", b"");
        assert_eq!(output, [0]);
    }

    #[test]
    fn halt_before_write_emits_nothing() {
        let (result, interp) = run_interpreter("B1111", b"");
        result.unwrap();
        assert!(interp.output.is_empty());
        assert_eq!(interp.opcodes_executed, 1);
    }
}

// =============================================================================
// Stack Opcodes (observed through output bytes)
// =============================================================================

mod stack_opcodes {
    use super::*;

    #[test]
    fn swap_exchanges_top_two() {
        // read 'A', read 'B', swap, write, halt: 'A' comes back first
        let output = run_ok("0041B", b"AB");
        assert_eq!(output, b"A");
    }

    #[test]
    fn send_to_bottom_moves_top_under_the_stack() {
        // read 1, read 3, send-to-bottom, write, halt: the 1 is now on top
        let output = run_ok("0091B", &[1, 3]);
        assert_eq!(output, [1]);
    }

    #[test]
    fn add_collapses_two_values() {
        let output = run_ok("0071B", &[2, 3]);
        assert_eq!(output, [5]);
    }

    #[test]
    fn absdiff_is_symmetric_difference() {
        let output = run_ok("00E1B", &[10, 4]);
        assert_eq!(output, [6]);

        let output = run_ok("00E1B", &[4, 10]);
        assert_eq!(output, [6]);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        // read 0 (end of input), dec, dup, write, halt
        let output = run_ok("0631B", b"");
        assert_eq!(output, [0]);
    }
}

// =============================================================================
// Control Flow
// =============================================================================

mod control_flow {
    use super::*;

    #[test]
    fn jump_target_selects_next_chunk() {
        // Chunk 0 reads 'A' and computes target 1 from read zeros; chunk 1
        // drops the scaffolding, writes the byte back, and halts.
        let output = run_ok("0053F221B0", b"A");
        assert_eq!(output, b"A");
    }

    #[test]
    fn computed_jump_to_last_chunk_succeeds() {
        // Chunk 0 computes target 2 with two increments; the middle chunk
        // is never dispatched.
        let (result, interp) = run_interpreter("0055FF0000B0000", b"");
        result.unwrap();
        assert_eq!(interp.chunks_dispatched, 2);
        assert!(!interp.program.is_visited(1).unwrap());
    }

    #[test]
    fn jump_to_chunk_count_is_fatal() {
        // Same arithmetic, but the program only has 2 chunks.
        let (err, _) = run_err("0055FB0000", b"");
        assert_eq!(
            err,
            XrfError::InvalidJump {
                target: 2,
                chunk_count: 2,
                location: ChunkLocation::at_boundary(0),
            }
        );
        assert!(err.to_string().contains("cannot jump to nonexistent chunk 2"));
    }

    #[test]
    fn empty_stack_at_chunk_boundary_is_fatal() {
        let (err, _) = run_err("FFFFF", b"");
        assert!(matches!(
            err,
            XrfError::StackUnderflow { ref operation, .. } if operation == "chunk jump"
        ));
    }

    #[test]
    fn return_ends_chunk_without_error() {
        // Chunk 0: push 0, inc to 1, return; the drop and write slots never
        // run, so there is no output and no underflow.
        let output = run_ok("05A21B0000", b"");
        assert!(output.is_empty());
    }
}

// =============================================================================
// Visited Flags and History-Sensitive Branching
// =============================================================================

mod visited_branching {
    use super::*;

    /// Three chunks: chunk 1 runs twice and writes a different byte on each
    /// visit, driven by the skip-if-first-visit opcode; chunk 2 routes back
    /// once and halts on its own revisit.
    const TWO_PASS_LOOP: &str = "053FF 38515 8B6FF";

    #[test]
    fn first_and_second_visit_take_different_branches() {
        let output = run_ok(TWO_PASS_LOOP, b"");
        assert_eq!(output, [1, 2]);
    }

    #[test]
    fn loop_dispatch_and_flag_bookkeeping() {
        let (result, interp) = run_interpreter(TWO_PASS_LOOP, b"");
        result.unwrap();

        // chunk 0 once, chunks 1 and 2 twice each
        assert_eq!(interp.chunks_dispatched, 5);
        assert!(interp.program.is_visited(0).unwrap());
        assert!(interp.program.is_visited(1).unwrap());
        assert!(interp.program.is_visited(2).unwrap());
    }

    #[test]
    fn early_return_still_marks_the_chunk_visited() {
        // Chunk 0 returns early on its first visit; the revisit skips the
        // return and routes to the halt chunk. If the flag were not raised
        // by the early return, this program would never leave chunk 0.
        let (result, interp) = run_interpreter("0CA5FB0000", b"");
        result.unwrap();
        assert_eq!(interp.chunks_dispatched, 3);
        assert!(interp.program.is_visited(0).unwrap());
    }

    #[test]
    fn halt_does_not_mark_the_chunk_visited() {
        let (result, interp) = run_interpreter("05A21B0000", b"");
        result.unwrap();
        assert!(interp.program.is_visited(0).unwrap());
        assert!(!interp.program.is_visited(1).unwrap());
    }
}

// =============================================================================
// Fatal Errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn write_on_empty_stack() {
        let (err, output) = run_err("10000", b"");
        assert!(output.is_empty());
        match err {
            XrfError::StackUnderflow {
                operation,
                required,
                available,
                location,
            } => {
                assert_eq!(operation, "write");
                assert_eq!(required, 1);
                assert_eq!(available, 0);
                assert_eq!(location, ChunkLocation::at_slot(0, 0));
            }
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
    }

    #[test]
    fn add_with_one_value_reports_both_counts() {
        let (err, _) = run_err("07000", b"\x09");
        match err {
            XrfError::StackUnderflow {
                operation,
                required,
                available,
                ..
            } => {
                assert_eq!(operation, "add");
                assert_eq!(required, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
    }

    #[test]
    fn send_to_bottom_on_empty_stack_is_fatal() {
        let (err, _) = run_err("90000", b"");
        assert!(matches!(
            err,
            XrfError::StackUnderflow { ref operation, .. } if operation == "send to bottom"
        ));
    }

    #[test]
    fn output_before_the_failure_is_kept() {
        // read 'Q', dup, write, write, write: the third write underflows
        // after two bytes have already been emitted.
        let (err, output) = run_err("03111", b"Q");
        assert_eq!(output, b"QQ");
        assert!(matches!(err, XrfError::StackUnderflow { .. }));
    }
}

// =============================================================================
// Shuffle
// =============================================================================

mod shuffle {
    use super::*;

    #[test]
    fn shuffle_preserves_the_value_multiset() {
        // read three bytes, shuffle, halt
        let (result, interp) = run_seeded("000DB", &[5, 6, 7], 99);
        result.unwrap();

        let mut values = interp.stack.as_slice().to_vec();
        values.sort_unstable();
        assert_eq!(values, vec![5, 6, 7]);
    }

    #[test]
    fn shuffle_on_empty_stack_is_a_noop() {
        // shuffle on an empty stack, then read and halt so the boundary
        // check never fires
        let (result, interp) = run_seeded("D0B00", b"", 3);
        result.unwrap();
        assert_eq!(interp.stack.as_slice(), &[0]);
    }

    #[test]
    fn same_seed_gives_the_same_order() {
        let order = |seed: u64| {
            let (result, interp) = run_seeded("000DB", &[1, 2, 3], seed);
            result.unwrap();
            interp.stack.as_slice().to_vec()
        };

        assert_eq!(order(1234), order(1234));
    }
}
