// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Errors that may be output by this library.

use crate::{circuit::Role, wire::WireRef};
use std::fmt::{self, Display, Formatter};

/// Errors that may occur while building or replaying a circuit. Apart from
/// `InvalidWidth` these are API-usage errors, such as handing a builder a wire
/// it never allocated.
#[derive(Debug)]
pub enum CircuitError {
    /// The requested bit width is not a positive, representable integer.
    InvalidWidth(String),
    /// A wire was referenced before it was allocated.
    UnallocatedWire {
        /// The offending reference.
        wire: WireRef,
        /// The next identifier the allocator would hand out.
        next: usize,
    },
    /// Invalid number of arguments.
    InvalidArgNum {
        /// Received number of arguments.
        got: usize,
        /// Expected number of arguments.
        needed: usize,
    },
    /// An input requested during replay has no value.
    MissingInput {
        /// Which party the input belongs to.
        role: Role,
        /// Bit position of the input.
        index: usize,
    },
    /// Uninitialized value encountered during replay.
    UninitializedValue(WireRef),
}

impl Display for CircuitError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CircuitError::InvalidWidth(s) => {
                write!(f, "invalid bit width '{}': expected a positive integer", s)
            }
            CircuitError::UnallocatedWire { wire, next } => write!(
                f,
                "wire {} has not been allocated (next wire is {})",
                wire, next
            ),
            CircuitError::InvalidArgNum { got, needed } => write!(
                f,
                "invalid number of arguments: needed {} but got {}",
                needed, got
            ),
            CircuitError::MissingInput { role, index } => {
                write!(f, "no value for input {} {}", role, index)
            }
            CircuitError::UninitializedValue(w) => write!(
                f,
                "uninitialized wire {} in circuit. is the circuit topologically sorted?",
                w
            ),
        }
    }
}

impl std::error::Error for CircuitError {}

/// Errors emitted by the gate-list parser.
#[derive(Debug)]
pub enum CircuitParserError {
    /// An I/O error occurred.
    IoError(std::io::Error),
    /// A regular expression parsing error occurred.
    RegexError(regex::Error),
    /// An integer on the line does not fit in a `usize`.
    ParseIntError {
        /// 1-based line number.
        line: usize,
    },
    /// A line matched no known instruction.
    ParseLineError {
        /// 1-based line number.
        line: usize,
        /// The line's text.
        text: String,
    },
    /// An `input` line named a role other than `A` or `B`.
    ParseRoleError {
        /// 1-based line number.
        line: usize,
        /// The role as written.
        role: String,
    },
    /// An `input A` line followed an `input B` line.
    InputOrder {
        /// 1-based line number.
        line: usize,
    },
    /// An `input` line skipped or repeated a bit position of its role.
    InputIndex {
        /// 1-based line number.
        line: usize,
        /// The role of the input.
        role: Role,
        /// The bit position as written.
        index: usize,
        /// The number of inputs of that role so far.
        expected: usize,
    },
    /// Wire `0` was referenced; wires are numbered from 1.
    ZeroWire {
        /// 1-based line number.
        line: usize,
    },
    /// A gate or emit referenced a wire that was not allocated yet.
    ForwardReference {
        /// 1-based line number.
        line: usize,
        /// The referenced wire.
        wire: usize,
        /// Number of wires allocated before this line.
        allocated: usize,
    },
}

impl Display for CircuitParserError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CircuitParserError::IoError(e) => write!(f, "io error: {}", e),
            CircuitParserError::RegexError(e) => write!(f, "regex error: {}", e),
            CircuitParserError::ParseIntError { line } => {
                write!(f, "line {}: unable to parse integer", line)
            }
            CircuitParserError::ParseLineError { line, text } => {
                write!(f, "line {}: unable to parse '{}'", line, text)
            }
            CircuitParserError::ParseRoleError { line, role } => {
                write!(f, "line {}: unknown input role '{}'", line, role)
            }
            CircuitParserError::InputOrder { line } => {
                write!(f, "line {}: input A after an input B", line)
            }
            CircuitParserError::InputIndex {
                line,
                role,
                index,
                expected,
            } => write!(
                f,
                "line {}: input {} {} out of order, expected index {}",
                line, role, index, expected
            ),
            CircuitParserError::ZeroWire { line } => {
                write!(f, "line {}: wires are numbered from 1", line)
            }
            CircuitParserError::ForwardReference {
                line,
                wire,
                allocated,
            } => write!(
                f,
                "line {}: wire {} referenced but only {} wires exist",
                line, wire, allocated
            ),
        }
    }
}

impl std::error::Error for CircuitParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CircuitParserError::IoError(e) => Some(e),
            CircuitParserError::RegexError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CircuitParserError {
    fn from(e: std::io::Error) -> CircuitParserError {
        CircuitParserError::IoError(e)
    }
}

impl From<regex::Error> for CircuitParserError {
    fn from(e: regex::Error) -> CircuitParserError {
        CircuitParserError::RegexError(e)
    }
}
