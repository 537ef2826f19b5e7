// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Reading circuits back from the line-oriented gate-list format produced by
//! `Circuit::write_to`.

use crate::{
    circuit::{Circuit, Gate, Role},
    errors::CircuitParserError as Error,
    wire::WireRef,
};
use regex::{Captures, Regex};
use std::str::FromStr;

struct Patterns {
    input: Regex,
    not: Regex,
    binary: Regex,
    emit: Regex,
}

impl Patterns {
    fn new() -> Result<Self, Error> {
        Ok(Patterns {
            input: Regex::new(r"^input\s+(\S+)\s+(\d+)$")?,
            not: Regex::new(r"^not\s+(\d+)$")?,
            binary: Regex::new(r"^(and|xor)\s+(\d+)\s+(\d+)$")?,
            emit: Regex::new(r"^emit\s+(\d+)$")?,
        })
    }
}

fn cap2int(cap: &Captures, idx: usize, line: usize) -> Result<usize, Error> {
    let s = cap.get(idx).ok_or(Error::ParseIntError { line })?;
    FromStr::from_str(s.as_str()).map_err(|_| Error::ParseIntError { line })
}

fn cap2role(cap: &Captures, idx: usize, line: usize) -> Result<Role, Error> {
    let s = cap.get(idx).ok_or_else(|| Error::ParseLineError {
        line,
        text: cap[0].to_string(),
    })?;
    match s.as_str() {
        "A" => Ok(Role::A),
        "B" => Ok(Role::B),
        s => Err(Error::ParseRoleError {
            line,
            role: s.to_string(),
        }),
    }
}

/// Resolve a wire reference on line `line`, given `allocated` wires so far.
fn cap2wire(cap: &Captures, idx: usize, line: usize, allocated: usize) -> Result<WireRef, Error> {
    let wire = cap2int(cap, idx, line)?;
    if wire == 0 {
        return Err(Error::ZeroWire { line });
    }
    if wire > allocated {
        return Err(Error::ForwardReference {
            line,
            wire,
            allocated,
        });
    }
    Ok(WireRef(wire))
}

impl Circuit {
    /// Read a circuit in gate-list format. Blank lines are ignored. Every wire
    /// reference must name a wire allocated by an earlier line. All `input A`
    /// lines precede all `input B` lines, and each role's bit positions count
    /// up from 0.
    pub fn parse(reader: impl std::io::BufRead) -> Result<Self, Error> {
        let re = Patterns::new()?;
        let mut circ = Circuit::new(None);

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = lineno + 1;
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            let allocated = circ.gates.len();
            let gate = if let Some(cap) = re.input.captures(text) {
                let role = cap2role(&cap, 1, lineno)?;
                let index = cap2int(&cap, 2, lineno)?;
                if role == Role::A && !circ.b_input_refs.is_empty() {
                    return Err(Error::InputOrder { line: lineno });
                }
                let refs = match role {
                    Role::A => &mut circ.a_input_refs,
                    Role::B => &mut circ.b_input_refs,
                };
                if index != refs.len() {
                    return Err(Error::InputIndex {
                        line: lineno,
                        role,
                        index,
                        expected: refs.len(),
                    });
                }
                refs.push(WireRef(allocated + 1));
                Gate::Input { role, index }
            } else if let Some(cap) = re.not.captures(text) {
                Gate::Not {
                    xref: cap2wire(&cap, 1, lineno, allocated)?,
                }
            } else if let Some(cap) = re.binary.captures(text) {
                let xref = cap2wire(&cap, 2, lineno, allocated)?;
                let yref = cap2wire(&cap, 3, lineno, allocated)?;
                match &cap[1] {
                    "and" => Gate::And { xref, yref },
                    _ => Gate::Xor { xref, yref },
                }
            } else if let Some(cap) = re.emit.captures(text) {
                let r = cap2wire(&cap, 1, lineno, allocated)?;
                circ.output_refs.push(r);
                continue;
            } else {
                return Err(Error::ParseLineError {
                    line: lineno,
                    text: line.to_string(),
                });
            };
            circ.gates.push(gate);
        }
        log::debug!(
            "parsed circuit: {} wires, {} outputs",
            circ.nwires(),
            circ.noutputs()
        );
        Ok(circ)
    }
}

/// Parse a circuit held in a string.
pub fn parse_str(s: &str) -> Result<Circuit, Error> {
    Circuit::parse(std::io::Cursor::new(s.as_bytes()))
}
