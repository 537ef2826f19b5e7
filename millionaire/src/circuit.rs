// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Static gate-list circuits and the builder that emits them.
//!
//! A circuit is written out one line per gate:
//!
//! ```text
//! input A 0
//! input B 0
//! not 2
//! and 1 3
//! emit 4
//! ```
//!
//! Every line except `emit` allocates the next wire, so wire `k` is the `k`th
//! allocating line.

use crate::{
    boolean::BooleanBuilder,
    depth_informer::DepthInformer,
    errors::CircuitError,
    wire::{WireAllocator, WireRef},
};
use std::{collections::TryReserveError, io::Write};

/// One of the two parties supplying an integer to compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Owner of the left operand.
    A,
    /// Owner of the right operand.
    B,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Role::A => write!(f, "A"),
            Role::B => write!(f, "B"),
        }
    }
}

/// The gates of the gate-list format. Each produces exactly one wire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gate {
    /// Input bit `index` of party `role`, most significant bit at index 0.
    Input {
        /// Party supplying the bit.
        role: Role,
        /// Bit position within that party's integer.
        index: usize,
    },
    /// Negation of `xref`.
    Not {
        /// Operand.
        xref: WireRef,
    },
    /// Conjunction of `xref` and `yref`.
    And {
        /// Left operand.
        xref: WireRef,
        /// Right operand.
        yref: WireRef,
    },
    /// Exclusive or of `xref` and `yref`.
    Xor {
        /// Left operand.
        xref: WireRef,
        /// Right operand.
        yref: WireRef,
    },
}

impl Gate {
    /// Wires consumed by this gate.
    pub fn operands(&self) -> impl Iterator<Item = WireRef> {
        let (x, y) = match *self {
            Gate::Input { .. } => (None, None),
            Gate::Not { xref } => (Some(xref), None),
            Gate::And { xref, yref } | Gate::Xor { xref, yref } => (Some(xref), Some(yref)),
        };
        x.into_iter().chain(y)
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Gate::Input { role, index } => write!(f, "input {} {}", role, index),
            Gate::Not { xref } => write!(f, "not {}", xref),
            Gate::And { xref, yref } => write!(f, "and {} {}", xref, yref),
            Gate::Xor { xref, yref } => write!(f, "xor {} {}", xref, yref),
        }
    }
}

/// Static representation of a boolean circuit as an ordered gate list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circuit {
    pub(crate) gates: Vec<Gate>,
    pub(crate) a_input_refs: Vec<WireRef>,
    pub(crate) b_input_refs: Vec<WireRef>,
    pub(crate) output_refs: Vec<WireRef>,
}

impl Circuit {
    /// Make a new, empty `Circuit` with room for `ngates` gates.
    pub fn new(ngates: Option<usize>) -> Circuit {
        Circuit {
            gates: Vec::with_capacity(ngates.unwrap_or(0)),
            a_input_refs: Vec::new(),
            b_input_refs: Vec::new(),
            output_refs: Vec::new(),
        }
    }

    /// The gates in emission order. The gate at position `i` produces wire `i + 1`.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// The gate producing wire `w`.
    #[inline]
    pub fn gate(&self, w: WireRef) -> Option<&Gate> {
        w.id().checked_sub(1).and_then(|ix| self.gates.get(ix))
    }

    /// Return the number of allocated wires.
    #[inline]
    pub fn nwires(&self) -> usize {
        self.gates.len()
    }

    /// Wires carrying party A's bits.
    #[inline]
    pub fn a_inputs(&self) -> &[WireRef] {
        &self.a_input_refs
    }

    /// Wires carrying party B's bits.
    #[inline]
    pub fn b_inputs(&self) -> &[WireRef] {
        &self.b_input_refs
    }

    /// Wires designated as outputs, in emission order.
    #[inline]
    pub fn outputs(&self) -> &[WireRef] {
        &self.output_refs
    }

    /// Return the number of outputs.
    #[inline]
    pub fn noutputs(&self) -> usize {
        self.output_refs.len()
    }

    /// Replay the circuit through `b`, feeding it every gate in order, and
    /// return the items of the output wires.
    pub fn eval<B: BooleanBuilder>(&self, b: &mut B) -> Result<Vec<B::Item>, B::Error> {
        let mut cache: Vec<B::Item> = Vec::with_capacity(self.gates.len());
        for gate in self.gates.iter() {
            let val = match *gate {
                Gate::Input { role, index } => b.input(role, index)?,
                Gate::Not { xref } => b.negate(lookup::<B>(&cache, xref)?)?,
                Gate::And { xref, yref } => {
                    b.and(lookup::<B>(&cache, xref)?, lookup::<B>(&cache, yref)?)?
                }
                Gate::Xor { xref, yref } => {
                    b.xor(lookup::<B>(&cache, xref)?, lookup::<B>(&cache, yref)?)?
                }
            };
            cache.push(val);
        }
        let mut outputs = Vec::with_capacity(self.output_refs.len());
        for r in self.output_refs.iter() {
            let x = lookup::<B>(&cache, *r)?.clone();
            b.emit(&x)?;
            outputs.push(x);
        }
        Ok(outputs)
    }

    /// Gate counts and depth of this circuit.
    pub fn info(&self) -> Result<DepthInformer, CircuitError> {
        let mut informer = DepthInformer::new();
        self.eval(&mut informer)?;
        Ok(informer)
    }

    /// Write the circuit in gate-list format. Output designations follow all gates.
    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        write!(w, "{}", self)?;
        w.flush()
    }

    /// Evaluate the circuit in plaintext on `a` and `b`, most significant bit first.
    #[cfg(test)]
    pub(crate) fn eval_plain(&self, a: &[bool], b: &[bool]) -> Result<Vec<bool>, CircuitError> {
        let mut dummy = crate::dummy::Dummy::new(a, b);
        self.eval(&mut dummy)
    }
}

fn lookup<B: BooleanBuilder>(
    cache: &[B::Item],
    w: WireRef,
) -> Result<&B::Item, B::Error> {
    w.id()
        .checked_sub(1)
        .and_then(|ix| cache.get(ix))
        .ok_or_else(|| B::Error::from(CircuitError::UninitializedValue(w)))
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for gate in self.gates.iter() {
            writeln!(f, "{}", gate)?;
        }
        for r in self.output_refs.iter() {
            writeln!(f, "emit {}", r)?;
        }
        Ok(())
    }
}

/// CircuitBuilder is used to build circuits.
#[derive(Debug)]
pub struct CircuitBuilder {
    wires: WireAllocator,
    circ: Circuit,
}

impl CircuitBuilder {
    /// Make a new `CircuitBuilder`.
    pub fn new() -> Self {
        CircuitBuilder {
            wires: WireAllocator::new(),
            circ: Circuit::new(None),
        }
    }

    /// Make a new `CircuitBuilder` with room for `ngates` gates, failing
    /// rather than aborting when that much memory cannot be reserved.
    pub fn try_with_capacity(ngates: usize) -> Result<Self, TryReserveError> {
        let mut circ = Circuit::new(None);
        circ.gates.try_reserve_exact(ngates)?;
        Ok(CircuitBuilder {
            wires: WireAllocator::new(),
            circ,
        })
    }

    /// Finish circuit building, outputting the resulting circuit.
    pub fn finish(self) -> Circuit {
        self.circ
    }

    /// Number of wires allocated so far.
    #[inline]
    pub fn nwires(&self) -> usize {
        self.wires.count()
    }

    fn check(&self, w: &WireRef) -> Result<(), CircuitError> {
        if self.wires.is_allocated(*w) {
            Ok(())
        } else {
            Err(CircuitError::UnallocatedWire {
                wire: *w,
                next: self.wires.peek(),
            })
        }
    }

    fn gate(&mut self, gate: Gate) -> WireRef {
        self.circ.gates.push(gate);
        let w = self.wires.allocate();
        debug_assert_eq!(w.id(), self.circ.gates.len());
        w
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BooleanBuilder for CircuitBuilder {
    type Item = WireRef;
    type Error = CircuitError;

    fn input(&mut self, role: Role, index: usize) -> Result<WireRef, Self::Error> {
        let r = self.gate(Gate::Input { role, index });
        match role {
            Role::A => self.circ.a_input_refs.push(r),
            Role::B => self.circ.b_input_refs.push(r),
        }
        Ok(r)
    }

    fn negate(&mut self, xref: &WireRef) -> Result<WireRef, Self::Error> {
        self.check(xref)?;
        Ok(self.gate(Gate::Not { xref: *xref }))
    }

    fn and(&mut self, xref: &WireRef, yref: &WireRef) -> Result<WireRef, Self::Error> {
        self.check(xref)?;
        self.check(yref)?;
        Ok(self.gate(Gate::And {
            xref: *xref,
            yref: *yref,
        }))
    }

    fn xor(&mut self, xref: &WireRef, yref: &WireRef) -> Result<WireRef, Self::Error> {
        self.check(xref)?;
        self.check(yref)?;
        Ok(self.gate(Gate::Xor {
            xref: *xref,
            yref: *yref,
        }))
    }

    fn emit(&mut self, xref: &WireRef) -> Result<(), Self::Error> {
        self.check(xref)?;
        self.circ.output_refs.push(*xref);
        Ok(())
    }
}
