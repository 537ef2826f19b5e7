// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Plaintext implementation of `BooleanBuilder`, used by the tests to check
//! what a synthesized circuit computes.

use crate::{boolean::BooleanBuilder, circuit::Role, errors::CircuitError};

/// Evaluates gates over `bool`, drawing inputs from two fixed bit vectors.
pub struct Dummy {
    a: Vec<bool>,
    b: Vec<bool>,
    outputs: Vec<bool>,
}

impl Dummy {
    /// Create a new Dummy with party inputs `a` and `b`.
    pub fn new(a: &[bool], b: &[bool]) -> Dummy {
        Dummy {
            a: a.to_vec(),
            b: b.to_vec(),
            outputs: Vec::new(),
        }
    }

    /// Values emitted so far.
    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }
}

impl BooleanBuilder for Dummy {
    type Item = bool;
    type Error = CircuitError;

    fn input(&mut self, role: Role, index: usize) -> Result<bool, CircuitError> {
        let bits = match role {
            Role::A => &self.a,
            Role::B => &self.b,
        };
        bits.get(index)
            .copied()
            .ok_or(CircuitError::MissingInput { role, index })
    }

    fn negate(&mut self, x: &bool) -> Result<bool, CircuitError> {
        Ok(!x)
    }

    fn and(&mut self, x: &bool, y: &bool) -> Result<bool, CircuitError> {
        Ok(*x && *y)
    }

    fn xor(&mut self, x: &bool, y: &bool) -> Result<bool, CircuitError> {
        Ok(x ^ y)
    }

    fn emit(&mut self, x: &bool) -> Result<(), CircuitError> {
        self.outputs.push(*x);
        Ok(())
    }
}

/// `x` as `nbits` bits, most significant first.
pub fn u128_to_bits(x: u128, nbits: usize) -> Vec<bool> {
    (0..nbits).rev().map(|i| (x >> i) & 1 == 1).collect()
}
