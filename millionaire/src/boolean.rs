// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! The `BooleanBuilder` trait represents the computations a gate list can
//! express: party inputs, NOT, AND, XOR, and output designation.
//!
//! The synthesis code is written against this trait, so the same comparator
//! can be emitted as a gate list, measured, or checked in plaintext.

use crate::{circuit::Role, errors::CircuitError};

/// DSL providing the boolean operations of the gate-list format.
pub trait BooleanBuilder {
    /// The value flowing along a wire.
    type Item: Clone;
    /// Errors which may be thrown by the builder.
    type Error: From<CircuitError>;

    /// Input bit `index` of party `role`.
    fn input(&mut self, role: Role, index: usize) -> Result<Self::Item, Self::Error>;

    /// Binary Not
    fn negate(&mut self, x: &Self::Item) -> Result<Self::Item, Self::Error>;

    /// Binary And
    fn and(&mut self, x: &Self::Item, y: &Self::Item) -> Result<Self::Item, Self::Error>;

    /// Binary Xor
    fn xor(&mut self, x: &Self::Item, y: &Self::Item) -> Result<Self::Item, Self::Error>;

    /// Designate `x` as an external output.
    fn emit(&mut self, x: &Self::Item) -> Result<(), Self::Error>;

    /// Inputs `0..nbits` of party `role`, in ascending index order.
    fn inputs(&mut self, role: Role, nbits: usize) -> Result<Vec<Self::Item>, Self::Error> {
        (0..nbits).map(|i| self.input(role, i)).collect()
    }

    /// Negate every wire in `xs`.
    fn negate_many(&mut self, xs: &[Self::Item]) -> Result<Vec<Self::Item>, Self::Error> {
        xs.iter().map(|x| self.negate(x)).collect()
    }
}
