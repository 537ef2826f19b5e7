// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! `millionaire` synthesizes logarithmic-depth boolean circuits deciding
//! whether one party's `n`-bit integer is larger than another's, in a flat
//! gate-list format suitable for garbled-circuit and FHE evaluators.
//!
//! ```
//! use millionaire::{synthesize, BitWidth};
//!
//! let circ = synthesize(BitWidth::new(8).unwrap()).unwrap();
//! let mut out = Vec::new();
//! circ.write_to(&mut out).unwrap();
//! ```

#![deny(clippy::all)]
#![cfg_attr(feature = "nightly", deny(missing_docs))]

pub mod boolean;
pub mod circuit;
pub mod comparator;
pub mod depth_informer;
#[cfg(test)]
mod dummy;
pub mod errors;
mod parser;
pub mod reduce;
mod synth;
pub mod wire;
mod width;

pub use crate::{
    boolean::BooleanBuilder,
    circuit::{Circuit, CircuitBuilder, Gate, Role},
    errors::{CircuitError, CircuitParserError},
    parser::parse_str,
    synth::{greater_than, synthesize},
    wire::{WireAllocator, WireRef},
    width::{BitWidth, MAX_WIDTH},
};
