// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! The bit width of the compared integers, the only synthesis parameter.

use crate::{circuit::Gate, errors::CircuitError};
use std::{num::NonZeroUsize, str::FromStr};

/// Widest comparison we are willing to synthesize. The circuit uses fewer
/// than 16 gates per bit, so the gate list of any accepted width fits in a
/// single allocation and every wire number is representable.
pub const MAX_WIDTH: usize = isize::MAX as usize / (16 * std::mem::size_of::<Gate>());

/// A validated bit width: a positive integer no larger than `MAX_WIDTH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitWidth(NonZeroUsize);

impl BitWidth {
    /// Validate `nbits` as a bit width.
    pub fn new(nbits: usize) -> Result<Self, CircuitError> {
        if nbits > MAX_WIDTH {
            return Err(CircuitError::InvalidWidth(nbits.to_string()));
        }
        NonZeroUsize::new(nbits)
            .map(BitWidth)
            .ok_or_else(|| CircuitError::InvalidWidth(nbits.to_string()))
    }

    /// The number of bits.
    #[inline]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for BitWidth {
    type Error = CircuitError;

    fn try_from(nbits: usize) -> Result<Self, Self::Error> {
        BitWidth::new(nbits)
    }
}

impl FromStr for BitWidth {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let nbits = s
            .trim()
            .parse::<usize>()
            .map_err(|_| CircuitError::InvalidWidth(s.to_string()))?;
        BitWidth::new(nbits)
    }
}

impl std::fmt::Display for BitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
