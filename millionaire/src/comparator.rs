// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Per-bit comparison of two equal-width operands.

use crate::{boolean::BooleanBuilder, errors::CircuitError};
use itertools::izip;

/// Per-bit signals for operands `x` and `y`, bit 0 most significant.
#[derive(Clone, Debug)]
pub struct BitComparison<W> {
    /// `gt[i] = x[i] AND NOT y[i]`, one per bit.
    pub gt: Vec<W>,
    /// `eq[i] = NOT (x[i] XOR y[i])` for every bit but the least significant.
    pub eq: Vec<W>,
}

/// Compare `xs` against `ys` bit by bit.
///
/// Gates are emitted in groups: the negations of `ys`, then the `gt` ANDs,
/// then the XORs, then the `eq` negations. The least significant bit gets no
/// equality signal since no less significant bit depends on it.
pub fn compare_bits<B: BooleanBuilder>(
    b: &mut B,
    xs: &[B::Item],
    ys: &[B::Item],
) -> Result<BitComparison<B::Item>, B::Error> {
    if xs.len() != ys.len() {
        return Err(B::Error::from(CircuitError::InvalidArgNum {
            got: ys.len(),
            needed: xs.len(),
        }));
    }
    if xs.is_empty() {
        return Err(B::Error::from(CircuitError::InvalidArgNum { got: 0, needed: 1 }));
    }
    let n = xs.len();

    let not_ys = b.negate_many(ys)?;
    let gt = izip!(xs, &not_ys)
        .map(|(x, ny)| b.and(x, ny))
        .collect::<Result<Vec<_>, _>>()?;

    let diffs = izip!(&xs[..n - 1], &ys[..n - 1])
        .map(|(x, y)| b.xor(x, y))
        .collect::<Result<Vec<_>, _>>()?;
    let eq = b.negate_many(&diffs)?;

    log::trace!("compared {} bits: {} gt, {} eq", n, gt.len(), eq.len());
    Ok(BitComparison { gt, eq })
}
