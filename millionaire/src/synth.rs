// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! The greater-than circuit: is party A's integer strictly larger than party B's?
//!
//! Both integers arrive as `n` input bits, bit 0 most significant, all of A's
//! bits before all of B's. A is greater exactly when some bit `i` has `A_i = 1`,
//! `B_i = 0`, and every more significant bit agrees. The circuit computes those
//! per-bit terms, then ORs them together. Both the "every more significant bit
//! agrees" prefixes and the final OR are built as balanced trees, so the depth
//! of the circuit grows with `log n`.

use crate::{
    boolean::BooleanBuilder,
    circuit::{Circuit, CircuitBuilder, Role},
    comparator::compare_bits,
    errors::CircuitError,
    reduce::{or_tree, prefix_and},
    width::BitWidth,
};
use itertools::izip;

/// Emit `A > B` for `width`-bit operands into `b`, designate it as the single
/// output, and return it.
pub fn greater_than<B: BooleanBuilder>(b: &mut B, width: BitWidth) -> Result<B::Item, B::Error> {
    let n = width.get();
    let xs = b.inputs(Role::A, n)?;
    let ys = b.inputs(Role::B, n)?;

    let cmp = compare_bits(b, &xs, &ys)?;
    // eq_prefix[i - 1]: bits 0..i of A and B agree
    let eq_prefix = prefix_and(b, &cmp.eq)?;
    debug_assert_eq!(eq_prefix.len(), n - 1);

    let mut any = Vec::with_capacity(n);
    any.push(cmp.gt[0].clone());
    for (gt, eq) in izip!(&cmp.gt[1..], &eq_prefix) {
        any.push(b.and(gt, eq)?);
    }

    let z = or_tree(b, &any)?;
    b.emit(&z)?;
    Ok(z)
}

/// Synthesize the `width`-bit greater-than circuit.
pub fn synthesize(width: BitWidth) -> Result<Circuit, CircuitError> {
    let mut b = CircuitBuilder::try_with_capacity(16 * width.get())
        .map_err(|_| CircuitError::InvalidWidth(width.to_string()))?;
    greater_than(&mut b, width)?;
    let circ = b.finish();
    log::debug!(
        "synthesized {}-bit comparator: {} wires, output {:?}",
        width,
        circ.nwires(),
        circ.outputs()
    );
    Ok(circ)
}
