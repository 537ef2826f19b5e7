// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Logarithmic-depth reductions: prefix ANDs by binary lifting, and balanced
//! AND/OR trees.
//!
//! Prefix ANDs are assembled from a [`Layers`] arena. Layer `k` holds the AND
//! of every aligned block of `2^k` consecutive inputs; block `(k, j)` covers
//! inputs `j * 2^k .. (j + 1) * 2^k`. A prefix of length `len` splits into the
//! prefix of length `len - 2^v` and the block of size `2^v` ending at `len`,
//! where `v` is the number of trailing zeros of `len`.

use crate::{boolean::BooleanBuilder, errors::CircuitError};
use std::ops::Index;

/// Position of a block in a [`Layers`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// The block covers `2^layer` inputs.
    pub layer: usize,
    /// Index of the block within its layer.
    pub position: usize,
}

impl BlockRef {
    /// Number of inputs covered.
    #[inline]
    pub fn size(&self) -> usize {
        1 << self.layer
    }

    /// First input covered.
    #[inline]
    pub fn start(&self) -> usize {
        self.position << self.layer
    }

    /// One past the last input covered.
    #[inline]
    pub fn end(&self) -> usize {
        self.start() + self.size()
    }
}

/// Split a prefix of length `len` into a shorter prefix and the last block.
///
/// Returns `(rest, block)` where `rest = len - 2^v`, `v = len.trailing_zeros()`
/// and `block` covers `rest .. len`. A `rest` of zero means the block is the
/// whole prefix.
///
/// # Panics
///
/// Panics if `len == 0`.
pub fn split_prefix(len: usize) -> (usize, BlockRef) {
    assert!(len > 0, "the empty prefix has no blocks");
    let layer = len.trailing_zeros() as usize;
    let rest = len - (1 << layer);
    (
        rest,
        BlockRef {
            layer,
            position: rest >> layer,
        },
    )
}

/// The minimal set of blocks whose concatenation is the prefix `0 .. len`,
/// largest first. There is one block per set bit of `len`.
pub fn decompose_prefix(len: usize) -> Vec<BlockRef> {
    let mut blocks = Vec::with_capacity(len.count_ones() as usize);
    let mut len = len;
    while len > 0 {
        let (rest, block) = split_prefix(len);
        blocks.push(block);
        len = rest;
    }
    blocks.reverse();
    blocks
}

/// Arena of pairwise AND reductions, indexed by [`BlockRef`].
#[derive(Clone, Debug)]
pub struct Layers<W> {
    rows: Vec<Vec<W>>,
}

impl<W: Clone> Layers<W> {
    /// Build all layers over `xs`. Layer `k + 1` ANDs adjacent pairs of layer
    /// `k`; a trailing unpaired element is not carried up, since no aligned
    /// block contains it. Building stops at the first layer with fewer than two
    /// elements.
    pub fn build<B: BooleanBuilder<Item = W>>(b: &mut B, xs: &[W]) -> Result<Self, B::Error> {
        let mut rows = vec![xs.to_vec()];
        while let Some(last) = rows.last().filter(|row| row.len() > 1) {
            let next = last
                .chunks_exact(2)
                .map(|pair| b.and(&pair[0], &pair[1]))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(next);
        }
        log::trace!("built {} reduction layers over {} inputs", rows.len(), xs.len());
        Ok(Layers { rows })
    }

    /// Number of layers, layer 0 included.
    pub fn nlayers(&self) -> usize {
        self.rows.len()
    }

    /// Blocks in `layer`.
    pub fn layer(&self, layer: usize) -> &[W] {
        self.rows.get(layer).map_or(&[], |row| row.as_slice())
    }

    /// The block at `r`, if it was built.
    pub fn get(&self, r: BlockRef) -> Option<&W> {
        self.rows.get(r.layer).and_then(|row| row.get(r.position))
    }
}

impl<W> Index<BlockRef> for Layers<W> {
    type Output = W;

    fn index(&self, r: BlockRef) -> &W {
        &self.rows[r.layer][r.position]
    }
}

/// For each `len` in `1 ..= xs.len()`, the AND of `xs[..len]`; element
/// `len - 1` of the result is the prefix of length `len`.
///
/// Each prefix costs at most one AND on top of the layer arena, and the
/// longest path through any prefix is logarithmic in `xs.len()`.
pub fn prefix_and<B: BooleanBuilder>(
    b: &mut B,
    xs: &[B::Item],
) -> Result<Vec<B::Item>, B::Error> {
    if xs.is_empty() {
        return Ok(Vec::new());
    }
    let layers = Layers::build(b, xs)?;
    let mut prefixes: Vec<B::Item> = Vec::with_capacity(xs.len());
    for len in 1..=xs.len() {
        let (rest, block) = split_prefix(len);
        let block = &layers[block];
        let prefix = if rest == 0 {
            block.clone()
        } else {
            b.and(&prefixes[rest - 1], block)?
        };
        prefixes.push(prefix);
    }
    Ok(prefixes)
}

/// AND every wire in `xs` together with a balanced tree. An unpaired element
/// at the end of a layer moves up to the next layer unchanged.
pub fn and_tree<B: BooleanBuilder>(b: &mut B, xs: &[B::Item]) -> Result<B::Item, B::Error> {
    if xs.is_empty() {
        return Err(B::Error::from(CircuitError::InvalidArgNum {
            got: xs.len(),
            needed: 1,
        }));
    }
    let mut layer = xs.to_vec();
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| match pair {
                [x, y] => b.and(x, y),
                [x] => Ok(x.clone()),
                _ => unreachable!(),
            })
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(layer.remove(0))
}

/// OR every wire in `xs` together, via De Morgan over [`and_tree`]. A single
/// wire is returned as is, with no gates.
pub fn or_tree<B: BooleanBuilder>(b: &mut B, xs: &[B::Item]) -> Result<B::Item, B::Error> {
    match xs {
        [] => Err(B::Error::from(CircuitError::InvalidArgNum { got: 0, needed: 1 })),
        [x] => Ok(x.clone()),
        _ => {
            let nots = b.negate_many(xs)?;
            let z = and_tree(b, &nots)?;
            b.negate(&z)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        circuit::{CircuitBuilder, Role},
        depth_informer::DepthInformer,
        dummy::Dummy,
    };
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::{thread_rng, Rng};

    fn ceil_log2(n: usize) -> usize {
        n.next_power_of_two().trailing_zeros() as usize
    }

    #[test]
    fn split_prefix_examples() {
        assert_eq!(split_prefix(1), (0, BlockRef { layer: 0, position: 0 }));
        assert_eq!(split_prefix(4), (0, BlockRef { layer: 2, position: 0 }));
        assert_eq!(split_prefix(6), (4, BlockRef { layer: 1, position: 2 }));
        assert_eq!(split_prefix(7), (6, BlockRef { layer: 0, position: 6 }));
        assert_eq!(split_prefix(12), (8, BlockRef { layer: 2, position: 2 }));
    }

    #[test]
    #[should_panic]
    fn split_empty_prefix() {
        split_prefix(0);
    }

    #[test]
    fn decompose_examples() {
        assert!(decompose_prefix(0).is_empty());
        assert_eq!(
            decompose_prefix(11),
            vec![
                BlockRef { layer: 3, position: 0 },
                BlockRef { layer: 1, position: 4 },
                BlockRef { layer: 0, position: 10 },
            ]
        );
    }

    proptest! {
        #[test]
        fn decomposition_tiles_prefix(len in 1usize..(1 << 20)) {
            let blocks = decompose_prefix(len);
            prop_assert_eq!(blocks.len(), len.count_ones() as usize);
            let mut covered = 0;
            for w in blocks.windows(2) {
                prop_assert!(w[0].size() > w[1].size());
            }
            for block in blocks.iter() {
                prop_assert_eq!(block.start(), covered);
                prop_assert_eq!(block.start() % block.size(), 0);
                covered = block.end();
            }
            prop_assert_eq!(covered, len);
        }

        #[test]
        fn prefix_and_matches_fold(bits in proptest::collection::vec(any::<bool>(), 1..80)) {
            let mut d = Dummy::new(&[], &[]);
            let prefixes = prefix_and(&mut d, &bits).unwrap();
            prop_assert_eq!(prefixes.len(), bits.len());
            for (i, p) in prefixes.iter().enumerate() {
                prop_assert_eq!(*p, bits[..=i].iter().all(|&x| x));
            }
        }
    }

    #[test]
    fn layers_hold_aligned_blocks() {
        let mut rng = thread_rng();
        for _ in 0..16 {
            let n: usize = 1 + rng.gen_range(0..100);
            let bits = (0..n).map(|_| rng.gen_bool(0.9)).collect_vec();
            let mut d = Dummy::new(&[], &[]);
            let layers = Layers::build(&mut d, &bits).unwrap();
            assert_eq!(layers.nlayers(), 1 + n.ilog2() as usize);
            for k in 0..layers.nlayers() {
                assert_eq!(layers.layer(k).len(), n >> k);
                for j in 0..layers.layer(k).len() {
                    let r = BlockRef { layer: k, position: j };
                    let expect = bits[r.start()..r.end()].iter().all(|&x| x);
                    assert_eq!(layers.get(r), Some(&expect));
                    assert_eq!(layers[r], expect);
                }
            }
            assert_eq!(layers.get(BlockRef { layer: layers.nlayers(), position: 0 }), None);
        }
    }

    #[test]
    fn every_prefix_block_is_built() {
        for n in 1..300 {
            let mut d = DepthInformer::new();
            let xs = d.inputs(Role::A, n).unwrap();
            let layers = Layers::build(&mut d, &xs).unwrap();
            for len in 1..=n {
                for block in decompose_prefix(len) {
                    assert!(layers.get(block).is_some(), "n={} len={}", n, len);
                }
            }
        }
    }

    #[test]
    fn prefix_and_is_shallow_and_linear() {
        for n in 1..=512 {
            let mut d = DepthInformer::new();
            let xs = d.inputs(Role::A, n).unwrap();
            let prefixes = prefix_and(&mut d, &xs).unwrap();
            // layers take fewer than n ANDs and each prefix at most one more
            assert!(d.nands() < 2 * n, "n={} ands={}", n, d.nands());
            let deepest = prefixes.iter().map(|p| p.depth()).max().unwrap();
            assert!(deepest <= 2 * ceil_log2(n), "n={} depth={}", n, deepest);
        }
    }

    #[test]
    fn prefix_and_reuses_whole_blocks() {
        let mut b = CircuitBuilder::new();
        let xs = b.inputs(Role::A, 8).unwrap();
        let layers = Layers::build(&mut b, &xs).unwrap();
        let before = b.nwires();
        let mut b2 = CircuitBuilder::new();
        let xs2 = b2.inputs(Role::A, 8).unwrap();
        let prefixes = prefix_and(&mut b2, &xs2).unwrap();
        // power-of-two prefixes are taken straight from the arena
        for k in 0..4 {
            assert_eq!(prefixes[(1 << k) - 1], layers[BlockRef { layer: k, position: 0 }]);
        }
        // lengths 3, 5, 6, 7 need one extra AND each
        assert_eq!(b2.nwires(), before + 4);
    }

    #[test]
    fn and_tree_carries_odd_elements() {
        for n in 1..70 {
            let mut d = DepthInformer::new();
            let xs = d.inputs(Role::A, n).unwrap();
            let z = and_tree(&mut d, &xs).unwrap();
            assert_eq!(d.nands(), n - 1);
            assert_eq!(z.depth(), ceil_log2(n));
        }
    }

    #[test]
    fn or_tree_truth() {
        let mut rng = thread_rng();
        for n in 1..40 {
            let bits = (0..n).map(|_| rng.gen_bool(0.1)).collect_vec();
            let mut d = Dummy::new(&[], &[]);
            assert_eq!(or_tree(&mut d, &bits).unwrap(), bits.iter().any(|&x| x));
            let mut d = Dummy::new(&[], &[]);
            assert!(and_tree(&mut d, &bits).unwrap() == bits.iter().all(|&x| x));
        }
    }

    #[test]
    fn or_tree_of_one_wire_adds_no_gates() {
        let mut b = CircuitBuilder::new();
        let x = b.input(Role::A, 0).unwrap();
        assert_eq!(or_tree(&mut b, &[x]).unwrap(), x);
        assert_eq!(b.nwires(), 1);
    }

    #[test]
    fn empty_trees_are_rejected() {
        let mut d = Dummy::new(&[], &[]);
        assert!(matches!(
            and_tree(&mut d, &[]),
            Err(CircuitError::InvalidArgNum { got: 0, needed: 1 })
        ));
        assert!(or_tree(&mut d, &[]).is_err());
        assert!(prefix_and(&mut d, &[]).unwrap().is_empty());
    }
}
