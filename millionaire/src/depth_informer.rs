//! `BooleanBuilder` which computes the gate counts and depth of a computation.

use crate::{boolean::BooleanBuilder, circuit::Role, errors::CircuitError};
use std::cmp::max;

/// Carries the depth of the computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthItem {
    depth: usize,
    and_depth: usize,
}

impl DepthItem {
    /// Longest gate chain from the inputs to this wire.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Largest number of AND gates on any path from the inputs to this wire.
    pub fn and_depth(&self) -> usize {
        self.and_depth
    }
}

/// Builder which records gate counts and depths without producing a circuit.
#[derive(Clone, Debug, Default)]
pub struct DepthInformer {
    ninputs: usize,
    nnots: usize,
    nands: usize,
    nxors: usize,
    noutputs: usize,
    depth: usize,
    and_depth: usize,
}

impl std::fmt::Display for DepthInformer {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "circuit info:")?;
        writeln!(f, "  inputs:             {:16}", self.ninputs)?;
        writeln!(f, "  nots:               {:16}", self.nnots)?;
        writeln!(f, "  ands:               {:16}", self.nands)?;
        writeln!(f, "  xors:               {:16}", self.nxors)?;
        writeln!(f, "  total gates:        {:16}", self.ngates())?;
        writeln!(f, "  outputs:            {:16}", self.noutputs)?;
        writeln!(f, "  depth:              {:16}", self.depth)?;
        writeln!(f, "  and depth:          {:16}", self.and_depth)?;
        Ok(())
    }
}

impl DepthInformer {
    /// Create a new DepthInformer
    pub fn new() -> DepthInformer {
        DepthInformer::default()
    }

    /// Number of input wires.
    pub fn ninputs(&self) -> usize {
        self.ninputs
    }

    /// Number of NOT gates.
    pub fn nnots(&self) -> usize {
        self.nnots
    }

    /// Number of AND gates.
    pub fn nands(&self) -> usize {
        self.nands
    }

    /// Number of XOR gates.
    pub fn nxors(&self) -> usize {
        self.nxors
    }

    /// Number of non-input gates.
    pub fn ngates(&self) -> usize {
        self.nnots + self.nands + self.nxors
    }

    /// Number of allocated wires, inputs included.
    pub fn nwires(&self) -> usize {
        self.ninputs + self.ngates()
    }

    /// Number of output designations.
    pub fn noutputs(&self) -> usize {
        self.noutputs
    }

    /// Deepest output seen so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Largest AND depth of any output seen so far.
    pub fn and_depth(&self) -> usize {
        self.and_depth
    }
}

impl BooleanBuilder for DepthInformer {
    type Item = DepthItem;
    type Error = CircuitError;

    fn input(&mut self, _role: Role, _index: usize) -> Result<DepthItem, Self::Error> {
        self.ninputs += 1;
        Ok(DepthItem {
            depth: 0,
            and_depth: 0,
        })
    }

    fn negate(&mut self, x: &DepthItem) -> Result<DepthItem, Self::Error> {
        self.nnots += 1;
        Ok(DepthItem {
            depth: x.depth + 1,
            and_depth: x.and_depth,
        })
    }

    fn and(&mut self, x: &DepthItem, y: &DepthItem) -> Result<DepthItem, Self::Error> {
        self.nands += 1;
        Ok(DepthItem {
            depth: max(x.depth, y.depth) + 1,
            and_depth: max(x.and_depth, y.and_depth) + 1,
        })
    }

    fn xor(&mut self, x: &DepthItem, y: &DepthItem) -> Result<DepthItem, Self::Error> {
        self.nxors += 1;
        Ok(DepthItem {
            depth: max(x.depth, y.depth) + 1,
            and_depth: max(x.and_depth, y.and_depth),
        })
    }

    fn emit(&mut self, x: &DepthItem) -> Result<(), Self::Error> {
        self.noutputs += 1;
        self.depth = max(self.depth, x.depth);
        self.and_depth = max(self.and_depth, x.and_depth);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_depth_and_counts() {
        let mut d = DepthInformer::new();
        let x = d.input(Role::A, 0).unwrap();
        let y = d.input(Role::B, 0).unwrap();
        let z = d.xor(&x, &y).unwrap();
        let w = d.and(&z, &x).unwrap();
        let v = d.negate(&w).unwrap();
        d.emit(&v).unwrap();
        assert_eq!(v.depth(), 3);
        assert_eq!(v.and_depth(), 1);
        assert_eq!((d.ninputs(), d.nnots(), d.nands(), d.nxors()), (2, 1, 1, 1));
        assert_eq!(d.nwires(), 5);
        assert_eq!(d.noutputs(), 1);
        assert_eq!((d.depth(), d.and_depth()), (3, 1));
        assert!(d.to_string().contains("total gates:"));
    }
}
