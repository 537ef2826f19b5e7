// -*- mode: rust; -*-
//
// This file is part of `millionaire`.
// Copyright © 2024 Galois, Inc.
// See LICENSE for licensing information.

//! Wire identifiers and the allocator that hands them out.

/// Reference to a wire in a circuit. Wires are numbered from 1 in the order
/// their gates were emitted, so a wire's number is also its line position
/// among the allocating lines of the gate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WireRef(pub(crate) usize);

impl WireRef {
    /// The 1-based wire number.
    #[inline]
    pub fn id(&self) -> usize {
        self.0
    }

    /// Zero-based position of the gate that produced this wire.
    #[inline]
    pub(crate) fn ix(&self) -> usize {
        self.0 - 1
    }
}

impl std::fmt::Display for WireRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out wire identifiers in strict creation order: 1, 2, 3, ...
///
/// Every allocating gate (inputs included) takes exactly one identifier.
/// Identifiers are never reused and there are no gaps.
#[derive(Clone, Debug)]
pub struct WireAllocator {
    next: usize,
}

impl WireAllocator {
    /// Make a new allocator whose first wire is `1`.
    pub fn new() -> Self {
        WireAllocator { next: 1 }
    }

    /// Allocate the next wire.
    #[inline]
    pub fn allocate(&mut self) -> WireRef {
        let current = self.next;
        self.next += 1;
        WireRef(current)
    }

    /// Number of wires allocated so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.next - 1
    }

    /// The identifier the next call to `allocate` will return.
    #[inline]
    pub fn peek(&self) -> usize {
        self.next
    }

    /// Whether `w` has been handed out by this allocator.
    #[inline]
    pub fn is_allocated(&self, w: WireRef) -> bool {
        w.0 >= 1 && w.0 < self.next
    }
}

impl Default for WireAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_from_one_without_gaps() {
        let mut alloc = WireAllocator::new();
        let ws: Vec<usize> = (0..10).map(|_| alloc.allocate().id()).collect();
        assert_eq!(ws, (1..=10).collect::<Vec<_>>());
        assert_eq!(alloc.count(), 10);
        assert_eq!(alloc.peek(), 11);
    }

    #[test]
    fn allocated_wires_are_known() {
        let mut alloc = WireAllocator::new();
        assert!(!alloc.is_allocated(WireRef(1)));
        let w = alloc.allocate();
        assert!(alloc.is_allocated(w));
        assert!(!alloc.is_allocated(WireRef(0)));
        assert!(!alloc.is_allocated(WireRef(2)));
    }

    #[test]
    fn independent_allocators_do_not_interfere() {
        let mut x = WireAllocator::new();
        let mut y = WireAllocator::new();
        x.allocate();
        x.allocate();
        assert_eq!(y.allocate().id(), 1);
        assert_eq!(x.allocate().id(), 3);
    }
}
