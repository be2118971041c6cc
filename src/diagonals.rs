//! Diagonal-indexed vectors
//!
//! The search frontiers of the middle snake finder are keyed by diagonal index `k = x - y`, which
//! ranges over `[-m, n]` for a pair of sequences of lengths `n` and `m`. This module provides a
//! reusable backing buffer and a borrowed view over it that can be indexed with signed diagonals.

use std::ops::{Index, IndexMut};

/// Reusable storage for a search frontier.
///
/// The buffer is allocated once for the largest pair of sequences that will be compared, and every
/// middle snake invocation borrows a zeroed prefix of it through [`DiagonalBuffer::diagonals`].
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DiagonalBuffer {
    data: Vec<usize>,
}

impl DiagonalBuffer {
    /// Create a buffer large enough to hold the diagonals of an `n` by `m` edit graph.
    pub fn new(n: usize, m: usize) -> Self {
        Self {
            data: vec![0; n + m + 1],
        }
    }

    /// Borrow a zeroed view over the diagonals `[-m, n]`.
    ///
    /// # Panics
    ///
    /// If the buffer is too small for the requested edit graph.
    pub fn diagonals(&mut self, n: usize, m: usize) -> Diagonals<'_> {
        let len = n + m + 1;
        assert!(
            len <= self.data.len(),
            "diagonal view of length {len} exceeds the buffer capacity ({})",
            self.data.len()
        );
        let data = &mut self.data[..len];
        data.fill(0);
        Diagonals {
            data,
            offset: m as isize,
        }
    }
}

/// A mutable view over a [`DiagonalBuffer`] indexed by signed diagonal.
///
/// Diagonal `k` lives at offset `m + k` of the underlying slice, so the lowest valid diagonal
/// `-m` maps to the start of the slice.
#[derive(Debug)]
pub struct Diagonals<'a> {
    data: &'a mut [usize],
    offset: isize,
}

impl Diagonals<'_> {
    /// Resolve a diagonal to an offset in the backing slice.
    fn idx_helper(&self, k: isize) -> usize {
        let idx = self.offset + k;
        debug_assert!(idx >= 0, "diagonal {k} is below the lowest diagonal");
        debug_assert!(
            (idx as usize) < self.data.len(),
            "diagonal {k} is above the highest diagonal"
        );
        idx as usize
    }

    /// The lowest diagonal in the view.
    #[must_use]
    pub fn lowest(&self) -> isize {
        -self.offset
    }

    /// The highest diagonal in the view.
    #[must_use]
    pub fn highest(&self) -> isize {
        self.data.len() as isize - self.offset - 1
    }
}

impl Index<isize> for Diagonals<'_> {
    type Output = usize;

    fn index(&self, k: isize) -> &Self::Output {
        &self.data[self.idx_helper(k)]
    }
}

impl IndexMut<isize> for Diagonals<'_> {
    fn index_mut(&mut self, k: isize) -> &mut Self::Output {
        let idx = self.idx_helper(k);
        &mut self.data[idx]
    }
}
