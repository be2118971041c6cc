//! The sequence diff engine.
//!
//! This is a linear-space implementation of Myers' O(ND) difference algorithm. For every pair of
//! subsequences we find a "middle snake" on some shortest edit path by running a forward search
//! from the start and a reverse search from the end at the same time, then recurse on the parts
//! before and after the snake.
//!
//! Edits are reported relative to `dest`: applying them in order to `dest` produces `source`.

use crate::diagonals::DiagonalBuffer;
use crate::position::{Cursor, Position};
use log::debug;
use logging_timer::time;
use std::ops::Range;

/// A single edit of the destination sequence.
///
/// The edit replaces `dest[start.index..end.index]` with `replacement`, which is always a
/// contiguous subslice of the source sequence. The differ only ever produces pure deletions (an
/// empty replacement) and pure insertions (an empty range).
#[derive(Debug, PartialEq, Eq)]
pub struct Edit<'a, T> {
    /// Where the replaced range starts in the destination.
    pub start: Position,

    /// Where the replaced range ends (exclusive) in the destination.
    pub end: Position,

    /// The elements from the source that take the place of the range.
    pub replacement: &'a [T],
}

// Manual impls so that `T` doesn't need to be `Clone`/`Copy` itself.
impl<T> Clone for Edit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Edit<'_, T> {}

impl<'a, T> Edit<'a, T> {
    /// The half-open range of destination offsets this edit removes.
    pub fn range(&self) -> Range<usize> {
        self.start.index..self.end.index
    }

    /// The number of destination elements this edit removes.
    pub fn deleted_len(&self) -> usize {
        self.end.index - self.start.index
    }

    /// Whether the edit only inserts elements.
    pub fn is_insertion(&self) -> bool {
        self.deleted_len() == 0 && !self.replacement.is_empty()
    }

    /// Whether the edit only removes elements.
    pub fn is_deletion(&self) -> bool {
        self.deleted_len() > 0 && self.replacement.is_empty()
    }
}

/// A snake in the edit graph along with the edit distance of the graph it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snake {
    /// Where the snake starts in the source.
    x: usize,
    /// Where the snake starts in the destination.
    y: usize,
    /// Where the snake ends in the source.
    u: usize,
    /// Where the snake ends in the destination.
    v: usize,
    /// The length of the shortest edit script for the graph.
    d: usize,
}

/// The lowest diagonal that a search of depth `d` can visit in a graph with `m` destination
/// elements.
///
/// Past `d == m` the bound is pinned to `-m`, or one above it so the parity matches `d`.
fn min_diagonal(m: isize, d: isize) -> isize {
    if d <= m {
        return -d;
    }
    if (m ^ d) & 1 == 1 { -(m - 1) } else { -m }
}

/// The highest diagonal that a search of depth `d` can visit in a graph with `n` source elements.
fn max_diagonal(n: isize, d: isize) -> isize {
    if d <= n {
        return d;
    }
    if (n ^ d) & 1 == 1 { n - 1 } else { n }
}

/// The state for a single top-level diff.
struct Differ<'a, T, N, E> {
    source: &'a [T],
    dest: &'a [T],
    /// The furthest reaching x offset per diagonal for the forward search.
    forward: DiagonalBuffer,
    /// The furthest reaching x offset per diagonal for the reverse search, measured from the end.
    reverse: DiagonalBuffer,
    cursor: Cursor<N>,
    on_edit: E,
}

impl<'a, T, N, E> Differ<'a, T, N, E>
where
    T: PartialEq,
    N: Fn(&T) -> bool,
    E: FnMut(Edit<'a, T>),
{
    fn new(source: &'a [T], dest: &'a [T], is_newline: Option<N>, on_edit: E) -> Self {
        Self {
            source,
            dest,
            forward: DiagonalBuffer::new(source.len(), dest.len()),
            reverse: DiagonalBuffer::new(source.len(), dest.len()),
            cursor: Cursor::new(is_newline),
            on_edit,
        }
    }

    /// Find a middle snake between two non-empty sequences.
    fn middle_snake(&mut self, a: &[T], b: &[T]) -> Snake {
        let (n, m) = (a.len() as isize, b.len() as isize);
        let mut fwd = self.forward.diagonals(a.len(), b.len());
        let mut rev = self.reverse.diagonals(a.len(), b.len());
        let delta = n - m;
        let odd = delta & 1 == 1;

        for d in 0..=(n + m + 1) / 2 {
            let lo = min_diagonal(m, d);
            let hi = max_diagonal(n, d);
            debug_assert!(fwd.lowest() <= lo && hi <= fwd.highest());

            let mut k = lo;
            while k <= hi {
                // Prefer the diagonal above unless we're at the top edge of the range.
                let x = if k == lo || (k != hi && fwd[k - 1] < fwd[k + 1]) {
                    fwd[k + 1] as isize
                } else {
                    fwd[k - 1] as isize + 1
                };
                let y = x - k;

                let (mut u, mut v) = (x, y);
                while u < n && v < m && a[u as usize] == b[v as usize] {
                    u += 1;
                    v += 1;
                }

                if odd {
                    // The reverse frontier holds depth d - 1 here.
                    let rk = delta - k;
                    if rk >= lo && rk <= hi && u + rev[rk] as isize >= n {
                        return snake(x, y, u, v, 2 * d - 1);
                    }
                }

                fwd[k] = u as usize;
                k += 2;
            }

            let mut k = hi;
            while k >= lo {
                let x = if k == lo || (k != hi && rev[k - 1] < rev[k + 1]) {
                    rev[k + 1] as isize
                } else {
                    rev[k - 1] as isize + 1
                };
                let y = x - k;

                let (mut u, mut v) = (x, y);
                while u < n && v < m && a[(n - u - 1) as usize] == b[(m - v - 1) as usize] {
                    u += 1;
                    v += 1;
                }

                if !odd {
                    let fk = delta - k;
                    if fk >= lo && fk <= hi && u + fwd[fk] as isize >= n {
                        return snake(n - u, m - v, n - x, m - y, 2 * d);
                    }
                }

                rev[k] = u as usize;
                k -= 2;
            }
        }

        unreachable!("the forward and reverse searches never met (n = {n}, m = {m})")
    }

    /// Emit the edits turning `dest[y..v]` into `source[x..u]`.
    fn diff(&mut self, x: usize, y: usize, u: usize, v: usize) {
        let source: &'a [T] = &self.source[x..u];
        let dest: &'a [T] = &self.dest[y..v];

        if source.is_empty() && dest.is_empty() {
            return;
        }

        if source.is_empty() {
            let start = self.cursor.position();
            self.cursor.advance(dest);
            let end = self.cursor.position();
            self.emit(start, end, &[]);
            return;
        }

        if dest.is_empty() {
            let at = self.cursor.position();
            self.emit(at, at, source);
            return;
        }

        let Snake {
            x: mx,
            y: my,
            u: mu,
            v: mv,
            d,
        } = self.middle_snake(source, dest);

        match d {
            0 => self.cursor.advance(dest),
            1 => {
                // (mx, my) is the point right after the only edit.
                if source.len() > dest.len() {
                    self.cursor.advance(&dest[..my]);
                    let at = self.cursor.position();
                    self.emit(at, at, &source[mx - 1..mx]);
                } else {
                    self.cursor.advance(&dest[..my - 1]);
                    let start = self.cursor.position();
                    self.cursor.advance(&dest[my - 1..my]);
                    let end = self.cursor.position();
                    self.emit(start, end, &[]);
                }
                self.cursor.advance(&dest[my..]);
            }
            _ => {
                self.diff(x, y, x + mx, y + my);
                self.cursor.advance(&dest[my..mv]);
                self.diff(x + mu, y + mv, u, v);
            }
        }
    }

    fn emit(&mut self, start: Position, end: Position, replacement: &'a [T]) {
        (self.on_edit)(Edit {
            start,
            end,
            replacement,
        });
    }
}

/// Build a [Snake] from the signed coordinates used during the search.
fn snake(x: isize, y: isize, u: isize, v: isize, d: isize) -> Snake {
    debug_assert!(x >= 0 && y >= 0 && u >= x && v >= y && d >= 0);
    Snake {
        x: x as usize,
        y: y as usize,
        u: u as usize,
        v: v as usize,
        d: d as usize,
    }
}

/// Compute the edits of `dest` required to produce `source`.
///
/// `on_edit` is called once per edit, in increasing order of position. Positions carry no line
/// information, so each position's column is equal to its index.
///
/// ```rust
/// use libsnakediff::diff::diff;
/// let mut edits = Vec::new();
/// diff(b"AAC", b"AC", |edit| edits.push((edit.range(), edit.replacement)));
/// assert_eq!(edits, vec![(1..1, &b"A"[..])]);
/// ```
pub fn diff<'a, T, E>(source: &'a [T], dest: &'a [T], on_edit: E)
where
    T: PartialEq,
    E: FnMut(Edit<'a, T>),
{
    run(source, dest, None::<fn(&T) -> bool>, on_edit);
}

/// Compute the edits of `dest` required to produce `source`, tracking lines and columns.
///
/// Every destination element for which `is_newline` returns `true` ends a line, so the element
/// after it starts at column zero of the next line.
pub fn diff_with_newlines<'a, T, N, E>(source: &'a [T], dest: &'a [T], is_newline: N, on_edit: E)
where
    T: PartialEq,
    N: Fn(&T) -> bool,
    E: FnMut(Edit<'a, T>),
{
    run(source, dest, Some(is_newline), on_edit);
}

/// Compute the edits of `dest` required to produce `source` as bare destination offsets.
///
/// This is the lightweight variant of [diff] for callers that have no use for positions.
pub fn diff_offsets<'a, T, E>(source: &'a [T], dest: &'a [T], mut on_edit: E)
where
    T: PartialEq,
    E: FnMut(Range<usize>, &'a [T]),
{
    diff(source, dest, |edit| on_edit(edit.range(), edit.replacement));
}

fn run<'a, T, N, E>(source: &'a [T], dest: &'a [T], is_newline: Option<N>, on_edit: E)
where
    T: PartialEq,
    N: Fn(&T) -> bool,
    E: FnMut(Edit<'a, T>),
{
    debug!(
        "Diffing {} source elements against {} destination elements",
        source.len(),
        dest.len()
    );
    let mut differ = Differ::new(source, dest, is_newline, on_edit);
    differ.diff(0, 0, source.len(), dest.len());
}

/// Collect the edits of `dest` required to produce `source`.
#[time("info", "diff::{}")]
pub fn compute_edit_script<'a, T: PartialEq>(source: &'a [T], dest: &'a [T]) -> Vec<Edit<'a, T>> {
    let mut edits = Vec::new();
    diff(source, dest, |edit| edits.push(edit));
    debug!("Computed an edit script with {} edits", edits.len());
    edits
}

/// Collect the edits of `dest` required to produce `source`, with line and column positions.
#[time("info", "diff::{}")]
pub fn compute_edit_script_with_newlines<'a, T, N>(
    source: &'a [T],
    dest: &'a [T],
    is_newline: N,
) -> Vec<Edit<'a, T>>
where
    T: PartialEq,
    N: Fn(&T) -> bool,
{
    let mut edits = Vec::new();
    diff_with_newlines(source, dest, is_newline, |edit| edits.push(edit));
    debug!("Computed an edit script with {} edits", edits.len());
    edits
}

/// Apply an edit script to `dest` in a single left-to-right pass.
///
/// Applying the script computed for `(source, dest)` yields a copy of `source`.
///
/// # Panics
///
/// If the edits are out of order or reach past the end of `dest`.
pub fn apply_edits<T: Clone>(dest: &[T], edits: &[Edit<'_, T>]) -> Vec<T> {
    let mut out = Vec::with_capacity(dest.len());
    let mut i = 0;
    for edit in edits {
        out.extend_from_slice(&dest[i..edit.start.index]);
        out.extend_from_slice(edit.replacement);
        i = edit.end.index;
    }
    out.extend_from_slice(&dest[i..]);
    out
}

/// The number of elements an edit script deletes and inserts.
pub fn edit_distance<T>(edits: &[Edit<'_, T>]) -> usize {
    edits
        .iter()
        .map(|edit| edit.deleted_len() + edit.replacement.len())
        .sum()
}
