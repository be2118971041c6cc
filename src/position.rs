//! Positions within the destination sequence and the cursor that tracks them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the destination sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// The absolute element offset from the start of the sequence.
    pub index: usize,

    /// The zero-indexed line.
    ///
    /// This stays at zero if no newline predicate was supplied to the diff.
    pub line: usize,

    /// The zero-indexed column within the line.
    ///
    /// Without a newline predicate this mirrors `index`.
    pub column: usize,
}

impl Position {
    /// Create a position without line information, where the column mirrors the index.
    pub fn from_index(index: usize) -> Self {
        Self {
            index,
            line: 0,
            column: index,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A running cursor over the consumed portion of the destination sequence.
///
/// The differ advances the cursor over every destination element it consumes, whether the element
/// is kept or deleted, so that `position().index` always equals the number of elements consumed so
/// far.
pub(crate) struct Cursor<N> {
    position: Position,
    is_newline: Option<N>,
}

impl<N> Cursor<N> {
    pub fn new(is_newline: Option<N>) -> Self {
        Self {
            position: Position::default(),
            is_newline,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Advance the cursor over a run of consumed elements.
    pub fn advance<T>(&mut self, consumed: &[T])
    where
        N: Fn(&T) -> bool,
    {
        self.position.index += consumed.len();
        let Some(is_newline) = &self.is_newline else {
            self.position.column = self.position.index;
            return;
        };

        for element in consumed {
            if is_newline(element) {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += 1;
            }
        }
    }
}
