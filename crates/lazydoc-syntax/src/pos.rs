//! Byte positions, spans and line lookups.

use std::fmt;

/// Byte offset into a single source file.
///
/// Positions double as the identity surrogate for declarations, so two nodes
/// with the same name at different offsets are never confused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub u32);

impl Pos {
    /// Creates a position from a `usize` offset.
    #[inline]
    pub fn new(offset: usize) -> Self {
        debug_assert!(offset <= u32::MAX as usize);
        Self(offset as u32)
    }

    /// Returns the offset as `usize` for slicing.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a span from `usize` offsets.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Empty span anchored at `offset`.
    #[inline]
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start of the span as a [`Pos`].
    #[inline]
    pub const fn pos(&self) -> Pos {
        Pos(self.start)
    }

    /// Returns `true` when the two spans share at least one byte, or when one
    /// is an insertion point strictly inside the other.
    pub fn overlaps(&self, other: &Span) -> bool {
        if self.is_empty() || other.is_empty() {
            let (point, range) = if self.is_empty() {
                (self.start, other)
            } else {
                (other.start, self)
            };
            return range.start < point && point < range.end;
        }
        self.start < other.end && other.start < self.end
    }
}

/// One-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line starts for a source text.
#[derive(Debug)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<u32>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(0);
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((idx + 1) as u32);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// The indexed source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn line_idx(&self, offset: u32) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        }
    }

    /// One-based line and column for a byte offset.
    pub fn position(&self, offset: u32) -> Position {
        let idx = self.line_idx(offset);
        Position {
            line: idx as u32 + 1,
            column: offset - self.line_starts[idx] + 1,
        }
    }

    /// Offset of the first byte of the line containing `offset`.
    pub fn line_start(&self, offset: u32) -> u32 {
        self.line_starts[self.line_idx(offset)]
    }

    /// Text between the start of the line and `offset`.
    pub fn line_prefix(&self, offset: u32) -> &'a str {
        let start = self.line_start(offset) as usize;
        &self.source[start..offset as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let index = LineIndex::new("package a\n\nfunc F() {}\n");
        assert_eq!(index.position(0), Position { line: 1, column: 1 });
        assert_eq!(index.position(11), Position { line: 3, column: 1 });
        assert_eq!(index.position(16), Position { line: 3, column: 6 });
    }

    #[test]
    fn line_prefix_stops_at_offset() {
        let source = "var (\n\tA = 1\n)\n";
        let index = LineIndex::new(source);
        let a = source.find('A').unwrap() as u32;
        assert_eq!(index.line_start(a), 6);
        assert_eq!(index.line_prefix(a), "\t");
    }

    #[test]
    fn insertion_point_overlap() {
        let range = Span::new(4, 10);
        assert!(range.overlaps(&Span::empty(6)));
        assert!(!range.overlaps(&Span::empty(4)));
        assert!(!range.overlaps(&Span::empty(10)));
        assert!(!Span::new(0, 4).overlaps(&range));
    }
}
