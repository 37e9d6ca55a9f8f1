//! Half-open byte ranges over source text, and the small set of derived
//! positions (line, column) a diagnostic renderer needs.
//!
//! This crate has no notion of "file" or "line index cache" — that lives in
//! `zlint_source`, which borrows `Span` to carve text out of a `Source`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` over some source buffer.
///
/// `Span` carries no reference to the buffer it indexes; pair it with a
/// `&str` (via [`Span::text`]) or a `zlint_source::Source` to recover text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "Span::new: start must not exceed end");
        Self { start, end }
    }

    /// A zero-width span at `offset`, e.g. for an end-of-file diagnostic.
    #[inline]
    pub const fn empty(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Does `self` fully contain `other` (inclusive of equal bounds)?
    #[inline]
    pub const fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Does `self` contain the byte offset `pos`? Half-open: `end` is excluded,
    /// except for a zero-width span, which contains exactly its own offset.
    #[inline]
    pub const fn contains_offset(self, pos: u32) -> bool {
        if self.is_empty() {
            pos == self.start
        } else {
            self.start <= pos && pos < self.end
        }
    }

    /// Do `self` and `other` share at least one byte?
    #[inline]
    pub const fn intersects(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The smallest span containing both `self` and `other`.
    #[inline]
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn text<'a>(self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }

    #[inline]
    pub const fn range(self) -> Range<u32> {
        self.start..self.end
    }
}

impl From<Range<u32>> for Span {
    fn from(range: Range<u32>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

/// Ordering is by `(start, end)`, so sorting a `Vec<Span>` yields source order
/// with shorter spans preceding longer ones that start at the same offset.
impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One-indexed line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneIndexed(u32);

impl OneIndexed {
    pub const MIN: OneIndexed = OneIndexed(1);

    /// Builds a `OneIndexed` from a zero-based value, i.e. `from_zero_indexed(0)`
    /// is line/column 1.
    #[inline]
    pub const fn from_zero_indexed(value: u32) -> Self {
        Self(value + 1)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn to_zero_indexed(self) -> u32 {
        self.0 - 1
    }
}

/// A `(line, column)` pair, both one-indexed, as shown to a human in a
/// diagnostic masthead (`path:line:col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineColumn {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line.get(), self.column.get())
    }
}

/// A [`Span`] with an optional human-readable label and a primary/secondary
/// flag, as attached to a [`Diagnostic`](https://docs.rs/zlint_diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabeledSpan {
    pub span: Span,
    pub label: Option<String>,
    pub primary: bool,
}

impl LabeledSpan {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            label: None,
            primary: true,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn secondary(mut self) -> Self {
        self.primary = false;
        self
    }
}

impl From<Span> for LabeledSpan {
    fn from(span: Span) -> Self {
        LabeledSpan::new(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_emptiness() {
        let s = Span::new(4, 10);
        assert_eq!(s.len(), 6);
        assert!(!s.is_empty());
        assert!(Span::empty(4).is_empty());
    }

    #[test]
    fn contains_is_inclusive_of_bounds() {
        let outer = Span::new(0, 10);
        let inner = Span::new(2, 8);
        assert!(outer.contains(inner));
        assert!(outer.contains(outer));
        assert!(!inner.contains(outer));
    }

    #[test]
    fn zero_width_span_contains_only_its_offset() {
        let eof = Span::empty(42);
        assert!(eof.contains_offset(42));
        assert!(!eof.contains_offset(41));
        assert!(!eof.contains_offset(43));
    }

    #[test]
    fn intersects_requires_shared_bytes() {
        assert!(Span::new(0, 5).intersects(Span::new(4, 9)));
        assert!(!Span::new(0, 5).intersects(Span::new(5, 9)));
    }

    #[test]
    fn ordering_is_by_start_then_end() {
        let mut spans = vec![Span::new(3, 4), Span::new(0, 10), Span::new(0, 2)];
        spans.sort();
        assert_eq!(spans, vec![Span::new(0, 2), Span::new(0, 10), Span::new(3, 4)]);
    }

    #[test]
    fn one_indexed_from_zero() {
        assert_eq!(OneIndexed::from_zero_indexed(0).get(), 1);
        assert_eq!(OneIndexed::from_zero_indexed(0).to_zero_indexed(), 0);
    }
}
