//! Source spans for syntax nodes and diagnostics.

use std::{fmt, ops::Range};

use serde::Deserialize;

/// A byte range within a single source file.
///
/// Spans carry no file identity; the file is owned by the
/// [`Document`](crate::document::Document) and copied onto each diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a span from a start offset and a width
    pub fn from_width(start: usize, width: usize) -> Self {
        Self::new(start..start + width)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The span as a byte range, suitable for slicing the source text
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
