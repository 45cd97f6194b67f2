use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Byte offsets of a literal or a `<...>` block within the pattern text.
///
/// Block spans include both delimiters; [`Span::interior`] drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for the empty literal before a leading block or after a trailing one
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Joins adjacent pieces of literal text into one literal
    pub fn merge(&self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The range text of a block, between `<` and `>`
    pub fn interior(&self) -> Span {
        if self.len() < 2 {
            return Span::new(self.start, self.start);
        }
        Span::new(self.start + 1, self.end - 1)
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

// Shown in block errors as `start..end`
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_span_slices_pattern() {
        let pattern = "t<01-10>.tif";
        let block = Span::new(1, 8);
        assert_eq!(&pattern[block.to_range()], "<01-10>");
        assert_eq!(&pattern[block.interior().to_range()], "01-10");
        assert_eq!(block.to_string(), "1..8");
    }

    #[test]
    fn test_literal_pieces_merge() {
        // "a" then a stray "<" then "b" form one literal
        let literal = Span::new(0, 1).merge(Span::new(1, 2)).merge(Span::new(2, 3));
        assert_eq!(literal, Span::from(0..3));
        assert_eq!(literal.len(), 3);
    }

    #[test]
    fn test_trailing_literal_is_empty() {
        let pattern = "x<1-2>";
        let trailing = Span::new(pattern.len(), pattern.len());
        assert!(trailing.is_empty());
        assert!(Span::new(3, 4).interior().is_empty());
    }
}
