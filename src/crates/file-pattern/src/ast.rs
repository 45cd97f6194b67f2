use crate::progression::Progression;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A parsed file pattern.
///
/// Segments strictly alternate literal, block, literal, ... and always start
/// and end with a (possibly empty) literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub segments: Vec<Segment>,
    pub span: Span,
}

impl Pattern {
    pub fn blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Literal(_) => None,
        })
    }

    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Literal(literal) => Some(literal.text.as_str()),
            Segment::Block(_) => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Literal(LiteralNode),
    Block(BlockNode),
}

impl Segment {
    pub fn span(&self) -> Span {
        match self {
            Segment::Literal(node) => node.span,
            Segment::Block(node) => node.span,
        }
    }
}

/// Literal text copied verbatim into every filename
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralNode {
    pub text: String,
    pub span: Span,
}

impl LiteralNode {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        LiteralNode {
            text: text.into(),
            span,
        }
    }
}

/// A `<...>` block: comma-separated ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    pub ranges: Vec<RangeExpr>,
    pub span: Span,
}

impl BlockNode {
    pub fn new(ranges: Vec<RangeExpr>, span: Span) -> Self {
        BlockNode { ranges, span }
    }

    /// Values of every range, concatenated in declaration order
    pub fn values(&self) -> Vec<String> {
        self.ranges.iter().flat_map(RangeExpr::values).collect()
    }
}

/// One comma-separated entry of a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeExpr {
    /// A bare token such as `FD6_FDRED`
    Literal(String),
    /// `start-stop[:step]`
    Range(Progression),
}

impl RangeExpr {
    pub fn values(&self) -> Vec<String> {
        match self {
            RangeExpr::Literal(text) => vec![text.clone()],
            RangeExpr::Range(progression) => progression.values().collect(),
        }
    }

    pub fn last_index(&self) -> u64 {
        match self {
            RangeExpr::Literal(_) => 0,
            RangeExpr::Range(progression) => progression.last_index(),
        }
    }

    pub fn nth_value(&self, index: u64) -> Option<String> {
        match self {
            RangeExpr::Literal(text) => (index == 0).then(|| text.clone()),
            RangeExpr::Range(progression) => progression.nth_value(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::parse_range;

    #[test]
    fn test_block_values_in_declaration_order() {
        let block = BlockNode::new(
            vec![
                parse_range("5-6").unwrap(),
                RangeExpr::Literal("x".into()),
                parse_range("1-2").unwrap(),
            ],
            Span::new(0, 11),
        );
        assert_eq!(block.values(), ["5", "6", "x", "1", "2"]);
    }

    #[test]
    fn test_pattern_accessors() {
        let pattern = Pattern {
            segments: vec![
                Segment::Literal(LiteralNode::new("a", Span::new(0, 1))),
                Segment::Block(BlockNode::new(
                    vec![RangeExpr::Literal("b".into())],
                    Span::new(1, 4),
                )),
                Segment::Literal(LiteralNode::new("", Span::new(4, 4))),
            ],
            span: Span::new(0, 4),
        };
        assert_eq!(pattern.block_count(), 1);
        assert_eq!(pattern.literals().collect::<Vec<_>>(), ["a", ""]);
        assert_eq!(pattern.segments[1].span(), Span::new(1, 4));
    }
}
