use crate::ast::*;
use crate::error::{PatternError, Result};
use crate::lexer::{tokenize, Tokenized};
use crate::progression::parse_block;
use crate::span::Span;

/// Parser for file patterns
pub struct Parser<'source> {
    source: &'source str,
    tokens: Tokenized<'source>,
}

impl<'source> Parser<'source> {
    /// Create a new parser from a pattern string
    pub fn new(source: &'source str) -> Self {
        Parser {
            source,
            tokens: tokenize(source),
        }
    }

    /// Parse the whole pattern, validating every range in every block
    pub fn parse_pattern(&self) -> Result<Pattern> {
        let mut segments = Vec::with_capacity(self.tokens.literals.len() * 2);
        let mut literal_start = 0;

        for (i, text) in self.tokens.literals.iter().enumerate() {
            let block_span = self.tokens.block_spans.get(i).copied();
            let literal_end = block_span.map_or(self.source.len(), |span| span.start);
            segments.push(Segment::Literal(LiteralNode::new(
                *text,
                Span::new(literal_start, literal_end),
            )));

            if let Some(span) = block_span {
                segments.push(Segment::Block(self.parse_block(i, span)?));
                literal_start = span.end;
            }
        }

        Ok(Pattern {
            segments,
            span: Span::new(0, self.source.len()),
        })
    }

    fn parse_block(&self, index: usize, span: Span) -> Result<BlockNode> {
        let ranges = parse_block(self.tokens.blocks[index])
            .map_err(|e| PatternError::in_block(e, span))?;
        Ok(BlockNode::new(ranges, span))
    }
}

/// Parse a pattern string into its AST
pub fn parse(source: &str) -> Result<Pattern> {
    Parser::new(source).parse_pattern()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;
    use crate::progression::{LetterCase, Progression};

    #[test]
    fn test_parse_literal_only() {
        let pattern = parse("plate1.tif").unwrap();
        assert_eq!(pattern.segments.len(), 1);
        assert_eq!(pattern.block_count(), 0);
        assert_eq!(pattern.literals().collect::<Vec<_>>(), ["plate1.tif"]);
    }

    #[test]
    fn test_parse_alternates_segments() {
        let pattern = parse("<A-B>_<01-03:2>").unwrap();
        assert_eq!(pattern.segments.len(), 5);
        assert_eq!(pattern.literals().collect::<Vec<_>>(), ["", "_", ""]);

        let blocks: Vec<_> = pattern.blocks().collect();
        assert_eq!(
            blocks[0].ranges,
            vec![RangeExpr::Range(Progression::Alphabetic {
                case: LetterCase::Upper,
                start: 0,
                stop: 1,
                step: 1,
            })]
        );
        assert_eq!(
            blocks[1].ranges,
            vec![RangeExpr::Range(Progression::Numeric {
                start: 1,
                stop: 3,
                step: 2,
                width: Some(2),
            })]
        );
    }

    #[test]
    fn test_parse_spans() {
        let pattern = parse("ab<1-2>c").unwrap();
        let spans: Vec<_> = pattern.segments.iter().map(Segment::span).collect();
        assert_eq!(
            spans,
            vec![Span::new(0, 2), Span::new(2, 7), Span::new(7, 8)]
        );
    }

    #[test]
    fn test_parse_error_carries_block_span() {
        let err = parse("x_<1-2>_<z-a>.tif").unwrap_err();
        assert_eq!(
            err,
            PatternError::Range {
                source: RangeError::inverted("z-a"),
                span: Span::new(8, 13),
            }
        );
        assert_eq!(err.span(), Some(Span::new(8, 13)));
    }

    #[test]
    fn test_parse_block_with_literals() {
        let pattern = parse("[<FD6_FDRED, FD6_FDGREEN>]").unwrap();
        let block = pattern.blocks().next().unwrap();
        assert_eq!(block.values(), ["FD6_FDRED", "FD6_FDGREEN"]);
    }
}
