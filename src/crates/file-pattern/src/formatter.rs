// Formatter: convert an AST back to pattern text
use crate::ast::*;

/// Format a pattern in canonical form.
///
/// Whitespace inside blocks is dropped and ranges are written with their
/// parsed endpoints, so `< 1-3 : 1 >` becomes `<1-3>`.
pub fn format(pattern: &Pattern) -> String {
    pattern.segments.iter().map(format_segment).collect()
}

fn format_segment(segment: &Segment) -> String {
    match segment {
        Segment::Literal(literal) => literal.text.clone(),
        Segment::Block(block) => format_block(block),
    }
}

fn format_block(block: &BlockNode) -> String {
    let ranges: Vec<String> = block.ranges.iter().map(format_range).collect();
    format!("<{}>", ranges.join(","))
}

fn format_range(range: &RangeExpr) -> String {
    match range {
        RangeExpr::Literal(text) => text.clone(),
        RangeExpr::Range(progression) => progression.to_string(),
    }
}
