//! File patterns: a compact notation for regularly indexed filenames
//!
//! A pattern is literal text with `<...>` blocks. Each block holds
//! comma-separated ranges, and the pattern stands for every combination of
//! block values.
//!
//! # Examples
//!
//! ```
//! use file_pattern::{synthesize, FilePattern};
//!
//! // Expand a pattern
//! let pattern = FilePattern::new("well_<A-B><01-03:2>.tif").unwrap();
//! assert_eq!(pattern.filenames().count(), 4);
//!
//! // Synthesize a pattern from names
//! let names = ["t001.tif", "t002.tif", "t003.tif"];
//! assert_eq!(synthesize(&names).unwrap(), "t<001-003>.tif");
//! ```
//!
//! # Pattern Syntax
//!
//! - Literal text: `img_`
//! - Numeric range: `<1-12>`, zero-padded when both ends have the same width: `<01-12>`
//! - Letter range: `<a-f>`, `<A-F>`
//! - Step: `<0-100:10>`
//! - List: `<1-3,7,x>`
//!
//! # Main Functions
//!
//! - [`parse`]: Parse a pattern into its AST
//! - [`format()`]: Write an AST back in canonical form
//! - [`FilePattern::filenames`]: Lazily enumerate the filenames of a pattern
//! - [`expand_range`] / [`expand_block`]: Expand range and block text
//! - [`build_numeric_block`]: Compress a set of digit strings into a block
//! - [`find_numeric_pattern`]: Synthesize a pattern from a list of names
//! - [`verify_round_trip`]: Check a pattern against the names it should denote

pub mod ast;
pub mod error;
pub mod expander;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod progression;
pub mod span;
pub mod synthesis;


pub use ast::{BlockNode, LiteralNode, Pattern, RangeExpr, Segment};
pub use error::{PatternError, RangeError, Result};
pub use expander::{expand, FilePattern, Filenames};
pub use formatter::format;
pub use lexer::{tokenize, Lexer, Token, Tokenized};
pub use parser::{parse, Parser};
pub use progression::{expand_block, expand_range, parse_block, parse_range, LetterCase, Progression};
pub use span::Span;
pub use synthesis::{
    build_literal_block, build_numeric_block, find_numeric_pattern, synthesize, verify_round_trip,
};
