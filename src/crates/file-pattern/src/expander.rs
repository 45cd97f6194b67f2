//! Expansion of a pattern into the filenames it denotes

use crate::ast::RangeExpr;
use crate::error::{PatternError, Result};
use crate::lexer::tokenize;
use crate::parser::parse;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;
use tracing::trace;

/// A validated pattern, keeping the parsed ranges of each block.
///
/// Values are rendered on demand, so a block such as `<0-9999999999>` costs
/// no more than `<0-9>` until its names are requested.
///
/// ```
/// use file_pattern::FilePattern;
///
/// let pattern = FilePattern::new("s<1,2>_<a-b>.tif").unwrap();
/// let names: Vec<String> = pattern.filenames().collect();
/// assert_eq!(names, ["s1_a.tif", "s1_b.tif", "s2_a.tif", "s2_b.tif"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pattern: String,
    literals: Vec<String>,
    ranges: Vec<Vec<RangeExpr>>,
}

impl FilePattern {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let ast = parse(&pattern)?;
        let literals = ast.literals().map(str::to_string).collect();
        let ranges: Vec<Vec<RangeExpr>> = ast.blocks().map(|block| block.ranges.clone()).collect();
        trace!(pattern = %pattern, blocks = ranges.len(), "parsed file pattern");
        Ok(FilePattern {
            pattern,
            literals,
            ranges,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Raw text of each block, without delimiters
    pub fn blocks(&self) -> Vec<&str> {
        tokenize(&self.pattern).blocks
    }

    /// Number of filenames the pattern denotes, `None` if it overflows
    pub fn count(&self) -> Option<u64> {
        self.ranges.iter().try_fold(1u64, |acc, block| {
            let values = block.iter().try_fold(0u64, |sum, range| {
                sum.checked_add(range.last_index().checked_add(1)?)
            })?;
            acc.checked_mul(values)
        })
    }

    /// Enumerate every filename the pattern denotes.
    ///
    /// The first block varies slowest. Each call starts a fresh enumeration.
    pub fn filenames(&self) -> Filenames<'_> {
        Filenames {
            literals: &self.literals,
            ranges: &self.ranges,
            cursors: vec![Cursor::default(); self.ranges.len()],
            done: self.ranges.iter().any(Vec::is_empty),
        }
    }
}

impl FromStr for FilePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        FilePattern::new(s)
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Position within one block: which range, and which value of it
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    range: usize,
    index: u64,
}

/// Lazy cartesian product of a pattern's blocks
pub struct Filenames<'a> {
    literals: &'a [String],
    ranges: &'a [Vec<RangeExpr>],
    cursors: Vec<Cursor>,
    done: bool,
}

impl Filenames<'_> {
    // Odometer step: the last block turns fastest
    fn advance(&mut self) {
        for (cursor, block) in self.cursors.iter_mut().zip(self.ranges).rev() {
            let last = block.get(cursor.range).map_or(0, RangeExpr::last_index);
            if cursor.index < last {
                cursor.index += 1;
                return;
            }
            cursor.index = 0;
            if cursor.range + 1 < block.len() {
                cursor.range += 1;
                return;
            }
            cursor.range = 0;
        }
        self.done = true;
    }
}

impl Iterator for Filenames<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut name = String::new();
        for (i, literal) in self.literals.iter().enumerate() {
            name.push_str(literal);
            let (Some(block), Some(cursor)) = (self.ranges.get(i), self.cursors.get(i)) else {
                continue;
            };
            let Some(value) = block
                .get(cursor.range)
                .and_then(|range| range.nth_value(cursor.index))
            else {
                self.done = true;
                return None;
            };
            name.push_str(&value);
        }
        self.advance();
        Some(name)
    }
}

impl FusedIterator for Filenames<'_> {}

/// Parse a pattern and collect every filename it denotes
pub fn expand(pattern: &str) -> Result<Vec<String>> {
    Ok(FilePattern::new(pattern)?.filenames().collect())
}
