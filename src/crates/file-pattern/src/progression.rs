//! Range expressions and the progressions they expand to
//!
//! A range expression is either a literal token (`FD6`) or `start-stop`,
//! optionally followed by `:step`. Numeric (`01-12`) and letter (`a-f`) ranges
//! share the same stepping logic; they only differ in how an index is rendered.

use crate::ast::RangeExpr;
use crate::error::RangeError;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALPHABET_LEN: u8 = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    fn of(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(LetterCase::Upper)
        } else if c.is_ascii_lowercase() {
            Some(LetterCase::Lower)
        } else {
            None
        }
    }

    fn first(self) -> u8 {
        match self {
            LetterCase::Upper => b'A',
            LetterCase::Lower => b'a',
        }
    }
}

/// An ordered, finite arithmetic progression with an inclusive stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progression {
    /// Decimal integers, zero-padded to `width` when set
    Numeric {
        start: u64,
        stop: u64,
        step: u64,
        width: Option<usize>,
    },
    /// Letters of one case; `start` and `stop` index into the alphabet
    Alphabetic {
        case: LetterCase,
        start: u8,
        stop: u8,
        step: u64,
    },
}

impl Progression {
    fn bounds(&self) -> (u64, u64, u64) {
        match *self {
            Progression::Numeric {
                start, stop, step, ..
            } => (start, stop, step),
            Progression::Alphabetic {
                start, stop, step, ..
            } => (u64::from(start), u64::from(stop), step),
        }
    }

    fn render(&self, index: u64) -> String {
        match *self {
            Progression::Numeric {
                width: Some(width), ..
            } => format!("{:0width$}", index, width = width),
            Progression::Numeric { width: None, .. } => index.to_string(),
            Progression::Alphabetic { case, .. } => {
                // index < 26 by construction
                char::from(case.first() + index as u8).to_string()
            }
        }
    }

    pub fn step(&self) -> u64 {
        self.bounds().2
    }

    /// Index of the last value; one less than the number of values
    pub fn last_index(&self) -> u64 {
        let (start, stop, step) = self.bounds();
        (stop - start) / step
    }

    /// Number of values in the progression, saturating at `u64::MAX`
    pub fn len(&self) -> u64 {
        self.last_index().saturating_add(1)
    }

    /// The value at `index`, if the progression reaches that far
    pub fn nth_value(&self, index: u64) -> Option<String> {
        let (start, stop, step) = self.bounds();
        let value = index.checked_mul(step)?.checked_add(start)?;
        (value <= stop).then(|| self.render(value))
    }

    /// A progression always holds at least its start value
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn values(&self) -> Values<'_> {
        let (start, _, _) = self.bounds();
        Values {
            progression: self,
            next: Some(start),
        }
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, stop, step) = self.bounds();
        write!(f, "{}-{}", self.render(start), self.render(stop))?;
        if step != 1 {
            write!(f, ":{}", step)?;
        }
        Ok(())
    }
}

/// Iterator over the rendered values of a [`Progression`]
pub struct Values<'a> {
    progression: &'a Progression,
    next: Option<u64>,
}

impl Iterator for Values<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let current = self.next?;
        let (_, stop, step) = self.progression.bounds();
        self.next = current.checked_add(step).filter(|n| *n <= stop);
        Some(self.progression.render(current))
    }
}

impl std::iter::FusedIterator for Values<'_> {}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn parse_step(text: &str) -> Result<u64, RangeError> {
    let text = text.trim();
    let step: i64 = text
        .parse()
        .map_err(|_| RangeError::malformed_step(text))?;
    if step < 1 {
        return Err(RangeError::NonPositiveStep { step });
    }
    Ok(step as u64)
}

fn numeric(range: &str, start: &str, stop: &str, step: u64) -> Result<Progression, RangeError> {
    if !is_numeric(stop) {
        return Err(RangeError::non_literal(range));
    }
    // Endpoints beyond u64 cannot be stepped through
    let (Ok(first), Ok(last)) = (start.parse::<u64>(), stop.parse::<u64>()) else {
        return Err(RangeError::non_literal(range));
    };
    if last < first {
        return Err(RangeError::inverted(range));
    }
    let width = (start.len() == stop.len()).then_some(start.len());
    Ok(Progression::Numeric {
        start: first,
        stop: last,
        step,
        width,
    })
}

fn alphabetic(range: &str, start: &str, stop: &str, step: u64) -> Result<Progression, RangeError> {
    let (Some(first), Some(last)) = (single_char(start), single_char(stop)) else {
        return Err(RangeError::non_literal(range));
    };
    let (Some(case), Some(stop_case)) = (LetterCase::of(first), LetterCase::of(last)) else {
        return Err(RangeError::non_literal(range));
    };
    if case != stop_case {
        return Err(RangeError::mixed_case(range));
    }
    let first = first as u8 - case.first();
    let last = last as u8 - case.first();
    debug_assert!(first < ALPHABET_LEN && last < ALPHABET_LEN);
    if last < first {
        return Err(RangeError::inverted(range));
    }
    Ok(Progression::Alphabetic {
        case,
        start: first,
        stop: last,
        step,
    })
}

/// Parse one comma-free range expression.
///
/// The `:step` suffix is split off at the last colon and applies to ranges;
/// a literal token accepts (and ignores) a valid step. Whitespace around the
/// step and both endpoints is ignored, and padding is taken from the trimmed
/// endpoints.
pub fn parse_range(expr: &str) -> Result<RangeExpr, RangeError> {
    let (range, step) = match expr.rsplit_once(':') {
        Some((range, step)) => (range, parse_step(step)?),
        None => (expr, 1),
    };
    let range = range.trim();

    let Some((start, stop)) = range.split_once('-') else {
        return Ok(RangeExpr::Literal(range.to_string()));
    };
    let (start, stop) = (start.trim(), stop.trim());

    let progression = if is_numeric(start) {
        numeric(range, start, stop, step)?
    } else {
        alphabetic(range, start, stop, step)?
    };
    Ok(RangeExpr::Range(progression))
}

/// Expand one range expression into its ordered values.
///
/// ```
/// use file_pattern::expand_range;
///
/// assert_eq!(expand_range("03-07").unwrap(), ["03", "04", "05", "06", "07"]);
/// assert_eq!(expand_range("1-5:2").unwrap(), ["1", "3", "5"]);
/// assert!(expand_range("c-a").is_err());
/// ```
pub fn expand_range(expr: &str) -> Result<Vec<String>, RangeError> {
    Ok(parse_range(expr)?.values())
}

/// Split block text on commas and parse every range in order
pub fn parse_block(block: &str) -> Result<Vec<RangeExpr>, RangeError> {
    block.split(',').map(|expr| parse_range(expr.trim())).collect()
}

/// Expand the text of a block, concatenating each range's values.
///
/// Sub-ranges are assumed disjoint; duplicates are kept.
pub fn expand_block(block: &str) -> Result<Vec<String>, RangeError> {
    Ok(parse_block(block)?
        .iter()
        .flat_map(RangeExpr::values)
        .collect())
}
