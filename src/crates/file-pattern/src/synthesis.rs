//! Synthesis of patterns from observed filenames
//!
//! [`find_numeric_pattern`] takes a representative name and locates its digit
//! runs. For each run it collects the values seen at that position across all
//! names, and [`build_numeric_block`] compresses each value set into the
//! fewest constant-step ranges that reproduce it exactly, padding included.

use crate::error::{PatternError, Result};
use crate::expander::FilePattern;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Characters with a meaning inside a block
const RESERVED: [char; 5] = ['<', '>', ',', ':', '-'];

/// A digit run and its numeric value.
///
/// Values share the `u64` limit of range endpoints, so every interval built
/// from them expands again.
#[derive(Debug, Clone, Copy)]
struct Observed<'a> {
    text: &'a str,
    value: u64,
}

impl<'a> Observed<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = text.parse().ok()?;
        Some(Observed { text, value })
    }

    /// Written without leading zeros
    fn is_plain(&self) -> bool {
        self.text.len() == 1 || !self.text.starts_with('0')
    }
}

/// Numeric ordering for digit strings that may not fit in an integer
fn numeric_key(text: &str) -> (usize, &str) {
    let trimmed = text.trim_start_matches('0');
    (trimmed.len(), trimmed)
}

/// Index of the first value of the longest constant-step run ending at `last`.
///
/// A run only grows while expanding `first-last` would write every member
/// exactly as observed: equal endpoint widths pad every value to that width,
/// unequal widths write every value without padding.
fn run_start(values: &[Observed<'_>], last: usize) -> usize {
    if last == 0 {
        return 0;
    }
    let step = values[last].value - values[last - 1].value;
    if step == 0 {
        return last;
    }

    let width = values[last].text.len();
    let mut all_padded = true;
    let mut all_plain = values[last].is_plain();
    let mut start = last;

    while start > 0 {
        let candidate = values[start - 1];
        if values[start].value - candidate.value != step {
            break;
        }
        let padded = all_padded && candidate.text.len() == width;
        let plain = all_plain && candidate.is_plain();
        let faithful = if candidate.text.len() == width {
            padded
        } else {
            plain
        };
        if !faithful {
            break;
        }
        all_padded = padded;
        all_plain = plain;
        start -= 1;
    }
    start
}

fn format_interval(run: &[Observed<'_>]) -> String {
    match run {
        [] => String::new(),
        [single] => single.text.to_string(),
        [first, second, ..] => {
            let last = run[run.len() - 1];
            let step = second.value - first.value;
            if step > 1 {
                format!("{}-{}:{}", first.text, last.text, step)
            } else {
                format!("{}-{}", first.text, last.text)
            }
        }
    }
}

/// Group sorted values into intervals, scanning backwards from the largest
fn intervals(values: &[Observed<'_>]) -> Vec<String> {
    let mut intervals = Vec::new();
    let mut end = values.len();

    while end > 0 {
        let last = end - 1;
        let mut start = run_start(values, last);
        // A pair whose lower value heads a longer run to its left gives
        // that value up and closes as a single value instead.
        if end - start == 2 && start >= 2 && run_start(values, start) + 2 <= start {
            start = last;
        }
        intervals.push(format_interval(&values[start..end]));
        end = start;
    }

    intervals.reverse();
    intervals
}

/// Compress a set of digit strings into a block.
///
/// No values give an empty string and a single value is returned verbatim.
/// Two values become `<a,b>`; more are grouped into constant-step ranges.
///
/// ```
/// use file_pattern::build_numeric_block;
///
/// assert_eq!(build_numeric_block(["1", "2", "3", "4"]), "<1-4>");
/// assert_eq!(build_numeric_block(["10", "1", "5", "3"]), "<1-5:2,10>");
/// assert_eq!(build_numeric_block(["7"]), "7");
/// ```
pub fn build_numeric_block<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let distinct: BTreeSet<String> = values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect();

    match distinct.len() {
        0 => return String::new(),
        1 => return distinct.into_iter().next().unwrap_or_default(),
        _ => {}
    }

    let parsed: Option<Vec<Observed<'_>>> = distinct.iter().map(|t| Observed::parse(t)).collect();
    let Some(mut sorted) = parsed else {
        debug!(count = distinct.len(), "values do not fit a range, listing them");
        let mut texts: Vec<&str> = distinct.iter().map(String::as_str).collect();
        texts.sort_by(|a, b| numeric_key(a).cmp(&numeric_key(b)).then_with(|| a.cmp(b)));
        return format!("<{}>", texts.join(","));
    };
    sorted.sort_by(|a, b| a.value.cmp(&b.value).then_with(|| a.text.cmp(b.text)));

    if sorted.len() == 2 {
        return format!("<{},{}>", sorted[0].text, sorted[1].text);
    }
    format!("<{}>", intervals(&sorted).join(","))
}

fn check_reserved(value: &str, reserved: &[char]) -> Result<()> {
    if let Some(ch) = value.chars().find(|c| reserved.contains(c)) {
        return Err(PatternError::ReservedCharacter {
            value: value.to_string(),
            ch,
        });
    }
    if let Some(ch) = value
        .chars()
        .next()
        .filter(|c| c.is_whitespace())
        .or_else(|| value.chars().last().filter(|c| c.is_whitespace()))
    {
        return Err(PatternError::ReservedCharacter {
            value: value.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Build a block listing arbitrary tokens, such as channel names.
///
/// Values are sorted and deduplicated. A single value is returned verbatim.
/// Values that the block grammar could not read back are rejected.
pub fn build_literal_block<I>(values: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let distinct: BTreeSet<String> = values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect();

    match distinct.len() {
        0 => Ok(String::new()),
        1 => {
            let value = distinct.into_iter().next().unwrap_or_default();
            check_reserved(&value, &['<', '>'])?;
            Ok(value)
        }
        _ => {
            for value in &distinct {
                check_reserved(value, &RESERVED)?;
            }
            let values: Vec<&str> = distinct.iter().map(String::as_str).collect();
            Ok(format!("<{}>", values.join(",")))
        }
    }
}

/// Synthesize a pattern covering `names`, using `base` as the template.
///
/// Every digit run of `base` is matched against all names with the
/// surrounding text of `base` held fixed. Names that do not match at a
/// position are left out of that position's values; the result is not
/// checked against `names` (see [`verify_round_trip`]).
pub fn find_numeric_pattern<S: AsRef<str>>(names: &[S], base: &str) -> Result<String> {
    if names.len() < 2 {
        return Ok(base.to_string());
    }
    let digits = Regex::new(r"[0-9]+")?;
    let runs: Vec<_> = digits.find_iter(base).collect();
    let Some(first) = runs.first() else {
        return Ok(base.to_string());
    };

    let mut pattern = base[..first.start()].to_string();
    for (i, run) in runs.iter().enumerate() {
        let matcher = Regex::new(&format!(
            "^{}([0-9]+){}$",
            regex::escape(&base[..run.start()]),
            regex::escape(&base[run.end()..]),
        ))?;

        let mut observed = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            match matcher.captures(name).and_then(|c| c.get(1)) {
                Some(value) => {
                    observed.insert(value.as_str());
                }
                None => debug!(name, position = i, "name does not match base, skipped"),
            }
        }

        let block = build_numeric_block(&observed);
        debug!(position = i, values = observed.len(), block = %block, "synthesized block");
        pattern.push_str(&block);

        let next_start = runs.get(i + 1).map_or(base.len(), |next| next.start());
        pattern.push_str(&base[run.end()..next_start]);
    }
    Ok(pattern)
}

/// Synthesize a pattern using the first name as the template
pub fn synthesize<S: AsRef<str>>(names: &[S]) -> Result<String> {
    match names.first() {
        Some(base) => find_numeric_pattern(names, base.as_ref()),
        None => Ok(String::new()),
    }
}

/// Check that `pattern` expands to exactly the given names
pub fn verify_round_trip<I>(pattern: &str, names: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let expected: BTreeSet<String> = names
        .into_iter()
        .map(|n| n.as_ref().to_string())
        .collect();
    let produced: BTreeSet<String> = FilePattern::new(pattern)?.filenames().collect();

    if expected == produced {
        return Ok(());
    }
    Err(PatternError::RoundTrip {
        pattern: pattern.to_string(),
        missing: expected.difference(&produced).cloned().collect(),
        unexpected: produced.difference(&expected).cloned().collect(),
    })
}
