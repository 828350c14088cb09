//! Integer sequences from the OEIS.
//!
//! Sequences arrive as "b-files": plain text with one `index value` pair
//! per line plus `#` comments. This module parses them and defines the
//! [`SequenceSource`] seam that hands a sequence to the renderer. Network
//! retrieval is left to the caller; [`SequenceId::bfile_url`] gives the
//! address to download from.

mod source;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use thiserror::Error;

pub use source::{BFileDirectory, MemorySource, SequenceSource};

/// Errors from loading or checking a sequence.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("invalid sequence id '{0}', expected e.g. A000045 or 000045")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sequence {0} not found")]
    NotFound(SequenceId),

    #[error("query for {id} returned {count} results, expected 1")]
    Ambiguous { id: SequenceId, count: usize },

    #[error("requested {requested} but the record is A{found:06}")]
    IdMismatch { requested: SequenceId, found: u32 },

    #[error("b-file for {id} does not match the record data: expected '{expected}', got '{actual}'")]
    DataMismatch {
        id: SequenceId,
        expected: String,
        actual: String,
    },
}

pub type Result<T> = std::result::Result<T, SequenceError>;

/// Largest A-number the OEIS format allows (six digits).
const MAX_ID: u32 = 999_999;

/// An OEIS identifier such as `A000045`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(u32);

impl SequenceId {
    pub fn new(number: u32) -> Result<Self> {
        if number > MAX_ID {
            return Err(SequenceError::InvalidId(number.to_string()));
        }
        Ok(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    /// File name of the b-file, e.g. `b000045.txt`.
    pub fn bfile_name(&self) -> String {
        format!("b{:06}.txt", self.0)
    }

    pub fn bfile_url(&self) -> String {
        format!("https://oeis.org/{}/{}", self, self.bfile_name())
    }

    /// Search URL returning the sequence metadata as JSON.
    pub fn search_url(&self) -> String {
        format!("https://oeis.org/search?q=id:{}&fmt=json", self)
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{:06}", self.0)
    }
}

impl FromStr for SequenceId {
    type Err = SequenceError;

    /// Accepts `A000045`, `a45` or bare digits `000045`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('A')
            .or_else(|| trimmed.strip_prefix('a'))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SequenceError::InvalidId(s.to_string()));
        }
        let number = digits
            .parse()
            .map_err(|_| SequenceError::InvalidId(s.to_string()))?;
        Self::new(number)
    }
}

/// An ordered mapping from sequence index to term.
///
/// Indices follow the b-file (OEIS offsets mean they do not always start
/// at 0). Terms are `i128`; b-files for fast-growing sequences go beyond
/// that, see [`parse_bfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    pub id: Option<SequenceId>,
    pub terms: BTreeMap<i64, i128>,
}

impl Sequence {
    pub fn new(id: Option<SequenceId>, terms: BTreeMap<i64, i128>) -> Self {
        Self { id, terms }
    }

    pub fn from_values(id: Option<SequenceId>, offset: i64, values: &[i128]) -> Self {
        let terms = (offset..).zip(values.iter().copied()).collect();
        Self { id, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in index order.
    pub fn values(&self) -> Vec<i128> {
        self.terms.values().copied().collect()
    }

    pub fn first_index(&self) -> Option<i64> {
        self.terms.keys().next().copied()
    }

    /// True when no term is negative.
    pub fn is_positive(&self) -> bool {
        self.terms.values().all(|&v| v >= 0)
    }

    /// Smallest and largest absolute term, or `None` for an empty sequence.
    pub fn magnitude_range(&self) -> Option<(u128, u128)> {
        let mut mags = self.terms.values().map(|v| v.unsigned_abs());
        let first = mags.next()?;
        Some(mags.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m))))
    }
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+").expect("valid integer regex"))
}

/// Parse b-file text.
///
/// A line counts as a term when it holds exactly two integers, the index
/// and the value. Blank lines and `#` comments are ignored; any other line
/// is skipped and logged at debug level. A value too large for `i128`
/// ends the sequence, keeping the terms before it.
pub fn parse_bfile(id: Option<SequenceId>, text: &str) -> Sequence {
    let mut terms = BTreeMap::new();

    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let nums: Vec<&str> = integer_pattern()
            .find_iter(line)
            .map(|m| m.as_str())
            .collect();
        if nums.len() != 2 {
            debug!("strange text on line {}: '{}'", line_number, line);
            continue;
        }

        let Ok(index) = nums[0].parse::<i64>() else {
            debug!("index out of range on line {}: '{}'", line_number, line);
            continue;
        };
        let Ok(value) = nums[1].parse::<i128>() else {
            warn!(
                "term {} on line {} does not fit in 128 bits, keeping the first {} terms",
                index,
                line_number,
                terms.len()
            );
            break;
        };

        terms.insert(index, value);
    }

    Sequence { id, terms }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIBONACCI_HEAD: &str = "\
# A000045 (b-file synthesized from sequence entry)
0 0
1 1
2 1
3 2
4 3
5 5
";

    #[test]
    fn parses_id_forms() {
        let expected = SequenceId::new(45).unwrap();
        assert_eq!("A000045".parse::<SequenceId>().unwrap(), expected);
        assert_eq!("a45".parse::<SequenceId>().unwrap(), expected);
        assert_eq!("000045".parse::<SequenceId>().unwrap(), expected);
        assert_eq!(expected.to_string(), "A000045");
    }

    #[test]
    fn rejects_bad_ids() {
        for bad in ["", "A", "B000045", "A0000451", "12x", "-5"] {
            assert!(
                matches!(bad.parse::<SequenceId>(), Err(SequenceError::InvalidId(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn builds_urls() {
        let id: SequenceId = "A006968".parse().unwrap();
        assert_eq!(id.bfile_name(), "b006968.txt");
        assert_eq!(id.bfile_url(), "https://oeis.org/A006968/b006968.txt");
        assert_eq!(id.search_url(), "https://oeis.org/search?q=id:A006968&fmt=json");
    }

    #[test]
    fn parses_bfile_terms() {
        let seq = parse_bfile(None, FIBONACCI_HEAD);
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.first_index(), Some(0));
        assert_eq!(seq.values(), vec![0, 1, 1, 2, 3, 5]);
        assert!(seq.is_positive());
    }

    #[test]
    fn keeps_offsets_and_negatives() {
        let seq = parse_bfile(None, "1 1\n2 -2\n3 3\n4 -4\n");
        assert_eq!(seq.first_index(), Some(1));
        assert_eq!(seq.terms[&2], -2);
        assert!(!seq.is_positive());
        assert_eq!(seq.magnitude_range(), Some((1, 4)));
    }

    #[test]
    fn skips_strange_lines() {
        let text = "0 1\nthis line has 3 numbers 4 5\n\n1 2\n   \n2 3 4\n3 8\n";
        let seq = parse_bfile(None, text);
        assert_eq!(seq.values(), vec![1, 2, 8]);
    }

    #[test]
    fn stops_at_values_beyond_i128() {
        let text = "0 1\n1 2\n2 1000000000000000000000000000000000000000000\n3 4\n";
        let seq = parse_bfile(None, text);
        assert_eq!(seq.values(), vec![1, 2]);
    }

    #[test]
    fn from_values_uses_offset() {
        let seq = Sequence::from_values(None, 1, &[7, 8, 9]);
        assert_eq!(seq.first_index(), Some(1));
        assert_eq!(seq.terms[&3], 9);
    }

    #[test]
    fn empty_sequence_has_no_range() {
        assert_eq!(Sequence::default().magnitude_range(), None);
        assert!(parse_bfile(None, "# nothing\n").is_empty());
    }
}
