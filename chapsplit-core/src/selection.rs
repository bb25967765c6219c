//! Chapter selection expressions.
//!
//! An expression is a comma-separated list of terms over chapter ids:
//!
//! | term  | matches              |
//! |-------|----------------------|
//! | `N`   | exactly `N`          |
//! | `A-B` | `A..=B`              |
//! | `A-`  | `A` and above        |
//! | `-B`  | `0..=B`              |
//!
//! Whitespace is ignored. A compiled [`ChapterSelection`] turns into a
//! [`ChapterFilter`] that excludes every chapter the expression does not
//! match.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::config::ChapterFilter;
use crate::error::{CoreError, CoreResult};

/// A parsed selection expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSelection {
    expression: String,
    ranges: Vec<RangeInclusive<u64>>,
}

impl ChapterSelection {
    pub fn parse(expression: &str) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidSelection {
            expression: expression.to_string(),
            reason,
        };

        let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(invalid("expression is empty".to_string()));
        }

        let ranges = compact
            .split(',')
            .map(|term| parse_term(term).map_err(&invalid))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            expression: expression.to_string(),
            ranges,
        })
    }

    /// Returns `true` if `id` falls in any term of the expression.
    pub fn matches(&self, id: u64) -> bool {
        self.ranges.iter().any(|r| r.contains(&id))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Converts the selection into an exclusion filter for `OutFileOpts`.
    pub fn into_filter(self) -> ChapterFilter {
        let description = format!("Select by chapter ID ({})", self.expression);
        ChapterFilter::new(description, move |chapter| !self.matches(chapter.id))
    }
}

impl FromStr for ChapterSelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_term(term: &str) -> Result<RangeInclusive<u64>, String> {
    if term.is_empty() {
        return Err("empty term".to_string());
    }

    let Some((lo, hi)) = term.split_once('-') else {
        let n = parse_id(term)?;
        return Ok(n..=n);
    };

    let lo = if lo.is_empty() { 0 } else { parse_id(lo)? };
    let hi = if hi.is_empty() { u64::MAX } else { parse_id(hi)? };
    if lo > hi {
        return Err(format!("range '{term}' is reversed"));
    }
    if term == "-" {
        return Err("range without bounds".to_string());
    }
    Ok(lo..=hi)
}

fn parse_id(text: &str) -> Result<u64, String> {
    text.parse::<u64>()
        .map_err(|_| format!("'{text}' is not a chapter number"))
}
