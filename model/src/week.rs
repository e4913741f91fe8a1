//! The canonical chart week token, `YYYY-Www`.

use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read a week token in strict canonical form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekParseError {
    #[error("week token must look like YYYY-Www, got {0:?}")]
    Shape(String),
    #[error("week number must be between 01 and 53, got {0}")]
    Range(u8),
}

/// A chart week in canonical `YYYY-Www` form, e.g. `2026-W05`.
///
/// Ordering is chronological: year first, then week number. The week number
/// is always zero-padded, so chronological order and lexicographic order of
/// the token agree.
///
/// Serializes as the canonical token and deserializes strictly from it;
/// anything looser has to go through [`Week::repair`] first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Week {
    year: u16,
    number: u8,
}

impl Week {
    /// Build a week from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the week number is outside `01..=53`.
    pub fn new(year: u16, number: u8) -> Result<Self, WeekParseError> {
        if (1..=53).contains(&number) {
            Ok(Self { year, number })
        } else {
            Err(WeekParseError::Range(number))
        }
    }

    #[must_use]
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    #[inline]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Salvage a week token that is not in canonical form.
    ///
    /// Accepts a 4 digit year, an optional `-` or space separator, an
    /// optional `W` in either case, and a 1-2 digit week number, so
    /// `2026 5`, `2026-5`, `2026-w05`, and `202605` all repair to
    /// `2026-W05`. Anything else, including week numbers outside `01..=53`,
    /// is refused.
    #[must_use]
    pub fn repair(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let year_part = trimmed.get(..4)?;
        let rest = trimmed.get(4..)?;
        if !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let rest = rest.strip_prefix(['-', ' ']).unwrap_or(rest);
        let rest = rest.strip_prefix(['W', 'w']).unwrap_or(rest);
        if rest.is_empty() || rest.len() > 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = year_part.parse().ok()?;
        let number = rest.parse().ok()?;
        Self::new(year, number).ok()
    }

    /// The week containing `date`, by the chart's own reckoning: week N
    /// covers days `(N-1)*7 + 1 ..= N*7` of the year.
    ///
    /// This is deliberately not ISO 8601 week numbering; imported charts
    /// have always been keyed by this day-of-year approximation.
    #[must_use]
    pub fn containing(date: chrono::NaiveDate) -> Self {
        Self {
            // chart weeks only make sense for 4 digit years
            year: date.year().clamp(0, 9999) as u16,
            number: date.ordinal().div_ceil(7) as u8,
        }
    }

    /// The week containing today, used when an import has no usable week.
    #[must_use]
    pub fn today() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }
}

impl fmt::Display for Week {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.number)
    }
}

impl FromStr for Week {
    type Err = WeekParseError;

    /// Parse the canonical form only: 4 digits, `-W`, 2 digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 8
            || !bytes[0..4].iter().all(u8::is_ascii_digit)
            || bytes[4] != b'-'
            || bytes[5] != b'W'
            || !bytes[6..8].iter().all(u8::is_ascii_digit)
        {
            return Err(WeekParseError::Shape(s.to_owned()));
        }

        let year = s[0..4]
            .parse()
            .map_err(|_| WeekParseError::Shape(s.to_owned()))?;
        let number = s[6..8]
            .parse()
            .map_err(|_| WeekParseError::Shape(s.to_owned()))?;
        Self::new(year, number)
    }
}

impl Serialize for Week {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Week {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The distinct weeks known for one user, iterated in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSet(BTreeSet<Week>);

impl WeekSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a week, returning whether it was newly inserted.
    pub fn insert(&mut self, week: Week) -> bool {
        self.0.insert(week)
    }

    #[must_use]
    pub fn contains(&self, week: Week) -> bool {
        self.0.contains(&week)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending iteration, oldest week first. Reversible for views that
    /// want the most recent week on top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Week> + '_ {
        self.0.iter().copied()
    }

    /// The most recent known week.
    #[must_use]
    pub fn latest(&self) -> Option<Week> {
        self.0.last().copied()
    }
}

impl FromIterator<Week> for WeekSet {
    fn from_iter<I: IntoIterator<Item = Week>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WeekSet {
    type Item = &'a Week;
    type IntoIter = std::collections::btree_set::Iter<'a, Week>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
