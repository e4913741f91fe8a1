//! One row of a weekly chart.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{track::Track, week::Week};

/// A track's placement on one user's chart for one week.
///
/// `previous_position` is the same track's placement on the immediately
/// preceding known week, or `None` when the track was not on that chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub week: Week,
    pub position: u32,
    pub track: Track,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_position: Option<u32>,
}

impl ChartEntry {
    /// Week-over-week movement of this entry.
    #[must_use]
    pub fn movement(&self) -> Movement {
        Movement::classify(self.previous_position, self.position)
    }
}

/// How an entry moved relative to the previous week.
///
/// Position 1 is the top of the chart, so moving towards smaller numbers is
/// moving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Not on the previous week's chart at all.
    New,
    /// Climbed by the given number of positions.
    Up(u32),
    /// Fell by the given number of positions.
    Down(u32),
    /// Same position as the previous week.
    Unchanged,
}

impl Movement {
    /// Classify a move from `previous` to `current`.
    #[must_use]
    pub fn classify(previous: Option<u32>, current: u32) -> Self {
        match previous {
            None => Self::New,
            Some(previous) => match previous.cmp(&current) {
                Ordering::Greater => Self::Up(previous - current),
                Ordering::Less => Self::Down(current - previous),
                Ordering::Equal => Self::Unchanged,
            },
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Up(delta) => write!(f, "up {delta}"),
            Self::Down(delta) => write!(f, "down {delta}"),
            Self::Unchanged => write!(f, "steady"),
        }
    }
}
