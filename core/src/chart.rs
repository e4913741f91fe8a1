//! Chart derivations over stored snapshots.
//!
//! A [`ChartBook`] is one user's pile of canonical weekly snapshots. Every
//! read view (the weekly chart with movement, dropped tracks, per-track
//! histories) is derived from the snapshots on demand and never stored
//! back; replacing a snapshot is enough to refresh everything.

use std::collections::{BTreeMap, HashMap, HashSet};

use top50_model::{
    ChartEntry, ChartImport, ImportEntry, PositionPoint, Track, TrackHistory, Week, WeekSet,
};

use crate::errors::ChartError;
use crate::series;

/// One user's chart snapshots, keyed by week.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartBook {
    snapshots: BTreeMap<Week, ChartImport>,
}

impl ChartBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the snapshot for the import's week, returning the
    /// snapshot it replaced.
    pub fn insert(&mut self, import: ChartImport) -> Option<ChartImport> {
        self.snapshots.insert(import.week, import)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The weeks with a snapshot.
    #[must_use]
    pub fn weeks(&self) -> WeekSet {
        self.snapshots.keys().copied().collect()
    }

    /// The most recent week with a snapshot.
    #[must_use]
    pub fn latest_week(&self) -> Option<Week> {
        self.snapshots.keys().next_back().copied()
    }

    /// The known week immediately before `week`. Gaps are fine: the
    /// predecessor of `2026-W03` can be `2026-W01`.
    #[must_use]
    pub fn previous_week(&self, week: Week) -> Option<Week> {
        self.snapshots.range(..week).next_back().map(|(w, _)| *w)
    }

    /// The chart for `week`: chartable entries sorted by placement, each
    /// with the track's placement on the previous known week attached.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::WeekNotFound`] if the week has no snapshot.
    #[tracing::instrument(skip(self))]
    pub fn entries_for(&self, week: Week) -> Result<Vec<ChartEntry>, ChartError> {
        let snapshot = self
            .snapshots
            .get(&week)
            .ok_or(ChartError::WeekNotFound(week))?;

        let previous_positions: HashMap<&str, u32> = self
            .previous_week(week)
            .and_then(|previous| self.snapshots.get(&previous))
            .map(|previous| {
                previous
                    .entries
                    .iter()
                    .filter_map(|entry| Some((entry.track_id.as_str(), charted(entry)?)))
                    .collect()
            })
            .unwrap_or_default();

        let mut entries: Vec<ChartEntry> = snapshot
            .entries
            .iter()
            .filter_map(|entry| {
                let position = charted(entry)?;
                Some(ChartEntry {
                    week,
                    position,
                    track: entry.track(),
                    previous_position: previous_positions.get(entry.track_id.as_str()).copied(),
                })
            })
            .collect();
        entries.sort_unstable_by_key(|entry| entry.position);

        Ok(entries)
    }

    /// The tracks that were on the previous known week's chart but are not
    /// on this week's, with the position they last held. A week with no
    /// predecessor has dropped nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::WeekNotFound`] if the week has no snapshot.
    #[tracing::instrument(skip(self))]
    pub fn dropped_for(&self, week: Week) -> Result<Vec<ChartEntry>, ChartError> {
        let current = self.entries_for(week)?;
        let Some(previous) = self.previous_week(week) else {
            return Ok(Vec::new());
        };
        let previous_entries = self.entries_for(previous)?;
        Ok(series::dropped_tracks(&current, &previous_entries))
    }

    /// Every placement `track_id` ever had in this book, ordered by week
    /// ascending. Track metadata comes from the first week the track was
    /// seen; later weeks may carry fresher artwork but the identity stays.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::TrackNotFound`] if the track never charted.
    #[tracing::instrument(skip(self))]
    pub fn history_of(&self, track_id: &str) -> Result<TrackHistory, ChartError> {
        let mut track: Option<Track> = None;
        let mut history = Vec::new();

        for (week, snapshot) in &self.snapshots {
            for entry in &snapshot.entries {
                if entry.track_id != track_id {
                    continue;
                }
                let Some(position) = charted(entry) else {
                    continue;
                };
                if track.is_none() {
                    track = Some(entry.track());
                }
                history.push(PositionPoint {
                    week: *week,
                    position,
                });
                break;
            }
        }

        match track {
            Some(track) => Ok(TrackHistory { track, history }),
            None => Err(ChartError::TrackNotFound(track_id.to_owned())),
        }
    }

    /// Every distinct track that ever charted, in first-seen order.
    #[must_use]
    pub fn tracks(&self) -> Vec<Track> {
        let mut seen = HashSet::new();
        let mut tracks = Vec::new();
        for snapshot in self.snapshots.values() {
            for entry in &snapshot.entries {
                if charted(entry).is_none() {
                    continue;
                }
                if seen.insert(entry.track_id.clone()) {
                    tracks.push(entry.track());
                }
            }
        }
        tracks
    }
}

impl FromIterator<ChartImport> for ChartBook {
    fn from_iter<I: IntoIterator<Item = ChartImport>>(iter: I) -> Self {
        let mut book = Self::new();
        for import in iter {
            book.insert(import);
        }
        book
    }
}

/// The read-time validity filter: an entry charts only with a placement, a
/// non-blank track id, and a real title. The title is checked trimmed, so a
/// padded placeholder stays off the chart too. Import keeps such entries in
/// the snapshot; every derivation ignores them.
fn charted(entry: &ImportEntry) -> Option<u32> {
    let position = entry.placement?;
    if entry.track_id.trim().is_empty() {
        return None;
    }
    let title = entry.title.trim();
    if title.is_empty() || title == "—" {
        return None;
    }
    Some(position)
}
