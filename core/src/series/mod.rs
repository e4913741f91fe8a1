//! The series aligner.
//!
//! Multi-track views need several position histories on one week axis.
//! Histories are sparse: a track only has points for the weeks it charted.
//! The aligner spreads each history over the caller's full week axis so
//! every series has a cell for every week, holding either the position or
//! an explicit absence.

pub mod palette;

use std::collections::HashSet;

use serde::Serialize;

use top50_model::{ChartEntry, TrackHistory, TrackId, Week, WeekSet};

/// One track's history spread over the full week axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSeries {
    pub track_id: TrackId,
    /// Full label, `Title - Artist1, Artist2`.
    pub label: String,
    /// Compact label, the title alone.
    pub short_label: String,
    /// Palette color for this series' position in the selection.
    pub color: &'static str,
    /// One cell per week of the axis. `None` means the track did not chart
    /// that week; absence is never encoded as a sentinel position.
    pub positions: Vec<Option<u32>>,
}

/// A dense week-by-track position matrix, rebuilt from scratch on every
/// change and never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSeriesTable {
    /// The week axis, ascending.
    pub weeks: Vec<Week>,
    pub series: Vec<AlignedSeries>,
}

/// Merge per-track histories into a dense week-aligned table.
///
/// `histories` is the caller's ordered selection: column order and palette
/// colors follow slice order and nothing else, so the same selection always
/// renders the same way. Histories that failed to load upstream are simply
/// not in the slice; the table still covers every week of `weeks`.
#[must_use]
#[tracing::instrument(skip_all, fields(tracks = histories.len(), weeks = weeks.len()))]
pub fn align(histories: &[TrackHistory], weeks: &WeekSet) -> AlignedSeriesTable {
    let week_axis: Vec<Week> = weeks.iter().collect();

    let series = histories
        .iter()
        .enumerate()
        .map(|(index, history)| AlignedSeries {
            track_id: history.track.id.clone(),
            label: history.track.display_name(),
            short_label: history.track.title.clone(),
            color: palette::color_for(index),
            // histories are small, a scan per cell is fine
            positions: week_axis
                .iter()
                .map(|week| history.position_in(*week))
                .collect(),
        })
        .collect();

    AlignedSeriesTable {
        weeks: week_axis,
        series,
    }
}

/// The entries that fell off the chart between `previous` and `current`.
///
/// Detection is by track id against the previous week's own entry list; the
/// `previous_position` fields on the current entries play no part. The
/// result keeps the previous week's entries, their position being where the
/// track last charted, ordered by that position.
#[must_use]
pub fn dropped_tracks(current: &[ChartEntry], previous: &[ChartEntry]) -> Vec<ChartEntry> {
    let still_charting: HashSet<&str> = current
        .iter()
        .map(|entry| entry.track.id.as_str())
        .collect();

    let mut dropped: Vec<ChartEntry> = previous
        .iter()
        .filter(|entry| !still_charting.contains(entry.track.id.as_str()))
        .cloned()
        .collect();
    dropped.sort_unstable_by_key(|entry| entry.position);
    dropped
}
