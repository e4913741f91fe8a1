//! Per-track position history across weeks.

use serde::{Deserialize, Serialize};

use crate::{track::Track, week::Week};

/// One sampled chart placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPoint {
    pub week: Week,
    pub position: u32,
}

/// Every placement one track has ever had on one user's charts, ordered by
/// week ascending.
///
/// Weeks where the track did not chart simply have no point; the series
/// aligner turns those gaps into explicit absent cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackHistory {
    pub track: Track,
    pub history: Vec<PositionPoint>,
}

impl TrackHistory {
    /// The track's placement in `week`, if it charted that week.
    #[must_use]
    pub fn position_in(&self, week: Week) -> Option<u32> {
        self.history
            .iter()
            .find(|point| point.week == week)
            .map(|point| point.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn history() -> TrackHistory {
        TrackHistory {
            track: Track {
                id: "t1".to_owned(),
                title: "Solhem".to_owned(),
                artists: vec!["Miriam".to_owned()],
                spotify_url: None,
                image_url: None,
            },
            history: vec![
                PositionPoint {
                    week: "2026-W01".parse().unwrap(),
                    position: 12,
                },
                PositionPoint {
                    week: "2026-W03".parse().unwrap(),
                    position: 4,
                },
            ],
        }
    }

    #[test]
    fn test_position_in() {
        let history = history();
        assert_eq!(history.position_in("2026-W01".parse().unwrap()), Some(12));
        assert_eq!(history.position_in("2026-W02".parse().unwrap()), None);
        assert_eq!(history.position_in("2026-W03".parse().unwrap()), Some(4));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(history()).unwrap();
        assert_eq!(json["track"]["id"], "t1");
        assert_eq!(json["history"][0]["week"], "2026-W01");
        assert_eq!(json["history"][0]["position"], 12);
    }
}
