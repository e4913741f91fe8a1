//! A track as it appears on a chart.

use serde::{Deserialize, Serialize};

/// The scrape-stable identifier of a track.
///
/// The same track keeps the same id across weeks, which is what makes
/// position histories possible.
pub type TrackId = String;

/// Track metadata carried by every chart entry.
///
/// Wire names are camelCase (`spotifyUrl`, `imageUrl`), matching the read
/// API payloads. The import documents use their own snake_case names, see
/// [`crate::import::ImportEntry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    /// Credited artists, in billing order.
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Track {
    /// The full display label, `Title - Artist1, Artist2`.
    ///
    /// Falls back to the bare title when no artists are credited.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.artists.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artists.join(", "))
        }
    }
}
