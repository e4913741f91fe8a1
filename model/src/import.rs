//! The canonical chart import document.
//!
//! This is the shape imports are repaired into before anything downstream
//! touches them. Entry fields keep the snake_case names of the snapshot
//! files (`track_id`, `spotify_url`, `image_url`), unlike the camelCase
//! read-side payloads.

use serde::{Deserialize, Serialize};

use crate::{
    track::{Track, TrackId},
    week::Week,
};

/// One weekly chart snapshot for one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartImport {
    pub week: Week,
    pub entries: Vec<ImportEntry>,
}

/// One entry of an import document.
///
/// `placement` stays optional here: an entry that arrived without a usable
/// placement is kept in the snapshot and only filtered out when a chart is
/// derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<u32>,
    pub track_id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ImportEntry {
    /// The track metadata this entry carries. The snapshot keeps whatever
    /// padding the title arrived with; it is served trimmed.
    #[must_use]
    pub fn track(&self) -> Track {
        Track {
            id: self.track_id.clone(),
            title: self.title.trim().to_owned(),
            artists: self.artists.clone(),
            spotify_url: self.spotify_url.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
