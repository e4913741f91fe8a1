//! Shared data model for the top50 chart tools.
//!
//! Everything that both the import normalizer and the series aligner need to
//! agree on lives here: the canonical week token, tracks, chart entries and
//! their week-over-week movement, position histories, and the canonical
//! import document.

pub mod entry;
pub mod history;
pub mod import;
pub mod track;
pub mod week;

pub use entry::{ChartEntry, Movement};
pub use history::{PositionPoint, TrackHistory};
pub use import::{ChartImport, ImportEntry};
pub use track::{Track, TrackId};
pub use week::{Week, WeekSet};
