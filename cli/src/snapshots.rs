//! Snapshot files on disk.
//!
//! One directory per user under the data directory, one `YYYY-Www.json`
//! file per imported week. Files pass through the normalizer on load, so a
//! hand-edited or legacy snapshot still reads.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use top50_core::chart::ChartBook;
use top50_core::import;
use top50_model::Week;

/// The directory holding `user`'s weekly snapshot files.
#[must_use]
pub fn user_dir(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join(user.to_lowercase())
}

/// Load every weekly snapshot of `user` into a book.
///
/// Only files named by a canonical week token (`2026-W05.json`) are read;
/// anything else in the directory is ignored. A file that cannot be
/// repaired is skipped with a warning instead of failing the whole load.
///
/// # Errors
///
/// Fails only on filesystem problems: an unreadable directory or file.
pub fn load_book(data_dir: &Path, user: &str) -> anyhow::Result<ChartBook> {
    let dir = user_dir(data_dir, user);
    let mut book = ChartBook::new();

    if !dir.exists() {
        return Ok(book);
    }

    let entries = fs::read_dir(&dir)
        .with_context(|| format!("could not read the snapshot directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        let Some(week) = week_of(&path) else {
            continue;
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("could not read the snapshot {}", path.display()))?;

        match import::normalize_str(&contents, Some(week)) {
            Ok(normalized) => {
                if normalized.document.week != week {
                    log::warn!(
                        "{}: document says week {}, filename says {week}",
                        path.display(),
                        normalized.document.week,
                    );
                }
                if !normalized.corrections.is_empty() {
                    log::debug!(
                        "{}: applied {} corrections on load",
                        path.display(),
                        normalized.corrections.len(),
                    );
                }
                book.insert(normalized.document);
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }

    Ok(book)
}

/// The week a snapshot file is named after, if the name is canonical.
fn week_of(path: &Path) -> Option<Week> {
    if !path.extension().is_some_and(|ext| ext == "json") {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
