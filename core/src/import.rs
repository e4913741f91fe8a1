//! The import normalizer.
//!
//! Chart snapshots arrive as JSON of uneven quality: bare lists instead of
//! documents, renamed fields, scalar artists, placements hiding behind
//! synonyms, mangled week tokens. This module repairs what it can into the
//! canonical [`ChartImport`] shape and reports every repair it makes, so a
//! caller can show what changed before anything is persisted.
//!
//! Repair never fails a document over one bad entry; entries that cannot
//! chart at all are dropped. Only a document with no entries list, or one
//! where nothing survives, is an error.

use serde_json::{Map, Value};

use top50_model::{ChartImport, ImportEntry, Week};

use crate::errors::NormalizeError;

/// A repaired import document plus the log of what was repaired.
///
/// The corrections are display strings in application order, advisory only;
/// nothing downstream should parse them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub document: ChartImport,
    pub corrections: Vec<String>,
}

/// Repair a raw JSON document into a canonical chart import.
///
/// `fallback_week` stands in when the document carries no usable week of its
/// own; without one, the current week does.
///
/// Normalizing an already canonical document returns it unchanged with an
/// empty correction log.
///
/// # Errors
///
/// * [`NormalizeError::MissingEntriesList`] if the root is neither a list
///   nor an object with an `entries` list.
/// * [`NormalizeError::NoValidEntries`] if every entry was dropped.
#[tracing::instrument(skip(raw))]
pub fn normalize(raw: &Value, fallback_week: Option<Week>) -> Result<Normalized, NormalizeError> {
    let mut corrections = Vec::new();

    let (raw_entries, raw_week) = match raw {
        Value::Array(entries) => {
            corrections.push("wrapped top-level list in an entries object".to_owned());
            (entries.as_slice(), None)
        }
        Value::Object(document) => (
            document
                .get("entries")
                .and_then(Value::as_array)
                .ok_or(NormalizeError::MissingEntriesList)?
                .as_slice(),
            document.get("week"),
        ),
        _ => return Err(NormalizeError::MissingEntriesList),
    };

    let entries: Vec<ImportEntry> = raw_entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| repair_entry(index, entry, &mut corrections))
        .collect();
    if entries.is_empty() {
        return Err(NormalizeError::NoValidEntries);
    }

    let week = resolve_week(raw_week, fallback_week, &mut corrections);

    tracing::debug!(
        %week,
        entries = entries.len(),
        corrections = corrections.len(),
        "normalized import document"
    );

    Ok(Normalized {
        document: ChartImport { week, entries },
        corrections,
    })
}

/// Like [`normalize`], starting from raw text.
///
/// # Errors
///
/// As [`normalize`], plus [`NormalizeError::MalformedRootJson`] if the text
/// is not JSON at all.
pub fn normalize_str(raw: &str, fallback_week: Option<Week>) -> Result<Normalized, NormalizeError> {
    let value: Value = serde_json::from_str(raw)?;
    normalize(&value, fallback_week)
}

/// Repair one entry, or drop it.
///
/// `None` means the entry cannot chart at all: not an object, no track id,
/// or no real title (empty, blank, or the `—` placeholder the scraper emits
/// for rows it could not read). Repairs run before the drop rule, so the
/// drop itself adds no log line but any repairs the entry went through stay
/// in the log.
fn repair_entry(index: usize, raw: &Value, corrections: &mut Vec<String>) -> Option<ImportEntry> {
    // correction lines are 1-based
    let n = index + 1;
    let raw = raw.as_object()?;

    let track_id =
        aliased_field(raw, "track_id", "trackId", n, corrections).and_then(scalar_to_string);
    let placement = placement_of(raw, n, corrections);
    let artists = artists_of(raw.get("artists"), n, corrections);
    let spotify_url = aliased_field(raw, "spotify_url", "spotifyUrl", n, corrections)
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    let image_url = raw
        .get("image_url")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);

    let track_id = track_id?;
    let title = raw.get("title").and_then(Value::as_str)?;
    if title.trim().is_empty() || title == "—" {
        return None;
    }

    Some(ImportEntry {
        placement,
        track_id,
        title: title.to_owned(),
        artists,
        spotify_url,
        image_url,
    })
}

/// A value that counts as present under the repair rules: not missing, not
/// null, not an empty string.
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        other => other,
    }
}

/// Read `canonical` from the entry, falling back to its legacy alias. Using
/// the alias is logged; a present canonical value always wins silently.
fn aliased_field<'a>(
    entry: &'a Map<String, Value>,
    canonical: &str,
    alias: &str,
    n: usize,
    corrections: &mut Vec<String>,
) -> Option<&'a Value> {
    if let Some(value) = present(entry.get(canonical)) {
        return Some(value);
    }
    let value = present(entry.get(alias))?;
    corrections.push(format!("entry {n}: {alias} -> {canonical}"));
    Some(value)
}

/// Scalars the repair rules are willing to read as text.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Find the entry's placement, trying the canonical field first and then
/// the known synonyms in order. A synonym in use is logged; a null or blank
/// synonym is passed over. An entry can still end up with no placement at
/// all, it imports anyway and gets filtered once charts are derived.
fn placement_of(entry: &Map<String, Value>, n: usize, corrections: &mut Vec<String>) -> Option<u32> {
    // an unusable placement (null, blank, non-numeric) counts as missing
    // and does not suppress the synonyms
    if let Some(placement) = entry.get("placement").and_then(placement_value) {
        return Some(placement);
    }
    for synonym in ["position", "rank"] {
        if let Some(value) = present(entry.get(synonym)) {
            corrections.push(format!("entry {n}: {synonym} -> placement"));
            return placement_value(value);
        }
    }
    None
}

/// Placements arrive as numbers or numeric strings. Strings have always
/// been accepted quietly, so no correction is logged for them.
fn placement_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(placement) => u32::try_from(placement).ok(),
            // tolerate whole-number floats like 3.0
            None => number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce the artists field into a list of names.
///
/// A missing or null field has always meant "no artists" and stays silent;
/// a scalar is wrapped into a single-element list and logged.
fn artists_of(value: Option<&Value>, n: usize, corrections: &mut Vec<String>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(scalar) => {
            corrections.push(format!("entry {n}: artists was not a list, wrapped it"));
            scalar_to_string(scalar).map_or_else(Vec::new, |name| vec![name])
        }
    }
}

/// Resolve the document week: canonical passes untouched, a recognizable
/// variant is repaired and logged, anything else falls back.
fn resolve_week(raw: Option<&Value>, fallback: Option<Week>, corrections: &mut Vec<String>) -> Week {
    if let Some(text) = raw.and_then(Value::as_str) {
        if let Ok(week) = text.parse::<Week>() {
            return week;
        }
    }

    // bare numbers like 202605 are worth a repair attempt too
    let loose = match raw {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };
    if let Some(source) = &loose {
        if let Some(week) = Week::repair(source) {
            corrections.push(format!("week {source:?} -> \"{week}\""));
            return week;
        }
    }

    let week = fallback.unwrap_or_else(Week::today);
    corrections.push(format!("week missing or invalid, used {week}"));
    week
}
