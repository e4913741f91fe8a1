use anyhow::Context;

use top50_core::chart::ChartBook;
use top50_core::config::Settings;
use top50_core::{import, series};
use top50_model::Week;

use crate::handlers::printing;
use crate::snapshots;

use super::{Command, CommandHandler};

impl CommandHandler for Command {
    type Output = anyhow::Result<()>;

    fn handle<W1: std::fmt::Write, W2: std::fmt::Write>(
        &self,
        settings: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        match self {
            Self::Normalize { file, week, write } => {
                let contents = std::fs::read_to_string(file)
                    .with_context(|| format!("could not read {}", file.display()))?;

                let normalized = import::normalize_str(&contents, *week)
                    .with_context(|| format!("could not repair {}", file.display()))?;

                write!(stderr, "{}", printing::corrections(&normalized.corrections)?)?;

                let canonical = serde_json::to_string_pretty(&normalized.document)?;
                writeln!(stdout, "{canonical}")?;

                if *write {
                    std::fs::write(file, format!("{canonical}\n"))
                        .with_context(|| format!("could not rewrite {}", file.display()))?;
                    writeln!(stderr, "Rewrote {} in canonical form", file.display())?;
                }
                Ok(())
            }
            Self::Chart { user, week } => {
                let user = resolve_user(settings, user.as_deref())?;
                let book = snapshots::load_book(&settings.charts.data_dir, &user)?;
                let week = resolve_week(&book, *week, &user)?;

                let entries = book.entries_for(week)?;
                write!(stdout, "{}", printing::chart(&user, week, &entries)?)?;
                Ok(())
            }
            Self::Dropped { user, week } => {
                let user = resolve_user(settings, user.as_deref())?;
                let book = snapshots::load_book(&settings.charts.data_dir, &user)?;
                let week = resolve_week(&book, *week, &user)?;

                let dropped = book.dropped_for(week)?;
                write!(stdout, "{}", printing::dropped(week, &dropped)?)?;
                Ok(())
            }
            Self::History { user, track_id } => {
                let user = resolve_user(settings, user.as_deref())?;
                let book = snapshots::load_book(&settings.charts.data_dir, &user)?;

                let history = book.history_of(track_id)?;
                write!(stdout, "{}", printing::history(&history)?)?;
                Ok(())
            }
            Self::Align { user, track_ids } => {
                let user = resolve_user(settings, user.as_deref())?;
                let book = snapshots::load_book(&settings.charts.data_dir, &user)?;

                let mut histories = Vec::with_capacity(track_ids.len());
                for track_id in track_ids {
                    match book.history_of(track_id) {
                        Ok(history) => histories.push(history),
                        // a selection with a bad id still renders the rest
                        Err(e) => writeln!(stderr, "{e}")?,
                    }
                }

                let table = series::align(&histories, &book.weeks());
                write!(stdout, "{}", printing::aligned_table(&table)?)?;
                Ok(())
            }
            Self::Weeks { user } => {
                let user = resolve_user(settings, user.as_deref())?;
                let book = snapshots::load_book(&settings.charts.data_dir, &user)?;

                write!(stdout, "{}", printing::weeks(&user, &book.weeks())?)?;
                Ok(())
            }
        }
    }
}

/// The user to read for: the flag when given, otherwise the first configured
/// user.
fn resolve_user(settings: &Settings, flag: Option<&str>) -> anyhow::Result<String> {
    match flag {
        Some(user) => Ok(user.to_owned()),
        None => settings
            .charts
            .users
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no users configured and no --user given")),
    }
}

/// The week to read: the flag when given, otherwise the latest imported week.
fn resolve_week(book: &ChartBook, flag: Option<Week>, user: &str) -> anyhow::Result<Week> {
    match flag {
        Some(week) => Ok(week),
        None => book
            .latest_week()
            .ok_or_else(|| anyhow::anyhow!("no snapshots imported for {user}")),
    }
}
