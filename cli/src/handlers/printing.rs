//! Handles displaying the output of the chart commands in a human readable format.

use std::fmt::Write;

use top50_core::series::AlignedSeriesTable;
use top50_model::{ChartEntry, Movement, TrackHistory, Week, WeekSet};

/// The movement marker shown next to a chart entry.
fn movement_marker(movement: Movement) -> String {
    match movement {
        Movement::New => "● new".to_owned(),
        Movement::Up(step) => format!("↑ {step}"),
        Movement::Down(step) => format!("↓ {step}"),
        Movement::Unchanged => "—".to_owned(),
    }
}

pub fn corrections(corrections: &[String]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    if corrections.is_empty() {
        writeln!(output, "Document was already canonical")?;
        return Ok(output);
    }

    writeln!(output, "Applied {} corrections:", corrections.len())?;

    for correction in corrections {
        writeln!(output, "\t{correction}")?;
    }

    Ok(output)
}

pub fn chart(user: &str, week: Week, entries: &[ChartEntry]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Chart for {user}, week {week}:")?;

    for entry in entries {
        writeln!(
            output,
            "\t{: >2}. \"{}\" (id: {}) {}",
            entry.position,
            entry.track.display_name(),
            entry.track.id,
            movement_marker(entry.movement()),
        )?;
    }

    Ok(output)
}

pub fn dropped(week: Week, dropped: &[ChartEntry]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Dropped going into {week}:")?;

    if dropped.is_empty() {
        writeln!(output, "\tnothing dropped")?;
        return Ok(output);
    }

    // each entry still carries the week and position it last charted at
    for entry in dropped {
        writeln!(
            output,
            "\t\"{}\" (id: {}) last charted {} at {}",
            entry.track.display_name(),
            entry.track.id,
            entry.week,
            entry.position,
        )?;
    }

    Ok(output)
}

pub fn history(history: &TrackHistory) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(
        output,
        "History of \"{}\" (id: {}):",
        history.track.display_name(),
        history.track.id,
    )?;

    for point in &history.history {
        writeln!(output, "\t{}: {: >2}", point.week, point.position)?;
    }

    Ok(output)
}

pub fn aligned_table(table: &AlignedSeriesTable) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Aligned positions:")?;

    for (index, series) in table.series.iter().enumerate() {
        writeln!(
            output,
            "\t#{}: \"{}\" (id: {}, color: {})",
            index + 1,
            series.label,
            series.track_id,
            series.color,
        )?;
    }

    // one row per week; `-` renders a week the track did not chart
    for (row, week) in table.weeks.iter().enumerate() {
        let cells: Vec<String> = table
            .series
            .iter()
            .map(|series| match series.positions[row] {
                Some(position) => format!("{position: >2}"),
                None => " -".to_owned(),
            })
            .collect();
        writeln!(output, "\t{}: [{}]", week, cells.join(", "))?;
    }

    Ok(output)
}

pub fn weeks(user: &str, weeks: &WeekSet) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Known weeks for {user}:")?;

    for week in weeks.iter().rev() {
        writeln!(output, "\t{week}")?;
    }

    Ok(output)
}
