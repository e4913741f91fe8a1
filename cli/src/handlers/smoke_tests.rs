use std::path::Path;

use clap::Parser;
use pretty_assertions::{assert_eq, assert_str_eq};
use rstest::rstest;
use tempfile::tempdir;

use top50_core::config::{ChartSettings, Settings};

use crate::handlers::{Command, CommandHandler};

fn settings_for(data_dir: &Path) -> Settings {
    Settings {
        charts: ChartSettings {
            data_dir: data_dir.to_path_buf(),
            users: vec!["Walter".to_owned(), "Signe".to_owned()].into_boxed_slice(),
            log_level: log::LevelFilter::Off,
        },
    }
}

fn write_snapshot(data_dir: &Path, user: &str, week: &str, contents: &str) {
    let dir = data_dir.join(user);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{week}.json")), contents).unwrap();
}

/// Two canonical weeks for walter: t3 drops out of week 2, t4 is new there.
fn seed_walter(data_dir: &Path) {
    write_snapshot(
        data_dir,
        "walter",
        "2026-W01",
        r#"{"week":"2026-W01","entries":[
            {"placement":1,"track_id":"t1","title":"Solhem","artists":["Miriam"]},
            {"placement":2,"track_id":"t2","title":"Kust","artists":[]},
            {"placement":3,"track_id":"t3","title":"Gammel Dansk","artists":["Asta","Birk"]}
        ]}"#,
    );
    write_snapshot(
        data_dir,
        "walter",
        "2026-W02",
        r#"{"week":"2026-W02","entries":[
            {"placement":1,"track_id":"t2","title":"Kust","artists":[]},
            {"placement":2,"track_id":"t4","title":"Ny Dag","artists":["Unn"]},
            {"placement":3,"track_id":"t1","title":"Solhem","artists":["Miriam"]}
        ]}"#,
    );
}

fn run(command: &Command, settings: &Settings) -> anyhow::Result<(String, String)> {
    let mut stdout = String::new();
    let mut stderr = String::new();
    command.handle(settings, &mut stdout, &mut stderr)?;
    Ok((stdout, stderr))
}

#[test]
fn test_cli_args_parse() {
    let args = vec!["top50", "--log-level", "debug"];
    let flags = crate::Flags::try_parse_from(args);
    assert!(flags.is_ok());
    let flags = flags.unwrap();
    assert_eq!(flags.log_level, Some(log::LevelFilter::Debug));
    assert!(flags.subcommand.is_none());
}

#[test]
fn test_cli_args_parse_chart() {
    let args = vec!["top50", "chart", "--user", "Walter", "--week", "2026-W05"];
    let flags = crate::Flags::try_parse_from(args).unwrap();
    assert_eq!(
        flags.subcommand,
        Some(Command::Chart {
            user: Some("Walter".to_owned()),
            week: Some("2026-W05".parse().unwrap()),
        })
    );

    // the week flag only takes canonical tokens
    let args = vec!["top50", "chart", "--week", "2026 5"];
    assert!(crate::Flags::try_parse_from(args).is_err());
}

#[test]
fn test_cli_args_align_requires_ids() {
    let args = vec!["top50", "align"];
    assert!(crate::Flags::try_parse_from(args).is_err());

    let args = vec!["top50", "align", "t1", "t2"];
    let flags = crate::Flags::try_parse_from(args).unwrap();
    assert_eq!(
        flags.subcommand,
        Some(Command::Align {
            user: None,
            track_ids: vec!["t1".to_owned(), "t2".to_owned()],
        })
    );
}

#[test]
fn test_chart_defaults_to_latest_week_and_first_user() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, stderr) = run(&Command::Chart { user: None, week: None }, &settings).unwrap();

    assert_str_eq!(
        stdout,
        "Chart for Walter, week 2026-W02:\n\
         \t 1. \"Kust\" (id: t2) ↑ 1\n\
         \t 2. \"Ny Dag - Unn\" (id: t4) ● new\n\
         \t 3. \"Solhem - Miriam\" (id: t1) ↓ 2\n"
    );
    assert_str_eq!(stderr, "");
}

#[test]
fn test_chart_explicit_week_is_all_new() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, _) = run(
        &Command::Chart {
            user: Some("Walter".to_owned()),
            week: Some("2026-W01".parse().unwrap()),
        },
        &settings,
    )
    .unwrap();

    assert_str_eq!(
        stdout,
        "Chart for Walter, week 2026-W01:\n\
         \t 1. \"Solhem - Miriam\" (id: t1) ● new\n\
         \t 2. \"Kust\" (id: t2) ● new\n\
         \t 3. \"Gammel Dansk - Asta, Birk\" (id: t3) ● new\n"
    );
}

#[test]
fn test_chart_unknown_week_fails() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let result = run(
        &Command::Chart {
            user: None,
            week: Some("2026-W09".parse().unwrap()),
        },
        &settings,
    );

    assert!(result.is_err());
    assert_str_eq!(
        result.unwrap_err().to_string(),
        "no chart snapshot for week 2026-W09"
    );
}

#[test]
fn test_chart_without_snapshots_fails() {
    let temp_dir = tempdir().unwrap();
    let settings = settings_for(temp_dir.path());

    let result = run(&Command::Chart { user: None, week: None }, &settings);

    assert!(result.is_err());
    assert_str_eq!(
        result.unwrap_err().to_string(),
        "no snapshots imported for Walter"
    );
}

#[rstest]
#[case::latest_week(None, "Dropped going into 2026-W02:\n\t\"Gammel Dansk - Asta, Birk\" (id: t3) last charted 2026-W01 at 3\n")]
#[case::first_week(Some("2026-W01"), "Dropped going into 2026-W01:\n\tnothing dropped\n")]
fn test_dropped(#[case] week: Option<&str>, #[case] expected: &str) {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, _) = run(
        &Command::Dropped {
            user: None,
            week: week.map(|w| w.parse().unwrap()),
        },
        &settings,
    )
    .unwrap();

    assert_str_eq!(stdout, expected);
}

#[test]
fn test_history() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, _) = run(
        &Command::History {
            user: None,
            track_id: "t1".to_owned(),
        },
        &settings,
    )
    .unwrap();

    assert_str_eq!(
        stdout,
        "History of \"Solhem - Miriam\" (id: t1):\n\
         \t2026-W01:  1\n\
         \t2026-W02:  3\n"
    );
}

#[test]
fn test_history_unknown_track_fails() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let result = run(
        &Command::History {
            user: None,
            track_id: "nope".to_owned(),
        },
        &settings,
    );

    assert!(result.is_err());
    assert_str_eq!(
        result.unwrap_err().to_string(),
        "track \"nope\" has never charted"
    );
}

#[test]
fn test_align_renders_gaps_and_skips_unknown_ids() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, stderr) = run(
        &Command::Align {
            user: None,
            track_ids: vec!["t3".to_owned(), "nope".to_owned(), "t4".to_owned()],
        },
        &settings,
    )
    .unwrap();

    // the bad id is reported but does not abort the rest of the selection
    assert_str_eq!(stderr, "track \"nope\" has never charted\n");
    assert_str_eq!(
        stdout,
        "Aligned positions:\n\
         \t#1: \"Gammel Dansk - Asta, Birk\" (id: t3, color: #1db954)\n\
         \t#2: \"Ny Dag - Unn\" (id: t4, color: #ff6b6b)\n\
         \t2026-W01: [ 3,  -]\n\
         \t2026-W02: [ -,  2]\n"
    );
}

#[test]
fn test_weeks_lists_most_recent_first() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    let settings = settings_for(temp_dir.path());

    let (stdout, _) = run(&Command::Weeks { user: None }, &settings).unwrap();

    assert_str_eq!(stdout, "Known weeks for Walter:\n\t2026-W02\n\t2026-W01\n");
}

#[test]
fn test_weeks_respects_user_flag() {
    let temp_dir = tempdir().unwrap();
    seed_walter(temp_dir.path());
    write_snapshot(
        temp_dir.path(),
        "signe",
        "2026-W03",
        r#"{"week":"2026-W03","entries":[{"placement":1,"track_id":"s1","title":"Egen Liste"}]}"#,
    );
    let settings = settings_for(temp_dir.path());

    let (stdout, _) = run(
        &Command::Weeks {
            user: Some("Signe".to_owned()),
        },
        &settings,
    )
    .unwrap();

    assert_str_eq!(stdout, "Known weeks for Signe:\n\t2026-W03\n");
}

#[test]
fn test_normalize_reports_corrections_and_rewrites() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("messy.json");
    std::fs::write(
        &file,
        r#"{"week":"2026 5","entries":[{"trackId":"t1","title":"A","rank":1}]}"#,
    )
    .unwrap();
    let settings = settings_for(temp_dir.path());

    let (stdout, stderr) = run(
        &Command::Normalize {
            file: file.clone(),
            week: None,
            write: true,
        },
        &settings,
    )
    .unwrap();

    assert!(stderr.starts_with(
        "Applied 3 corrections:\n\
         \tentry 1: trackId -> track_id\n\
         \tentry 1: rank -> placement\n\
         \tweek \"2026 5\" -> \"2026-W05\"\n"
    ));
    assert!(stderr.contains("Rewrote"));

    // stdout carries the canonical document
    let canonical: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(canonical["week"], "2026-W05");
    assert_eq!(canonical["entries"][0]["track_id"], "t1");
    assert_eq!(canonical["entries"][0]["placement"], 1);
    assert!(canonical["entries"][0].get("trackId").is_none());

    // the rewritten file is exactly what was printed
    let rewritten = std::fs::read_to_string(&file).unwrap();
    assert_str_eq!(rewritten, stdout);

    // and a second pass has nothing left to fix
    let (_, stderr) = run(
        &Command::Normalize {
            file,
            week: None,
            write: false,
        },
        &settings,
    )
    .unwrap();
    assert_str_eq!(stderr, "Document was already canonical\n");
}

#[test]
fn test_normalize_fallback_week_flag() {
    let temp_dir = tempdir().unwrap();
    let file = temp_dir.path().join("list.json");
    std::fs::write(&file, r#"[{"track_id":"t1","title":"A","placement":1}]"#).unwrap();
    let settings = settings_for(temp_dir.path());

    let (stdout, stderr) = run(
        &Command::Normalize {
            file,
            week: Some("2025-W52".parse().unwrap()),
            write: false,
        },
        &settings,
    )
    .unwrap();

    assert!(stderr.contains("wrapped top-level list in an entries object"));
    assert!(stderr.contains("week missing or invalid, used 2025-W52"));

    let canonical: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(canonical["week"], "2025-W52");
}

#[test]
fn test_normalize_unreadable_file_fails() {
    let temp_dir = tempdir().unwrap();
    let settings = settings_for(temp_dir.path());

    let result = run(
        &Command::Normalize {
            file: temp_dir.path().join("absent.json"),
            week: None,
            write: false,
        },
        &settings,
    );

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("could not read"));
}
