pub mod chart;
pub mod config;
pub mod errors;
pub mod import;
pub mod logger;
pub mod series;

use std::path::PathBuf;

use errors::DirectoryError;

/// Get the path to the config directory for top50.
///
/// # Errors
///
/// Returns an error if the system config directory could not be found.
pub fn get_config_dir() -> Result<PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "top50")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(DirectoryError::Config)
}

/// Get the path to the data directory for top50, the default home of the
/// chart snapshots.
///
/// # Errors
///
/// Returns an error if the system data directory could not be found.
pub fn get_data_dir() -> Result<PathBuf, DirectoryError> {
    directories::ProjectDirs::from("", "", "top50")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(DirectoryError::Data)
}

/// Format a duration as `HH:MM:SS.mmm`, used by the logger to timestamp
/// lines relative to process start.
#[must_use]
pub fn format_duration(duration: &std::time::Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        duration.subsec_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_str_eq;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case::zero(Duration::ZERO, "00:00:00.000")]
    #[case::millis(Duration::from_millis(5), "00:00:00.005")]
    #[case::seconds(Duration::from_secs(61), "00:01:01.000")]
    #[case::hours(Duration::from_secs(3600 * 2 + 60 * 3 + 4), "02:03:04.000")]
    fn test_format_duration(#[case] duration: Duration, #[case] expected: &str) {
        assert_str_eq!(format_duration(&duration), expected);
    }
}
