pub mod implementations;
pub mod printing;
pub mod utils;

#[cfg(test)]
mod smoke_tests;

use std::path::PathBuf;

use clap::Subcommand;

use top50_core::config::Settings;
use top50_model::Week;

pub trait CommandHandler {
    type Output;

    fn handle<W1: std::fmt::Write, W2: std::fmt::Write>(
        &self,
        settings: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output;
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Repair a raw snapshot file into the canonical import form
    Normalize {
        /// The snapshot file to repair
        file: PathBuf,
        /// Week to assume when the document carries no usable week
        #[clap(long)]
        week: Option<Week>,
        /// Rewrite the file in place with the canonical form
        #[clap(long)]
        write: bool,
    },
    /// Print a week's chart with movement against the week before
    Chart {
        /// The user whose charts to read (defaults to the first configured user)
        #[clap(long)]
        user: Option<String>,
        /// The week to print (defaults to the latest imported week)
        #[clap(long)]
        week: Option<Week>,
    },
    /// Print the tracks that fell off the chart going into a week
    Dropped {
        /// The user whose charts to read (defaults to the first configured user)
        #[clap(long)]
        user: Option<String>,
        /// The week to inspect (defaults to the latest imported week)
        #[clap(long)]
        week: Option<Week>,
    },
    /// Print one track's week-by-week chart positions
    History {
        /// The user whose charts to read (defaults to the first configured user)
        #[clap(long)]
        user: Option<String>,
        /// The id of the track
        track_id: String,
    },
    /// Align several tracks' histories on the full week axis
    Align {
        /// The user whose charts to read (defaults to the first configured user)
        #[clap(long)]
        user: Option<String>,
        /// The ids of the tracks to align, in display order
        #[clap(required = true)]
        track_ids: Vec<String>,
    },
    /// List the imported weeks, most recent first
    Weeks {
        /// The user whose charts to read (defaults to the first configured user)
        #[clap(long)]
        user: Option<String>,
    },
}
