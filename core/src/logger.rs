//----------------------------------------------------------------------------------------- std lib
use std::io::Write;
use std::time::Instant;
//--------------------------------------------------------------------------------- other libraries
use log::info;
use once_cell::sync::Lazy;
use tracing_subscriber::layer::SubscriberExt as _;

// This will get initialized below.
/// Returns the init [`Instant`]
pub static INIT_INSTANT: Lazy<Instant> = Lazy::new(Instant::now);

//---------------------------------------------------------------------------------------------------- Logger init function
#[allow(clippy::module_name_repetitions)]
/// Initializes the logger.
///
/// This enables console logging on all the internals of top50.
///
/// Functionality is provided by [`log`].
///
/// The levels are:
/// - ERROR
/// - WARN
/// - INFO
/// - DEBUG
/// - TRACE
///
/// # Panics
/// This must only be called _once_.
#[cfg(not(tarpaulin_include))]
pub fn init_logger(filter: log::LevelFilter) {
    // Initialize timer.
    let now = Lazy::force(&INIT_INSTANT);

    let env = std::env::var("RUST_LOG").unwrap_or_default();

    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            let style = buf.default_level_style(record.level());
            let level = match record.level() {
                log::Level::Debug => "D",
                log::Level::Trace => "T",
                log::Level::Info => "I",
                log::Level::Warn => "W",
                log::Level::Error => "E",
            };
            writeln!(
                buf,
                "| {style}{level}{style:#} | {} | {: >28} @ {: <4} | {}",
                crate::format_duration(&now.elapsed()),
                record.file_static().unwrap_or("???"),
                record.line().unwrap_or(0),
                record.args(),
            )
        })
        .write_style(env_logger::WriteStyle::Always);

    // When RUST_LOG isn't set, log the top50 crates at the requested level
    // and keep library crates off.
    if env.is_empty() {
        builder.filter_level(log::LevelFilter::Off);
        for module in ["top50", "top50_cli", "top50_core", "top50_model"] {
            builder.filter_module(module, filter);
        }
    } else {
        builder.parse_filters(&env);
    }

    builder.init();

    if env.is_empty() {
        info!("Log Level (Flag) ... {filter}");
    } else {
        info!("Log Level (RUST_LOG) ... {env}");
    }
}

/// Initializes the tracing layer.
///
/// The caller is responsible for installing it, usually via
/// [`tracing::subscriber::set_global_default`].
///
/// # Panics
///
/// panics if the tracing filter cannot be parsed.
#[must_use]
pub fn init_tracing() -> impl tracing::Subscriber {
    let filter = tracing_subscriber::EnvFilter::builder()
        .parse("off,top50=trace,top50_cli=trace,top50_core=trace,top50_model=trace")
        .unwrap();

    tracing_subscriber::registry().with(filter)
}
