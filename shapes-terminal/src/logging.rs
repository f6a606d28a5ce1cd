/// Logger initialization
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "shapes_core=debug"). `log_file` wins over everything else; without it
/// records go to stderr only when `stderr` is set, because the interactive
/// viewer owns that screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub log_file: Option<PathBuf>,
    pub stderr: bool,
}

/// Where log records end up
#[derive(Debug)]
enum Destination {
    Stderr,
    File(File),
    Discard,
}

fn destination(config: &LoggingConfig) -> Result<Destination> {
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        return Ok(Destination::File(file));
    }
    Ok(if config.stderr {
        Destination::Stderr
    } else {
        Destination::Discard
    })
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let destination = destination(config)?;

    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        match destination {
            Destination::Stderr => {
                builder.target(env_logger::Target::Stderr);
            }
            Destination::File(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
                builder.write_style(env_logger::WriteStyle::Never);
            }
            Destination::Discard => {
                builder.target(env_logger::Target::Pipe(Box::new(io::sink())));
            }
        }

        builder.init();
        log::debug!("logging initialized");
    });

    Ok(())
}
