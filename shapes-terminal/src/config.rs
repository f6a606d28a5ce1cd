/// Command-line options for the viewer
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use shapes_core::{parse_key_script, projection::DEFAULT_HALF_EXTENT, Key};

use crate::logging::LoggingConfig;

pub const USAGE: &str = "\
Usage: shapes-terminal [OPTIONS]

Draws a coloured cube and five indexed-face solids.

Controls:
  Left/Right       rotate about Y
  Up/Down          rotate about X
  PageUp/PageDown  rotate about Z
  Home             reset rotations
  W                translate along X
  Q / Esc          quit

Options:
  --keys <SCRIPT>     key presses applied before the first frame, e.g. \"up*6 left w\"
  --snapshot <WxH>    print one plain-text frame of WxH cells and exit
  --extent <H>        orthographic half extent [default: 10]
  --log <FILTER>      log filter, env_logger syntax [default: $RUST_LOG or warn]
  --log-file <PATH>   write log records to PATH; without it they go to
                      stderr in snapshot mode and are dropped interactively
  -h, --help          print this help
";

/// Viewer settings; the defaults reproduce the classic setup
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub keys: Vec<Key>,
    pub snapshot: Option<(usize, usize)>,
    pub half_extent: f64,
    pub logging: LoggingConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            snapshot: None,
            half_extent: DEFAULT_HALF_EXTENT,
            logging: LoggingConfig::default(),
        }
    }
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
}

impl Options {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {}", name))
            };

            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--keys" => {
                    let script = value("--keys")?;
                    let keys = parse_key_script(&script).context("invalid --keys")?;
                    options.keys.extend(keys);
                }
                "--snapshot" => {
                    let size = value("--snapshot")?;
                    options.snapshot = Some(parse_size(&size)?);
                }
                "--extent" => {
                    let extent = value("--extent")?;
                    options.half_extent = extent
                        .parse::<f64>()
                        .with_context(|| format!("invalid --extent `{}`", extent))?;
                    if !(options.half_extent.is_finite() && options.half_extent > 0.0) {
                        bail!("--extent must be a positive number, got `{}`", extent);
                    }
                }
                "--log" => options.logging.env_filter = Some(value("--log")?),
                "--log-file" => options.logging.log_file = Some(PathBuf::from(value("--log-file")?)),
                other => bail!("unknown argument `{}`", other),
            }
        }

        // snapshot output goes to stdout, so stderr is free for log records
        options.logging.stderr = options.snapshot.is_some();

        Ok(Command::Run(options))
    }
}

/// Parse `WIDTHxHEIGHT`
fn parse_size(text: &str) -> Result<(usize, usize)> {
    let (w, h) = text
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got `{}`", text))?;
    let width: usize = w.trim().parse().with_context(|| format!("invalid width `{}`", w))?;
    let height: usize = h.trim().parse().with_context(|| format!("invalid height `{}`", h))?;
    if width == 0 || height == 0 {
        bail!("snapshot size must be non-zero, got `{}`", text);
    }
    Ok((width, height))
}
