/// Shapes Terminal Viewer - a coloured cube and five indexed-face solids
///
/// Controls:
///   - Left/Right: rotate about Y
///   - Up/Down: rotate about X
///   - PageUp/PageDown: rotate about Z
///   - Home: reset rotations
///   - W: translate along X
///   - Q/ESC: Quit

use anyhow::{Context, Result};
use shapes_core::{scene, Orientation, Projection};
use shapes_terminal::{logging, snapshot, Command, Options, TerminalApp};

fn main() -> Result<()> {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print!("{}", shapes_terminal::config::USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {:#}\n\n{}", e, shapes_terminal::config::USAGE);
            std::process::exit(2);
        }
    };

    logging::init_logging(&options.logging)?;

    // the tables are compiled in; a bad index is an authoring bug
    scene::validate().context("scene tables are inconsistent")?;

    let mut orientation = Orientation::default();
    orientation.apply_all(options.keys.iter().copied());
    let projection = Projection::orthographic(options.half_extent);
    log::info!("starting with {:?}, half extent {}", orientation, projection.half_extent);

    if let Some((width, height)) = options.snapshot {
        print!("{}", snapshot(&orientation, projection, width, height));
        return Ok(());
    }

    let mut app = TerminalApp::new(orientation, projection)?;
    app.run()?;

    log::info!("final orientation {:?}", app.orientation());
    Ok(())
}
