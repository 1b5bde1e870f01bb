use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use simple_logger::SimpleLogger;

use screenturn::app::{App, Devices, ScreenInfo};
use screenturn::clock::SystemClock;
use screenturn::config::Args;
use screenturn::orientation::Orientation;

fn main() {
    let args = Args::parse();

    if let Err(err) = SimpleLogger::new().with_level(args.log_level()).init() {
        eprintln!("could not set up logging: {err}");
    }

    if let Err(err) = run(args) {
        log::error!("Fatal error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let devices = match args.simulate {
        Some(extent) => {
            log::info!("simulating a {} display", extent);
            Devices::simulated(extent)
        }
        None => Devices::native().context("opening the display")?,
    };

    let app = App::new(
        devices,
        Arc::new(SystemClock::new()),
        args.remapper_config(),
    )
    .context("reading the current display mode")?;

    if let Some(target) = args.rotate {
        app.rotator()
            .rotate_to(target)
            .with_context(|| format!("rotating to {target}"))?;
        return Ok(());
    }

    if args.info {
        let info = app.screen_info();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&info)?);
        } else {
            print_info(&info);
        }
        return Ok(());
    }

    println!("Current orientation: {}", app.current_orientation().label());
    println!("Screen resolution: {}", app.screen_extent());

    app.set_remapping(args.remap)
        .context("starting mouse remapping")?;
    app.set_hotkeys(args.hotkeys)
        .context("starting keyboard shortcuts")?;

    let result = menu(&app);
    app.shutdown();
    result
}

fn status(enabled: bool) -> &'static str {
    if enabled {
        "ENABLED"
    } else {
        "DISABLED"
    }
}

fn print_menu(app: &App) {
    let rule = "=".repeat(50);
    println!("\n{rule}");
    println!("Screen Rotator - With Mouse Remapping & Hotkeys");
    println!("{rule}");
    println!("Mouse Remapping: {}", status(app.remapping_enabled()));
    println!("Keyboard Hotkeys: {}", status(app.hotkeys_enabled()));
    println!("{rule}");
    println!("1. Rotate Clockwise (90°)");
    println!("2. Rotate Counter-clockwise (90°)");
    println!("3. Rotate to 0° (Default)");
    println!("4. Rotate to 90°");
    println!("5. Rotate to 180°");
    println!("6. Rotate to 270°");
    println!("7. Show Current Screen Info");
    println!("8. Toggle Mouse Remapping");
    println!("9. Toggle Keyboard Shortcuts");
    println!("0. Exit");
    println!("{rule}");
}

fn print_info(info: &ScreenInfo) {
    let rule = "-".repeat(50);
    println!("{rule}");
    println!("Width: {}px", info.width);
    println!("Height: {}px", info.height);
    println!("Orientation: {}", info.label);
    println!("Degrees: {}°", info.degrees);
    println!("Mouse Remapping: {}", status(info.remapping));
    println!("Keyboard Shortcuts: {}", status(info.hotkeys));
    println!("{rule}");
}

fn menu(app: &App) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_menu(app);
        print!("\nEnter your choice (0-9): ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let choice = line.context("reading menu choice")?;

        let rotated = match choice.trim() {
            "1" => app.rotator().rotate_clockwise(),
            "2" => app.rotator().rotate_counterclockwise(),
            "3" => app.rotator().rotate_to_default(),
            "4" => app.rotator().rotate_to(Orientation::Clockwise90),
            "5" => app.rotator().rotate_to(Orientation::UpsideDown),
            "6" => app.rotator().rotate_to(Orientation::Clockwise270),
            "7" => {
                print_info(&app.screen_info());
                continue;
            }
            "8" => {
                app.set_remapping(!app.remapping_enabled())?;
                continue;
            }
            "9" => {
                app.set_hotkeys(!app.hotkeys_enabled())?;
                continue;
            }
            "0" => {
                println!("\nExiting Screen Rotator. Goodbye!");
                return Ok(());
            }
            _ => {
                println!("\nInvalid choice. Please enter a number between 0 and 9.");
                continue;
            }
        };
        // Rotation failures are logged by the rotator; stay in the menu.
        rotated.ok();
    }
}
