use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::App;
use clap::Parser;
use game_core::configuration::GameConfiguration;
use game_core::prelude::Session;
use game_core::GeocoinCorePlugin;
use geocoin::command::{self, UiAction, HELP};
use geocoin::console::{self, ConsoleOutput, ConsolePlugin, PendingOps};
use simplelog::{LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file with gameplay parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write debug logs to a file
    #[arg(long)]
    debug: bool,
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args)?;

    let config = match &args.config {
        Some(path) => GameConfiguration::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GameConfiguration::default(),
    };
    log::debug!("Starting with configuration {config:?}");

    let mut app = App::new();
    app.insert_resource(config)
        .add_plugins((GeocoinCorePlugin, ConsolePlugin));
    app.update();

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Geocoin Carrier")?;
    print_lines(&mut stdout, console::describe_surroundings(session(&app)))?;
    prompt(&mut stdout)?;

    for line in io::stdin().lock().lines() {
        match command::parse(&line?) {
            Ok(UiAction::Quit) => break,
            Ok(UiAction::Op(op)) => {
                app.world_mut().resource_mut::<PendingOps>().push_back(op);
                app.update();
                let output = std::mem::take(&mut **app.world_mut().resource_mut::<ConsoleOutput>());
                print_lines(&mut stdout, output)?;
            },
            Ok(UiAction::Look) => {
                print_lines(&mut stdout, console::describe_surroundings(session(&app)))?
            },
            Ok(UiAction::Inventory) => {
                print_lines(&mut stdout, console::describe_inventory(session(&app)))?
            },
            Ok(UiAction::Help) => writeln!(stdout, "{HELP}")?,
            Err(e) => writeln!(stdout, "{e}\n{HELP}")?,
        }
        prompt(&mut stdout)?;
    }
    Ok(())
}

fn session(app: &App) -> &Session {
    app.world().resource::<Session>()
}

fn print_lines<W: Write>(out: &mut W, lines: Vec<String>) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn setup_logging(args: &Args) -> anyhow::Result<()> {
    if args.debug {
        let file = File::create(&args.log_file)
            .with_context(|| format!("creating log file {}", args.log_file.display()))?;
        WriteLogger::init(
            LevelFilter::Debug,
            simplelog::ConfigBuilder::new()
                .set_target_level(LevelFilter::Error)
                .build(),
            file,
        )?;
    }
    Ok(())
}
