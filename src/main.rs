#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use metro_graph::storage::CsvRecordStore;
use metro_graph::{logging, CostMode, NetworkConfig, NetworkEditor};

#[derive(Debug, Parser)]
#[command(name = "metro-graph", version, about = "Subway route finder over an editable line record")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true, default_value = "metro.json")]
    config: PathBuf,

    /// Line record to load and update (overrides the config)
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List stations with their current index
    Stations,
    /// Find the cheapest route between two stations
    Route {
        from: String,
        to: String,
        #[arg(long, default_value_t = CostMode::Time)]
        mode: CostMode,
        /// Answer even outside service hours
        #[arg(long)]
        ignore_hours: bool,
        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a station without connections
    AddStation { name: String },
    /// Remove a station, bridging its neighbors when they share a line
    RemoveStation { name: String },
    /// Link two stations in both directions, creating them if needed
    AddLine {
        from: String,
        to: String,
        /// Distance in kilometers
        distance: f64,
        /// Travel time in minutes
        time: f64,
        line: u32,
    },
    /// Remove every connection of a line
    RemoveLine { line: u32 },
    /// Remove both directions of a single link
    RemoveLink { a: String, b: String, line: u32 },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = NetworkConfig::load(&cli.config)
        .with_context(|| format!("loading settings from '{}'", cli.config.display()))?;
    if let Some(records) = cli.records {
        config.record_path = records;
    }

    let store = CsvRecordStore::new(&config.record_path);
    let (mut editor, summary) = NetworkEditor::open(&config, store)
        .with_context(|| format!("loading '{}'", config.record_path.display()))?;
    log::info!("{} station(s) loaded", summary.stations);

    match cli.command {
        Command::Stations => {
            for (index, name) in editor.network().stations() {
                println!("{index} - {name}");
            }
        }
        Command::Route {
            from,
            to,
            mode,
            ignore_hours,
            json,
        } => {
            if !ignore_hours && !config.service_hours.is_open_now() {
                bail!(
                    "trains do not run between {:02}:00 and {:02}:00",
                    config.service_hours.closed_from_hour,
                    config.service_hours.reopen_hour
                );
            }
            let route = editor.find_path(&from, &to, mode)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&route)?);
            } else {
                println!("{route}");
                println!("{}", route.summary());
            }
        }
        Command::AddStation { name } => {
            let index = editor.add_station(&name)?;
            println!("added station '{}' at index {index}", name.trim());
        }
        Command::RemoveStation { name } => {
            let removal = editor.remove_station(&name)?;
            if let Some(bridge) = &removal.bridge {
                println!(
                    "bridged {} - {} on line {} ({} min, {} km)",
                    bridge.from, bridge.to, bridge.line, bridge.time, bridge.distance
                );
            }
            println!("removed station '{}'", removal.name);
        }
        Command::AddLine {
            from,
            to,
            distance,
            time,
            line,
        } => {
            editor.add_line(&from, &to, distance, time, line)?;
            println!("linked '{}' - '{}' on line {line}", from.trim(), to.trim());
        }
        Command::RemoveLine { line } => {
            let removal = editor.remove_line(line)?;
            if removal.existed() {
                println!("removed {} connection(s) of line {line}", removal.removed);
            } else {
                println!("line {line} does not exist or has no connections");
            }
        }
        Command::RemoveLink { a, b, line } => {
            let removed = editor.remove_link(&a, &b, line)?;
            println!("removed {removed} connection(s)");
        }
    }

    Ok(())
}
