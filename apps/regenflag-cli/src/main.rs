use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::DVec3;
use regenflag_area::WandSelections;
use regenflag_common::{
    BlockPos, CallerId, CellPosition, CommandSender, FlagIntent, FlagKind, Location,
};
use regenflag_config::RegenConfig;
use regenflag_dispatch::{FlagCommand, FlagReport, Flagger, MemoryFlagger};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "regenflag",
    about = "Flag chunks to protect them from regeneration, or unflag them"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the resulting flag table as JSON
    #[arg(long)]
    json: bool,

    /// Act as a player standing at x,y,z instead of the console
    #[arg(long, value_parser = parse_position, allow_hyphen_values = true)]
    at: Option<DVec3>,

    /// World the player is in
    #[arg(long, default_value = "world")]
    world: String,

    /// First selection corner (block x,y,z) in the player's world
    #[arg(long, value_parser = parse_block, allow_hyphen_values = true)]
    pos1: Option<BlockPos>,

    /// Second selection corner (block x,y,z) in the player's world
    #[arg(long, value_parser = parse_block, allow_hyphen_values = true)]
    pos2: Option<BlockPos>,

    /// Run as if the selection tool were not installed
    #[arg(long)]
    no_selection_tool: bool,

    /// Chunks already flagged before the command runs (world:x,z)
    #[arg(long = "flagged", value_parser = parse_cell, allow_hyphen_values = true)]
    flagged: Vec<CellPosition>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Protect chunks from regeneration: [], [world] <x> <z>, or selection
    Flag {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Make chunks eligible for regeneration again
    Unflag {
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Caller backed by the terminal.
struct TerminalSender {
    id: CallerId,
    name: &'static str,
    location: Option<Location>,
}

impl CommandSender for TerminalSender {
    fn id(&self) -> CallerId {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

#[derive(Serialize)]
struct FlagRow {
    world: String,
    x: i32,
    z: i32,
    kind: FlagKind,
}

#[derive(Serialize)]
struct Output {
    report: Option<FlagReport>,
    flags: Vec<FlagRow>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => RegenConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => RegenConfig::default(),
    };
    tracing::debug!(worlds = ?config.worlds, "configuration ready");

    let flagger = MemoryFlagger::new(config.flag_duration());
    for cell in &cli.flagged {
        flagger.flag_cells_in_radius(cell.world(), cell.x(), cell.z(), 0, FlagKind::Eternal);
    }

    let sender = TerminalSender {
        id: CallerId::new(),
        name: if cli.at.is_some() { "player" } else { "CONSOLE" },
        location: cli.at.map(|position| Location::new(cli.world.as_str(), position)),
    };

    let mut wand = WandSelections::new();
    wand.set_active(!cli.no_selection_tool);
    if let Some(pos) = cli.pos1 {
        wand.set_pos(sender.id(), &cli.world, pos, true);
    }
    if let Some(pos) = cli.pos2 {
        wand.set_pos(sender.id(), &cli.world, pos, false);
    }

    let (intent, args) = match &cli.command {
        Commands::Flag { args } => (FlagIntent::Flag, args),
        Commands::Unflag { args } => (FlagIntent::Unflag, args),
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = FlagCommand::new(Some(&wand), &config, &flagger).handle(&sender, &args, intent);

    let flags: Vec<FlagRow> = flagger
        .flags()
        .into_iter()
        .map(|(cell, entry)| FlagRow {
            world: cell.world().to_owned(),
            x: cell.x(),
            z: cell.z(),
            kind: entry.kind,
        })
        .collect();

    if cli.json {
        let output = Output {
            report: result.as_ref().ok().cloned(),
            flags,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Flagged chunks: {}", flags.len());
        for row in &flags {
            println!("  {} {} {} ({:?})", row.world, row.x, row.z, row.kind);
        }
    }

    result.with_context(|| format!("{intent} command failed"))?;
    Ok(())
}

fn parse_triple<T: std::str::FromStr>(s: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected x,y,z but got `{s}`"));
    };
    let parse = |v: &str| v.parse::<T>().map_err(|_| format!("`{v}` is not a number"));
    Ok([parse(x)?, parse(y)?, parse(z)?])
}

fn parse_position(s: &str) -> Result<DVec3, String> {
    let position = DVec3::from_array(parse_triple::<f64>(s)?);
    if !position.is_finite() {
        return Err(format!("`{s}` is not a finite position"));
    }
    Ok(position)
}

fn parse_block(s: &str) -> Result<BlockPos, String> {
    parse_triple::<i32>(s).map(|[x, y, z]| BlockPos::new(x, y, z))
}

fn parse_cell(s: &str) -> Result<CellPosition, String> {
    let (world, coords) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("expected world:x,z but got `{s}`"))?;
    let (x, z) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected world:x,z but got `{s}`"))?;
    let x: i32 = x.trim().parse().map_err(|_| format!("`{x}` is not a chunk coordinate"))?;
    let z: i32 = z.trim().parse().map_err(|_| format!("`{z}` is not a chunk coordinate"))?;
    Ok(CellPosition::new(world, x, z))
}
