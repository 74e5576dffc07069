use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use patcher_core::layout::{CosmeticPatches, LayoutDescription, PlayersConfiguration};
use patcher_core::{create_patcher_file, Result};

#[derive(Debug, Parser)]
#[command(
    name = "echoes-patcher",
    version,
    about = "Builds the patcher file for a Metroid Prime 2: Echoes layout"
)]
struct Args {
    /// Layout description JSON produced by the generator.
    #[arg(long)]
    layout: PathBuf,

    #[arg(long, default_value_t = 0)]
    player_index: usize,

    /// Player names in player order. Defaults to "Player N".
    #[arg(long = "player-name", value_name = "NAME")]
    player_names: Vec<String>,

    /// Cosmetic patches JSON. Every cosmetic option is on when omitted.
    #[arg(long)]
    cosmetic: Option<PathBuf>,

    /// Where to write the patcher file. Stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn players_configuration(args: &Args, player_count: usize) -> PlayersConfiguration {
    let player_names: BTreeMap<usize, String> = (0..player_count.max(args.player_names.len()))
        .map(|i| {
            let name = args
                .player_names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Player {}", i + 1));
            (i, name)
        })
        .collect();

    PlayersConfiguration {
        player_index: args.player_index,
        player_names,
    }
}

fn run(args: Args) -> Result<()> {
    let description: LayoutDescription =
        serde_json::from_slice(&std::fs::read(&args.layout)?)?;

    let cosmetic_patches = match &args.cosmetic {
        Some(path) => serde_json::from_slice(&std::fs::read(path)?)?,
        None => CosmeticPatches::default(),
    };

    let players_config = players_configuration(&args, description.permalink.player_count());
    let patcher_file = create_patcher_file(&description, &players_config, &cosmetic_patches)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&patcher_file)?
    } else {
        serde_json::to_string(&patcher_file)?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("wrote patcher file to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
