// Etude: CLI entry point.
//
// Composes a piece, writes it as JSON (and optionally MIDI), then launches
// the external player on the JSON file and waits for it to finish.
//
// Usage:
//   etude list
//   etude generate <PIECE> [--seed N] [--output PATH] [--midi PATH]
//     [--bpm BPM] [--no-play] [--config PATH]
//   etude render <INPUT.json> <OUTPUT.mid>
//   etude play <INPUT.json> [--config PATH]
//
// Logging goes through `env_logger`; set RUST_LOG=debug for more detail.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use etude_music::config::EtudeConfig;
use etude_music::midi::write_midi;
use etude_music::output::{read_json, write_json};
use etude_music::player::play;
use etude_music::{EtudeError, Piece};
use etude_prng::EtudeRng;

#[derive(Debug, Parser)]
#[command(name = "etude", version, about = "Algorithmic note-sequence generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the available pieces.
    List,
    /// Compose a piece, write it out and hand it to the player.
    Generate(GenerateArgs),
    /// Convert a composition JSON file to a Standard MIDI File.
    Render { input: PathBuf, output: PathBuf },
    /// Hand an existing composition JSON file to the player.
    Play {
        input: PathBuf,
        /// JSON config file (only the player section is used).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Piece name, see `etude list`.
    piece: String,
    /// Seed for randomized pieces; defaults to the clock.
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the composition JSON.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write a Standard MIDI File.
    #[arg(long)]
    midi: Option<PathBuf>,
    /// Override the piece's tempo.
    #[arg(long)]
    bpm: Option<f64>,
    /// Write the files but do not launch the player.
    #[arg(long)]
    no_play: bool,
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), EtudeError> {
    match command {
        Command::List => {
            for piece in Piece::ALL {
                let marker = if piece.is_randomized() { "*" } else { " " };
                println!("{marker} {:<16} {}", piece.name(), piece.description());
            }
            println!();
            println!("* output depends on --seed");
            Ok(())
        }
        Command::Generate(args) => generate(args),
        Command::Render { input, output } => {
            let comp = read_json(&input)?;
            write_midi(&comp.sorted_by_time(), &output)
        }
        Command::Play { input, config } => {
            let config = load_config(config.as_deref())?;
            read_json(&input)?;
            play(&config.player, &input)
        }
    }
}

fn generate(args: GenerateArgs) -> Result<(), EtudeError> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if args.midi.is_some() {
        config.midi_path = args.midi;
    }
    if args.no_play {
        config.play = false;
    }

    let piece: Piece = args.piece.parse()?;
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    log::info!("Composing {piece} (seed {seed})");

    let mut rng = EtudeRng::new(seed);
    let mut comp = piece.compose(&config.pieces, &mut rng);
    if let Some(bpm) = args.bpm {
        comp.bpm = bpm;
    }
    log::info!("{}", comp.summary());

    write_json(&comp, &config.output_path)?;
    if let Some(midi_path) = &config.midi_path {
        write_midi(&comp, midi_path)?;
    }
    if config.play {
        play(&config.player, &config.output_path)?;
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<EtudeConfig, EtudeError> {
    match path {
        Some(path) => EtudeConfig::load(path),
        None => Ok(EtudeConfig::default()),
    }
}

/// Seed from the wall clock when none was given. Logged by the caller so a
/// run can be reproduced.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
