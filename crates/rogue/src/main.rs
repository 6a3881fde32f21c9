//! Rogue dungeon generator
//!
//! Generates one map and prints it to stdout as text or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{debug, info};

use rogue_core::{generate_with, Dungeon, GeneratorOptions, OutputFormat};

/// Partition-tree dungeon generator
#[derive(Parser, Debug)]
#[command(name = "rogue")]
#[command(author, version, about = "Generate a rogue-style dungeon map", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Grid width in cells
    #[arg(short = 'w', long = "width")]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<i32>,

    /// Number of rooms
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<i32>,

    /// Seed (reduced modulo 2^32); drawn at random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<i64>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<Format>,

    /// Include the room list in JSON output
    #[arg(long = "rooms-json")]
    rooms_json: bool,

    /// Options file (OPTIONS=width:70,height:40,...)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Args {
    /// Layer the command-line flags over the options file, if any
    fn options(&self) -> Result<GeneratorOptions, String> {
        let mut options = match &self.config {
            Some(path) => GeneratorOptions::load_from_file(path)
                .map_err(|e| format!("{}: {e}", path.display()))?,
            None => GeneratorOptions::default(),
        };

        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(height) = self.height {
            options.height = height;
        }
        if let Some(rooms) = self.rooms {
            options.room_num = rooms;
        }
        if self.seed.is_some() {
            options.seed = self.seed;
        }
        if let Some(format) = self.format {
            options.format = format.into();
        }
        options.include_rooms |= self.rooms_json;
        Ok(options)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("rogue: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, String> {
    let options = args.options()?;
    debug!("options: {options:?}");

    let dungeon = generate_with(&options).map_err(|e| e.to_string())?;
    info!(
        "generated {}x{} map with {} rooms, seed {}",
        dungeon.width(),
        dungeon.height(),
        dungeon.rooms().len(),
        dungeon.seed()
    );

    match options.format {
        OutputFormat::Text => Ok(dungeon.to_text()),
        OutputFormat::Json => render_json(&dungeon, options.include_rooms),
    }
}

/// Render as a single-line JSON document followed by a newline
fn render_json(dungeon: &Dungeon, include_rooms: bool) -> Result<String, String> {
    let mut value = serde_json::to_value(dungeon).map_err(|e| e.to_string())?;
    if !include_rooms {
        if let Some(doc) = value.as_object_mut() {
            doc.remove("rooms");
        }
    }
    Ok(value.to_string() + "\n")
}
