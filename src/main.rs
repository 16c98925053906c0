//! Binary entrypoint for the Castle Crawler CLI.
//!
//! Commands:
//! - `play [--seed <n>]` - start an interactive crawl on stdin/stdout
//! - `map [--seed <n>] [--json]` - print the generated castle for a seed
//! - `init` - write a starter config file
//!
//! See the library crate docs for module-level details: `castle_crawler::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use castle_crawler::config::{log_level_filter, Config};
use castle_crawler::crawler::{dispatch, render, Session};
use castle_crawler::logutil::PlayerInput;

#[derive(Parser)]
#[command(name = "castle-crawler")]
#[command(about = "A text dungeon crawl through a randomly generated castle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "crawler.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the terminal
    Play {
        /// World seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the castle layout for a seed
    Map {
        /// World seed; overrides the config file
        #[arg(short, long)]
        seed: Option<u64>,
        /// Emit the full room list as JSON instead of the ASCII grid
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Map { seed, json } => {
            let config = load_config(&cli.config, cli.verbose).await?;
            let seed = pick_seed(seed, &config);
            let session = Session::from_seed(&config.world, seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&session.world().snapshot())?);
            } else {
                println!("Seed: {}", seed);
                print!("{}", render::render_map(session.world(), Some(session.position())));
            }
        }
        Commands::Play { seed } => {
            let config = load_config(&cli.config, cli.verbose).await?;
            let seed = pick_seed(seed, &config);
            info!("Starting Castle Crawler v{} with seed {}", env!("CARGO_PKG_VERSION"), seed);
            play(Session::from_seed(&config.world, seed)).await?;
        }
    }

    Ok(())
}

/// Load the config and start logging from it. A missing file falls back to
/// defaults (reported once the logger is up); a broken one is an error.
async fn load_config(path: &str, verbosity: u8) -> Result<Config> {
    let loaded = Config::load_optional(path).await?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();
    init_logging(&Some(config.clone()), verbosity);
    if !found {
        warn!("Config file {} not found; using defaults", path);
    }
    Ok(config)
}

fn pick_seed(cli_seed: Option<u64>, config: &Config) -> u64 {
    cli_seed
        .or(config.world.seed)
        .unwrap_or_else(rand::random::<u64>)
}

async fn play(mut session: Session) -> Result<()> {
    println!("{}\n", render::welcome_message());
    println!("{}", render::help_text());
    println!();
    print!("{}", render::room_view(&session.describe_current_room()?));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let reply = dispatch(&mut session, &line);
        print!("{}", reply.text);
        if reply.quit {
            info!("Player quit");
            break;
        }
        if session.player().is_defeated() {
            println!("You have been defeated. Game over.");
            info!("Player defeated after {}", PlayerInput(&line));
            break;
        }
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| log_level_filter(&c.logging.level))
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    if let Some(f) = file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only when someone is watching stderr
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
