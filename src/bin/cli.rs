//! growdb CLI
//!
//! Command-line interface over a file-backed growdb store. This is
//! embedder-side code: it picks the concrete medium ([`FileMedium`]) and
//! the standard payload framing, then drives the engine's public surface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use growdb::medium::{frame_payload, payload_value, FileMedium};
use growdb::{Config, Db, DbError, RecordId, Result};

/// growdb CLI
#[derive(Parser, Debug)]
#[command(name = "growdb-cli")]
#[command(about = "CLI for the growdb embedded key-value store")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = "./growdb.db")]
    file: PathBuf,

    /// Maximum number of cached nodes (0 disables the cache)
    #[arg(short = 'c', long, default_value = "255")]
    max_cached_nodes: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a record and print its identifier
    Add {
        /// The record's key
        key: String,

        /// The record's value
        value: String,
    },

    /// Find a record's identifier by key
    Find {
        /// The key to look up
        key: String,
    },

    /// Print a record's value by identifier
    Map {
        /// The identifier returned by a previous add
        id: RecordId,
    },

    /// Print store statistics
    Stat,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let medium = FileMedium::open(&args.file)?;

    // The file length is the populated region of a previous session.
    let populated = medium.populated_len()?;
    let populated = RecordId::try_from(populated).map_err(|_| DbError::StorageFull)?;

    let config = Config::builder()
        .max_cached_nodes(args.max_cached_nodes)
        .build();
    let mut db = Db::open_at(medium, config, populated);

    match args.command {
        Commands::Add { key, value } => {
            let payload = frame_payload(key.as_bytes(), value.as_bytes())?;
            let id = db.add(key.as_bytes(), &payload)?;
            println!("{}", id);
        }

        Commands::Find { key } => match db.find(key.as_bytes())? {
            Some(id) => println!("{}", id),
            None => {
                println!("(not found)");
                process::exit(1);
            }
        },

        Commands::Map { id } => match db.map(id)? {
            Some(payload) => println!("{}", String::from_utf8_lossy(payload_value(&payload))),
            None => {
                println!("(absent)");
                process::exit(1);
            }
        },

        Commands::Stat => {
            println!("file:      {}", args.file.display());
            println!("populated: {} bytes", db.filled());
            println!("version:   {}", growdb::VERSION);
        }
    }

    let mut medium = db.close();
    medium.sync()?;

    Ok(())
}
