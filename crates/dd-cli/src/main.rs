//! CLI frontend for Dynamic Dialogue files.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use dd_core::KeySort;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "dd",
    about = "Dynamic Dialogue: check, inspect, and play branching conversations",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dialogue file
    Check {
        /// Dialogue file (JSON)
        file: PathBuf,
    },

    /// Print a table of the nodes in a dialogue file
    Show {
        /// Dialogue file (JSON)
        file: PathBuf,
    },

    /// Play a dialogue in the terminal
    Play {
        /// Dialogue file (JSON)
        file: PathBuf,

        /// Node to open the conversation at
        #[arg(short, long, default_value = "0")]
        start: u32,

        /// Key store to load before and save after playing
        #[arg(short, long)]
        keys: Option<PathBuf>,

        /// Comma-separated commands to run instead of reading stdin
        #[arg(long)]
        script: Option<String>,
    },

    /// List or edit the keys in a saved key store
    Keys {
        /// Key store file (JSON)
        file: PathBuf,

        /// Sort order
        #[arg(long, value_enum, default_value = "name")]
        sort: SortBy,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        #[command(subcommand)]
        edit: Option<KeyEdit>,
    },

    /// Write a starter dialogue file
    New {
        /// File to create
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum KeyEdit {
    /// Create a key or change its value
    Set {
        /// Key name
        name: String,

        /// New value
        #[arg(allow_negative_numbers = true)]
        number: i32,
    },

    /// Delete a key
    Remove {
        /// Key name
        name: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Name,
    Number,
}

impl From<SortBy> for KeySort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Name => KeySort::Name,
            SortBy::Number => KeySort::Number,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::Show { file } => commands::show::run(&file),
        Commands::Play {
            file,
            start,
            keys,
            script,
        } => commands::play::run(&file, start, keys.as_deref(), script.as_deref()),
        Commands::Keys {
            file,
            sort,
            desc,
            edit: None,
        } => commands::keys::run(&file, sort.into(), desc),
        Commands::Keys {
            file,
            edit: Some(KeyEdit::Set { name, number }),
            ..
        } => commands::keys::set(&file, &name, number),
        Commands::Keys {
            file,
            edit: Some(KeyEdit::Remove { name }),
            ..
        } => commands::keys::remove(&file, &name),
        Commands::New { file } => commands::new::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
