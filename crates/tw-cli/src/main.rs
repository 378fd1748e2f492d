//! CLI frontend for the Tablewright random-table engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Tablewright — roll and inspect random-generator tables",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a table and print the result
    Roll {
        /// Table id to roll
        table_id: String,

        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to resolve in (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Record and print the resolution trace
        #[arg(short, long)]
        trace: bool,

        /// Number of rolls
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Roll a template and print the result
    Template {
        /// Template id to roll
        template_id: String,

        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to resolve in (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Record and print the resolution trace
        #[arg(short, long)]
        trace: bool,

        /// Number of rolls
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// List tables and templates in a collection
    List {
        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to list (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,

        /// Filter by tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Include hidden tables
        #[arg(long)]
        hidden: bool,
    },

    /// Show a table's definition
    Show {
        /// Table id to show
        table_id: String,

        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to resolve in (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Show selection probabilities for a table
    Stats {
        /// Table id to analyze
        table_id: String,

        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to resolve in (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Show a table's inheritance chain
    Chain {
        /// Table id to walk
        table_id: String,

        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,

        /// Collection to resolve in (default: the only loaded collection)
        #[arg(short, long)]
        collection: Option<String>,
    },

    /// Validate loaded documents and report issues
    Check {
        /// Document file(s) to load (repeatable)
        #[arg(short, long, default_value = "tables.json")]
        file: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            table_id,
            file,
            collection,
            seed,
            trace,
            count,
        } => commands::roll::run(&file, collection.as_deref(), &table_id, seed, trace, count),
        Commands::Template {
            template_id,
            file,
            collection,
            seed,
            trace,
            count,
        } => {
            commands::template::run(&file, collection.as_deref(), &template_id, seed, trace, count)
        }
        Commands::List {
            file,
            collection,
            tag,
            hidden,
        } => commands::list::run(&file, collection.as_deref(), tag.as_deref(), hidden),
        Commands::Show {
            table_id,
            file,
            collection,
        } => commands::show::run(&file, collection.as_deref(), &table_id),
        Commands::Stats {
            table_id,
            file,
            collection,
        } => commands::stats::run(&file, collection.as_deref(), &table_id),
        Commands::Chain {
            table_id,
            file,
            collection,
        } => commands::chain::run(&file, collection.as_deref(), &table_id),
        Commands::Check { file } => commands::check::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
