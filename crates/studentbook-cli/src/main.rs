//! studentbook CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "studentbook", version, about = "Flat-file student marks manager")]
struct Cli {
    /// Backing file (overrides the config file and STUDENTBOOK_DATA_FILE)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that prints a listing.
#[derive(clap::Args, Clone, Debug)]
pub struct ListingArgs {
    /// Sort column: id, name, c1, c2, c3, exam, total, percentage, grade
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Output format: table, json
    #[arg(long)]
    format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty backing file
    Init,

    /// List every student
    List {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Search by name or ID
    Search {
        /// Case-insensitive name fragment or ID fragment
        query: String,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Show students with one grade
    Grade {
        /// A, B, C, D or F
        grade: String,

        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Show a single student
    Show {
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Add a student
    Add {
        #[arg(long, allow_hyphen_values = true)]
        id: String,

        #[arg(long)]
        name: String,

        /// Coursework 1 (out of 20)
        #[arg(long, allow_hyphen_values = true)]
        c1: String,

        /// Coursework 2 (out of 20)
        #[arg(long, allow_hyphen_values = true)]
        c2: String,

        /// Coursework 3 (out of 20)
        #[arg(long, allow_hyphen_values = true)]
        c3: String,

        /// Exam (out of 100)
        #[arg(long, allow_hyphen_values = true)]
        exam: String,
    },

    /// Update a student's name or marks; omitted fields keep their value
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        c1: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        c2: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        c3: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        exam: Option<String>,
    },

    /// Delete a student
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Class average and grade distribution
    Stats {
        /// Output format: table, json
        #[arg(long)]
        format: Option<String>,
    },

    /// Re-read the backing file and report skipped lines
    Reload,

    /// Write a class report
    Export {
        /// Output path
        #[arg(long)]
        output: PathBuf,

        /// Output format: json, html
        #[arg(long, default_value = "json")]
        format: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studentbook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config_from(cli.config.as_deref())?;
    let data_file = cli.file.unwrap_or_else(|| config.data_path());
    let default_format = config.default_format.as_str();
    tracing::debug!("using data file {}", data_file.display());

    match cli.command {
        Commands::Init => commands::init::execute(&data_file),
        Commands::List { listing } => commands::list::execute(
            &data_file,
            commands::list::Selection::All,
            &listing,
            default_format,
        ),
        Commands::Search { query, listing } => commands::list::execute(
            &data_file,
            commands::list::Selection::Search(query),
            &listing,
            default_format,
        ),
        Commands::Grade { grade, listing } => commands::list::execute(
            &data_file,
            commands::list::Selection::Grade(grade),
            &listing,
            default_format,
        ),
        Commands::Show { id, format } => {
            commands::show::execute(&data_file, id, format.as_deref().unwrap_or(default_format))
        }
        Commands::Add {
            id,
            name,
            c1,
            c2,
            c3,
            exam,
        } => commands::add::execute(
            &data_file,
            studentbook_core::RecordForm {
                id,
                name,
                c1,
                c2,
                c3,
                exam,
            },
        ),
        Commands::Update {
            id,
            name,
            c1,
            c2,
            c3,
            exam,
        } => commands::update::execute(
            &data_file,
            id,
            commands::update::Changes {
                name,
                c1,
                c2,
                c3,
                exam,
            },
        ),
        Commands::Delete { id } => commands::delete::execute(&data_file, id),
        Commands::Stats { format } => {
            commands::stats::execute(&data_file, format.as_deref().unwrap_or(default_format))
        }
        Commands::Reload => commands::reload::execute(&data_file),
        Commands::Export { output, format } => {
            commands::export::execute(&data_file, &output, &format)
        }
    }
}
