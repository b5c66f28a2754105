//! aprovatec CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "aprovatec",
    version,
    about = "Semester grade and attendance tracker"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate semester files locally
    Evaluate {
        /// Path to a semester .toml file or directory
        path: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the evaluation report as JSON (single semester only)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check semester files before saving them
    Validate {
        /// Path to a semester .toml file or directory
        path: PathBuf,
    },

    /// Create a starter config and an example semester
    Init,

    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,

        /// Password (falls back to APROVATEC_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Password (falls back to APROVATEC_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// List stored semesters
    List {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Save a semester file to the backend
    Save {
        /// Path to a semester .toml file
        path: PathBuf,

        /// Update the stored semester with this id instead of creating one
        #[arg(long)]
        id: Option<String>,
    },

    /// Delete a stored semester
    Delete {
        /// Stored semester id
        id: String,
    },

    /// Write a stored semester back to an editable .toml file
    Fetch {
        /// Stored semester id
        id: String,

        /// Destination file (prints to stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare stored figures with a local evaluation
    Check {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if any stored figure disagrees
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Export a printable HTML page
    Export {
        /// Semester .toml file to export; exports the stored history when omitted
        path: Option<PathBuf>,

        /// Destination HTML file
        #[arg(long, default_value = "aprovatec-report.html")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("aprovatec_cli=info,aprovatec_core=info,aprovatec_client=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Evaluate {
            path,
            format,
            output,
        } => commands::evaluate::execute(path, format, output),
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::Init => commands::init::execute(),
        Commands::Login { email, password } => {
            commands::auth::login(config, email, password).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(config, name, email, password).await,
        Commands::Logout => commands::auth::logout(config),
        Commands::List { format } => commands::list::execute(config, format).await,
        Commands::Save { path, id } => commands::save::execute(config, path, id).await,
        Commands::Delete { id } => commands::delete::execute(config, id).await,
        Commands::Fetch { id, output } => commands::fetch::execute(config, id, output).await,
        Commands::Check {
            format,
            fail_on_mismatch,
        } => commands::check::execute(config, format, fail_on_mismatch).await,
        Commands::Export { path, output } => commands::export::execute(config, path, output).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
