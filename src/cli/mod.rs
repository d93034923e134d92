pub mod browse;
pub mod list;
pub mod show;
pub mod sources;
pub mod status;

use clap::{Args, Parser, Subcommand};

use crate::error::{AppError, Result};
use crate::loader::{self, SourceFetcher, Sources};
use crate::models::Dataset;
use crate::settings::{load_settings, normalize_location};

#[derive(Parser)]
#[command(
    name = "clientes",
    about = "Browse bank clients, accounts and branches from published sheets."
)]
pub struct Cli {
    #[command(flatten)]
    pub sources: SourceArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-invocation overrides for the configured sheet locations.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Clients sheet (URL or CSV file path)
    #[arg(long, global = true)]
    pub clients: Option<String>,
    /// Accounts sheet (URL or CSV file path)
    #[arg(long, global = true)]
    pub accounts: Option<String>,
    /// Branches sheet (URL or CSV file path)
    #[arg(long, global = true)]
    pub branches: Option<String>,
}

impl SourceArgs {
    /// Settings file values with any command-line overrides applied.
    pub fn resolve(&self) -> Sources {
        let mut sources = load_settings().sources();
        if let Some(ref loc) = self.clients {
            sources.clients = normalize_location(loc);
        }
        if let Some(ref loc) = self.accounts {
            sources.accounts = normalize_location(loc);
        }
        if let Some(ref loc) = self.branches {
            sources.branches = normalize_location(loc);
        }
        sources
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively browse clients (default).
    Browse {
        /// Initial name filter
        #[arg(long)]
        name: Option<String>,
        /// Initial CPF/CNPJ filter
        #[arg(long = "tax-id")]
        tax_id: Option<String>,
    },
    /// Print one page of the client list.
    List {
        /// Name filter (case-insensitive substring)
        #[arg(long)]
        name: Option<String>,
        /// CPF/CNPJ filter (substring)
        #[arg(long = "tax-id")]
        tax_id: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Show a client's details, accounts and branch.
    Show {
        /// Client ID or CPF/CNPJ
        client: String,
    },
    /// Show configured sources and record counts.
    Status,
    /// Manage the configured sheet locations.
    Sources {
        #[command(subcommand)]
        command: SourcesCommands,
    },
}

#[derive(Subcommand)]
pub enum SourcesCommands {
    /// Store the locations given with --clients/--accounts/--branches.
    Set,
    /// Restore the published sheet URLs.
    Reset,
}

/// Load all three sheets, turning a failed load into an error for the user.
pub(crate) fn load_dataset(sources: &Sources) -> Result<Dataset> {
    let outcome = loader::load(sources, &SourceFetcher::new());
    match outcome.error {
        Some(msg) => Err(AppError::LoadFailed(msg)),
        None => Ok(outcome.dataset),
    }
}
