mod browser;
mod cli;
mod coerce;
mod error;
mod fmt;
mod loader;
mod models;
mod settings;
mod tui;
mod view;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, SourcesCommands};
use view::Filter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let sources = cli.sources.resolve();

    let result = match cli.command {
        None => cli::browse::run(&sources, None, None),
        Some(Commands::Browse { name, tax_id }) => cli::browse::run(&sources, name, tax_id),
        Some(Commands::List { name, tax_id, page }) => {
            let filter = Filter {
                name: name.unwrap_or_default(),
                tax_id: tax_id.unwrap_or_default(),
            };
            cli::list::run(&sources, filter, page)
        }
        Some(Commands::Show { client }) => cli::show::run(&sources, &client),
        Some(Commands::Status) => cli::status::run(&sources),
        Some(Commands::Sources { command }) => match command {
            SourcesCommands::Set => cli::sources::set(&cli.sources),
            SourcesCommands::Reset => cli::sources::reset(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
