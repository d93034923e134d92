use crate::error::{AppError, Result};
use crate::loader::{self, SourceFetcher, Sources};
use crate::settings::{settings_path, settings_file_exists};

pub fn run(sources: &Sources) -> Result<()> {
    let path = settings_path();
    if settings_file_exists() {
        println!("Settings:   {}", path.display());
    } else {
        println!("Settings:   {} (not created, using defaults)", path.display());
    }
    println!("Clients:    {}", sources.clients);
    println!("Accounts:   {}", sources.accounts);
    println!("Branches:   {}", sources.branches);

    let outcome = loader::load(sources, &SourceFetcher::new());
    println!();
    if let Some(msg) = outcome.error {
        return Err(AppError::LoadFailed(msg));
    }
    let data = &outcome.dataset;
    if data.is_empty() {
        println!("The configured sheets have no records.");
        return Ok(());
    }
    println!("Clientes:   {}", data.clients.len());
    println!("Contas:     {}", data.accounts.len());
    println!("Agências:   {}", data.branches.len());
    Ok(())
}
