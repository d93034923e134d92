use super::SourceArgs;
use crate::error::{AppError, Result};
use crate::settings::{load_settings, normalize_location, save_settings, Settings};

pub fn set(args: &SourceArgs) -> Result<()> {
    let (clients, accounts, branches) = (
        args.clients.as_deref(),
        args.accounts.as_deref(),
        args.branches.as_deref(),
    );
    if clients.is_none() && accounts.is_none() && branches.is_none() {
        return Err(AppError::Settings(
            "nothing to set; pass --clients, --accounts or --branches".into(),
        ));
    }
    let mut settings = load_settings();
    if let Some(loc) = clients {
        settings.clients_url = normalize_location(loc);
    }
    if let Some(loc) = accounts {
        settings.accounts_url = normalize_location(loc);
    }
    if let Some(loc) = branches {
        settings.branches_url = normalize_location(loc);
    }
    save_settings(&settings)?;
    println!("Sources updated.");
    Ok(())
}

pub fn reset() -> Result<()> {
    save_settings(&Settings::default())?;
    println!("Sources reset to the published sheets.");
    Ok(())
}
