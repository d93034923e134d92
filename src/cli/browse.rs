use super::load_dataset;
use crate::browser::ClientBrowser;
use crate::error::Result;
use crate::loader::Sources;
use crate::view::{Filter, ListState};

pub fn run(sources: &Sources, name: Option<String>, tax_id: Option<String>) -> Result<()> {
    println!("Carregando clientes...");
    let data = load_dataset(sources)?;

    let filter = Filter {
        name: name.unwrap_or_default(),
        tax_id: tax_id.unwrap_or_default(),
    };
    let mut browser = ClientBrowser::new(data, ListState::new(filter));
    browser.run()?;
    Ok(())
}
