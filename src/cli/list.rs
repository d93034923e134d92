use colored::Colorize;
use comfy_table::{Cell, Table};

use super::load_dataset;
use crate::error::Result;
use crate::fmt;
use crate::loader::Sources;
use crate::view::{derive_page, filter_clients, page_count, Filter, ListState, NO_CLIENTS};

pub fn run(sources: &Sources, filter: Filter, page: usize) -> Result<()> {
    let data = load_dataset(sources)?;

    let pages = page_count(filter_clients(&data.clients, &filter).len());
    let mut state = ListState::new(filter);
    // Out-of-range pages clamp to the nearest valid one.
    state.goto_page(page.clamp(1, pages.max(1)), pages);

    let view = derive_page(&data.clients, &state);
    if view.is_empty() {
        println!("{NO_CLIENTS}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Nome", "CPF/CNPJ", "Email", "Agência"]);
    for c in &view.rows {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(fmt::tax_id(&c.tax_id)),
            Cell::new(&c.email),
            Cell::new(fmt::code(c.branch_code)),
        ]);
    }
    println!("{}\n{table}", "Lista de Clientes".bold());
    println!(
        "Página {} de {} ({} clientes)",
        view.page, view.page_count, view.total
    );
    Ok(())
}
