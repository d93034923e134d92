use colored::Colorize;

use super::load_dataset;
use crate::error::{AppError, Result};
use crate::fmt;
use crate::loader::Sources;
use crate::view::{find_client, ClientDetail, Section};

pub fn run(sources: &Sources, key: &str) -> Result<()> {
    let data = load_dataset(sources)?;
    let client =
        find_client(&data.clients, key).ok_or_else(|| AppError::NotFound(key.to_string()))?;

    let detail = ClientDetail::build(client, &data);
    println!("{}", "Detalhes do Cliente".bold());
    for section in detail.sections() {
        println!();
        print!("{}", render_section(&section));
    }
    Ok(())
}

fn render_section(section: &Section) -> String {
    let mut out = format!("{}\n", section.title.yellow().bold());
    if let Some(note) = section.note {
        out.push_str(&format!("  {note}\n"));
    }
    let width = section
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);
    for field in &section.fields {
        let pad = width - field.label.chars().count();
        let value = if field.value == fmt::UNAVAILABLE {
            field.value.dimmed().to_string()
        } else {
            field.value.clone()
        };
        out.push_str(&format!("  {}:{} {value}\n", field.label, " ".repeat(pad)));
    }
    out
}
