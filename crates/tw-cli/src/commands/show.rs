use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tw_core::TableKind;
use tw_engine::weight::{entry_weight, source_weight};

pub fn run(files: &[PathBuf], collection: Option<&str>, table_id: &str) -> Result<(), String> {
    let library = super::load_library(files)?;
    let collection = super::resolve_collection(&library, collection)?;
    let table = library
        .table(collection, table_id)
        .ok_or_else(|| format!("unknown table \"{table_id}\""))?;

    println!(
        "  {} ({}) {}",
        table.name.bold(),
        table.id,
        format!("[{}]", table.kind_name()).dimmed()
    );
    if let Some(description) = &table.description {
        println!("  {description}");
    }
    if !table.tags.is_empty() {
        println!("  Tags: {}", table.tags.join(", "));
    }
    if let Some(parent) = &table.extends {
        println!("  Extends: {parent}");
    }
    if let Some(source) = &table.source {
        match source.page {
            Some(page) => println!("  Source: {} p.{page}", source.book),
            None => println!("  Source: {}", source.book),
        }
    }
    if table.hidden {
        println!("  {}", "(hidden)".dimmed());
    }
    println!();

    match &table.kind {
        TableKind::Simple { entries } => {
            let mut display = Table::new();
            display.set_content_arrangement(ContentArrangement::Dynamic);
            display.set_header(vec!["Id", "Value", "Weight"]);
            for entry in entries {
                display.add_row(vec![
                    entry.id.clone(),
                    super::truncate(&entry.value, 60),
                    format_weight(entry_weight(entry)),
                ]);
            }
            println!("{display}");
            println!();
            println!("  {} entries", entries.len());
        }
        TableKind::Composite { sources } => {
            let mut display = Table::new();
            display.set_content_arrangement(ContentArrangement::Dynamic);
            display.set_header(vec!["Source table", "Weight"]);
            for source in sources {
                display.add_row(vec![
                    source.table_id.clone(),
                    format_weight(source_weight(source)),
                ]);
            }
            println!("{display}");
            println!();
            println!("  {} sources", sources.len());
        }
        TableKind::Collection { members } => {
            for member in members {
                println!("  - {member}");
            }
            println!();
            println!("  {} members", members.len());
        }
    }

    Ok(())
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{weight:.0}")
    } else {
        format!("{weight}")
    }
}
