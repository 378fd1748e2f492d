use std::path::PathBuf;

use comfy_table::{ContentArrangement, Table};

pub fn run(
    files: &[PathBuf],
    collection: Option<&str>,
    tag: Option<&str>,
    show_hidden: bool,
) -> Result<(), String> {
    let library = super::load_library(files)?;
    let collection = super::resolve_collection(&library, collection)?;
    let doc = library
        .document(collection)
        .ok_or_else(|| format!("unknown collection \"{collection}\""))?;

    let tables: Vec<_> = doc
        .tables()
        .iter()
        .filter(|t| show_hidden || !t.hidden)
        .filter(|t| tag.is_none_or(|wanted| t.tags.iter().any(|have| have == wanted)))
        .collect();

    if tables.is_empty() && doc.templates().is_empty() {
        println!("  No tables found.");
        return Ok(());
    }

    if !tables.is_empty() {
        let mut display = Table::new();
        display.set_content_arrangement(ContentArrangement::Dynamic);
        display.set_header(vec!["Id", "Name", "Kind", "Size", "Tags"]);

        for table in &tables {
            let name = if table.hidden {
                format!("{} (hidden)", table.name)
            } else {
                table.name.clone()
            };
            display.add_row(vec![
                table.id.clone(),
                name,
                table.kind_name().to_string(),
                table.own_count().to_string(),
                table.tags.join(", "),
            ]);
        }
        println!("{display}");
    }

    if !doc.templates().is_empty() {
        let mut display = Table::new();
        display.set_content_arrangement(ContentArrangement::Dynamic);
        display.set_header(vec!["Id", "Name", "Text"]);
        for template in doc.templates() {
            display.add_row(vec![
                template.id.clone(),
                template.name.clone(),
                super::truncate(&template.text, 50),
            ]);
        }
        println!("{display}");
    }

    println!();
    println!(
        "  {} tables, {} templates",
        tables.len(),
        doc.template_count()
    );

    Ok(())
}
