use std::path::PathBuf;

use colored::Colorize;
use tw_engine::{MAX_INHERIT_DEPTH, inheritance_chain};

pub fn run(files: &[PathBuf], collection: Option<&str>, table_id: &str) -> Result<(), String> {
    let library = super::load_library(files)?;
    let collection = super::resolve_collection(&library, collection)?;
    let table = library
        .table(collection, table_id)
        .ok_or_else(|| format!("unknown table \"{table_id}\""))?;

    let chain = inheritance_chain(table, collection, &library);

    for link in &chain {
        let indent = "  ".repeat(link.level);
        let marker = if link.level == 0 { "" } else { "^ " };
        println!(
            "  {indent}{marker}{} ({}) {}",
            link.name.bold(),
            link.table_id,
            format!("[{} entries]", link.entry_count).dimmed()
        );
    }

    if chain.len() == 1 && table.extends.is_none() {
        println!();
        println!("  No parent tables.");
    } else if let Some(last) = chain.last() {
        let truncated = chain.len() > MAX_INHERIT_DEPTH
            && library
                .table(collection, &last.table_id)
                .and_then(|t| t.extends.as_ref())
                .is_some();
        if truncated {
            println!();
            println!(
                "  {}",
                format!("(chain continues past the {MAX_INHERIT_DEPTH}-hop bound; deeper entries are ignored)").dimmed()
            );
        }
    }

    Ok(())
}
