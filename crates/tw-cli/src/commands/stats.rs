use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tw_engine::distribution;

pub fn run(files: &[PathBuf], collection: Option<&str>, table_id: &str) -> Result<(), String> {
    let library = super::load_library(files)?;
    let collection = super::resolve_collection(&library, collection)?;
    let table = library
        .table(collection, table_id)
        .ok_or_else(|| format!("unknown table \"{table_id}\""))?;

    let dist = distribution(table, collection, &library).map_err(|e| e.to_string())?;

    println!(
        "  {} ({}) {}",
        table.name.bold(),
        table.id,
        format!("[{}]", table.kind_name()).dimmed()
    );
    println!();

    if dist.rows.is_empty() {
        println!("  No candidates.");
        return Ok(());
    }

    let mut display = Table::new();
    display.set_content_arrangement(ContentArrangement::Dynamic);
    display.set_header(vec!["Id", "Label", "Weight", "Chance"]);
    for row in &dist.rows {
        display.add_row(vec![
            row.id.clone(),
            super::truncate(&row.label, 50),
            format!("{}", row.weight),
            format!("{:.1}%", row.percent),
        ]);
    }
    println!("{display}");
    println!();

    println!(
        "  weights: min {} / max {} / avg {:.2}",
        dist.weights.min, dist.weights.max, dist.weights.avg
    );
    if !dist.result_types.is_empty() {
        println!("  result types: {}", dist.result_types.join(", "));
    }

    Ok(())
}
