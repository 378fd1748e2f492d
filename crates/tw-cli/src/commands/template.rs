use std::path::PathBuf;

use colored::Colorize;
use tw_engine::{RollOptions, Roller};

pub fn run(
    files: &[PathBuf],
    collection: Option<&str>,
    template_id: &str,
    seed: Option<u64>,
    trace: bool,
    count: u32,
) -> Result<(), String> {
    let library = super::load_library(files)?;
    let collection = super::resolve_collection(&library, collection)?;

    let mut roller = Roller::new(&library, RollOptions { trace, seed });
    for i in 0..count {
        if count > 1 {
            println!("  {}", format!("Roll {}", i + 1).dimmed());
        }
        let result = roller
            .roll_template(collection, template_id)
            .map_err(|e| e.to_string())?;
        super::print_result(&result);
        if count > 1 && i + 1 < count {
            println!();
        }
    }

    Ok(())
}
