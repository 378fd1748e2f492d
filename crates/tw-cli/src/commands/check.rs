use std::path::PathBuf;

use colored::Colorize;
use tw_engine::validate_document;

pub fn run(files: &[PathBuf]) -> Result<(), String> {
    let library = super::load_library(files)?;

    let mut errors = 0usize;
    let mut warnings = 0usize;

    for collection in library.collections() {
        let Some(doc) = library.document(collection) else {
            continue;
        };
        for issue in validate_document(doc, collection, &library) {
            let line = format!("{collection}: {issue}");
            if issue.is_error {
                errors += 1;
                eprintln!("  {}", line.red());
            } else {
                warnings += 1;
                eprintln!("  {}", line.yellow());
            }
        }
    }

    if errors > 0 {
        return Err(format!(
            "{errors} error{}, {warnings} warning{}",
            if errors == 1 { "" } else { "s" },
            if warnings == 1 { "" } else { "s" },
        ));
    }

    let collections = library.collections();
    println!(
        "  All checks passed for {} collection{}.",
        collections.len(),
        if collections.len() == 1 { "" } else { "s" },
    );
    if warnings > 0 {
        println!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }

    Ok(())
}
