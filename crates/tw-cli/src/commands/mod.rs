pub mod chain;
pub mod check;
pub mod list;
pub mod roll;
pub mod show;
pub mod stats;
pub mod template;

use std::path::{Path, PathBuf};

use colored::Colorize;
use tw_core::{Library, TableDocument};
use tw_engine::RollResult;

/// Load every document file into a library. The collection slug comes from
/// the document's name, falling back to the file stem.
pub fn load_library(files: &[PathBuf]) -> Result<Library, String> {
    if files.is_empty() {
        return Err("no document files given".into());
    }

    let mut library = Library::new();
    for path in files {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let doc = TableDocument::from_json(&json)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        let slug = slug_for(path, &doc);
        library.insert(slug, doc).map_err(|e| e.to_string())?;
    }
    Ok(library)
}

fn slug_for(path: &Path, doc: &TableDocument) -> String {
    let slug = Library::slugify(&doc.meta.name);
    if slug.is_empty() {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "default".to_string())
    } else {
        slug
    }
}

/// Pick the collection to operate on: the explicit one if given, otherwise
/// the only loaded one.
pub fn resolve_collection<'a>(
    library: &'a Library,
    explicit: Option<&'a str>,
) -> Result<&'a str, String> {
    let loaded = library.collections();
    if let Some(slug) = explicit {
        if library.document(slug).is_some() {
            Ok(slug)
        } else {
            Err(format!(
                "unknown collection \"{slug}\" (loaded: {})",
                loaded.join(", ")
            ))
        }
    } else {
        match loaded.as_slice() {
            [] => Err("no collections loaded".into()),
            [only] => Ok(*only),
            _ => Err(format!(
                "multiple collections loaded; pick one with --collection ({})",
                loaded.join(", ")
            )),
        }
    }
}

/// Print one roll result: value, attributions, and the trace when present.
pub fn print_result(result: &RollResult) {
    println!("  {}", result.value.bold());
    if let Some(result_type) = &result.result_type {
        println!("  {}", format!("[{result_type}]").dimmed());
    }
    for attribution in &result.descriptions {
        let mut line = format!("via {} ({})", attribution.table_name, attribution.rolled_value);
        if let Some(text) = &attribution.description {
            line.push_str(": ");
            line.push_str(text);
        }
        println!("    {}", line.dimmed());
    }
    if let Some(trace) = &result.trace {
        println!();
        println!("  {}", "Trace".bold().underline());
        for line in trace.to_string().lines() {
            println!("  {line}");
        }
    }
}

/// Truncate a string for table cells, char-safe.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
