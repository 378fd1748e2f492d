//! Inheritance resolution for `extends` chains.
//!
//! A table may extend a parent table: the child's entries shadow parent
//! entries with the same id, and unmatched parent entries are appended after
//! the child's, in parent order. Chains are walked at most
//! [`MAX_INHERIT_DEPTH`] hops; past the bound resolution silently truncates
//! rather than failing, so cyclic or absurdly deep chains degrade instead of
//! looping.

use std::collections::HashSet;

use tw_core::{Entry, Table, TableKind};

use crate::error::{EngineError, EngineResult};
use crate::lookup::TableLookup;

/// Maximum number of `extends` hops followed before truncating.
pub const MAX_INHERIT_DEPTH: usize = 5;

/// One step of an inheritance chain, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainLink {
    /// Id of the table at this level.
    pub table_id: String,
    /// Display name of the table.
    pub name: String,
    /// The table's own candidate count (entries, sources, or members).
    pub entry_count: usize,
    /// Distance from the starting table (0 = the table itself).
    pub level: usize,
}

/// Build the effective entry set for a table, following its `extends` chain.
///
/// Child entries come first and shadow parent entries by id; unmatched
/// parent entries are appended in parent order. Non-simple tables contribute
/// no entries of their own but their chain is still walked. A dangling
/// `extends` target is an [`EngineError::UnknownReference`]; exceeding the
/// depth bound is not an error.
pub fn effective_entries(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
) -> EngineResult<Vec<Entry>> {
    let mut entries: Vec<Entry> = table.own_entries().to_vec();
    let mut seen: HashSet<String> = entries.iter().map(|e| e.id.clone()).collect();

    let mut current = table;
    let mut hops = 0;
    while let Some(parent_id) = &current.extends {
        if hops >= MAX_INHERIT_DEPTH {
            break;
        }
        let parent = lookup
            .table(collection, parent_id)
            .ok_or_else(|| EngineError::UnknownReference {
                id: parent_id.clone(),
            })?;
        for entry in parent.own_entries() {
            if seen.insert(entry.id.clone()) {
                entries.push(entry.clone());
            }
        }
        current = parent;
        hops += 1;
    }

    Ok(entries)
}

/// The inheritance chain of a table, for display.
///
/// Starts at the table itself (level 0) and follows `extends` up to the
/// depth bound. A dangling parent ends the chain without error — this is a
/// read-only view, and the roll path reports the missing reference.
pub fn inheritance_chain(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
) -> Vec<ChainLink> {
    let mut chain = vec![ChainLink {
        table_id: table.id.clone(),
        name: table.name.clone(),
        entry_count: table.own_count(),
        level: 0,
    }];

    let mut current = table;
    while let Some(parent_id) = &current.extends {
        let level = chain.len();
        if level > MAX_INHERIT_DEPTH {
            break;
        }
        let Some(parent) = lookup.table(collection, parent_id) else {
            break;
        };
        chain.push(ChainLink {
            table_id: parent.id.clone(),
            name: parent.name.clone(),
            entry_count: parent.own_count(),
            level,
        });
        current = parent;
    }

    chain
}

/// Candidate count of a table as seen by collection weighting.
///
/// Simple tables count their effective entries (inheritance applied);
/// composites count their sources; collections count their members. A count
/// of 0 gives the table weight 0 in a collection pick, excluding it.
pub fn entry_count(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
) -> EngineResult<usize> {
    match &table.kind {
        TableKind::Simple { .. } => Ok(effective_entries(table, collection, lookup)?.len()),
        TableKind::Composite { sources } => Ok(sources.len()),
        TableKind::Collection { members } => Ok(members.len()),
    }
}
