//! Probability statistics over table definitions, without rolling.
//!
//! The same math the resolver uses for selection, exposed as a read-only
//! view for charts and listings. Rows always cover every candidate —
//! including unselectable weight-0 ones, which simply report 0%.

use tw_core::{Table, TableKind};

use crate::error::{EngineError, EngineResult};
use crate::inherit::{effective_entries, entry_count};
use crate::lookup::TableLookup;
use crate::weight::{entry_weight, source_weight};

/// One candidate's share of a table's outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    /// Entry id, source table id, or member table id.
    pub id: String,
    /// Display label: entry value or referenced table name.
    pub label: String,
    /// Effective weight (entry count, for collection members).
    pub weight: f64,
    /// Selection probability in percent. 0 when the total weight is 0.
    pub percent: f64,
}

/// Aggregate weight statistics over a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightSummary {
    /// Smallest effective weight.
    pub min: f64,
    /// Largest effective weight.
    pub max: f64,
    /// Mean effective weight.
    pub avg: f64,
}

/// The full probability distribution of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// One row per candidate, in declaration order.
    pub rows: Vec<DistributionRow>,
    /// Aggregate weight statistics.
    pub weights: WeightSummary,
    /// Distinct entry result types in order of first appearance (simple
    /// tables only).
    pub result_types: Vec<String>,
}

/// Compute the selection distribution of a table.
///
/// Simple tables use their effective entries (inheritance applied);
/// composites their source weights; collections their members' entry
/// counts. Never rolls and never fails on a zero-weight pool — every row
/// just reports 0%.
pub fn distribution(
    table: &Table,
    collection: &str,
    lookup: &dyn TableLookup,
) -> EngineResult<Distribution> {
    let mut result_types = Vec::new();

    let rows: Vec<DistributionRow> = match &table.kind {
        TableKind::Simple { .. } => {
            let entries = effective_entries(table, collection, lookup)?;
            for entry in &entries {
                if let Some(rt) = &entry.result_type {
                    if !result_types.contains(rt) {
                        result_types.push(rt.clone());
                    }
                }
            }
            entries
                .iter()
                .map(|entry| DistributionRow {
                    id: entry.id.clone(),
                    label: entry.value.clone(),
                    weight: entry_weight(entry),
                    percent: 0.0,
                })
                .collect()
        }

        TableKind::Composite { sources } => sources
            .iter()
            .map(|source| DistributionRow {
                id: source.table_id.clone(),
                label: lookup
                    .table(collection, &source.table_id)
                    .map_or_else(|| source.table_id.clone(), |t| t.name.clone()),
                weight: source_weight(source),
                percent: 0.0,
            })
            .collect(),

        TableKind::Collection { members } => {
            let mut rows = Vec::with_capacity(members.len());
            for member_id in members {
                let member = lookup.table(collection, member_id).ok_or_else(|| {
                    EngineError::UnknownReference {
                        id: member_id.clone(),
                    }
                })?;
                let count = entry_count(member, collection, lookup)?;
                rows.push(DistributionRow {
                    id: member.id.clone(),
                    label: member.name.clone(),
                    weight: count as f64,
                    percent: 0.0,
                });
            }
            rows
        }
    };

    Ok(finish(rows, result_types))
}

fn finish(mut rows: Vec<DistributionRow>, result_types: Vec<String>) -> Distribution {
    let total: f64 = rows.iter().map(|r| r.weight).sum();
    if total > 0.0 {
        for row in &mut rows {
            row.percent = row.weight / total * 100.0;
        }
    }

    let weights = if rows.is_empty() {
        WeightSummary::default()
    } else {
        WeightSummary {
            min: rows.iter().map(|r| r.weight).fold(f64::INFINITY, f64::min),
            max: rows.iter().map(|r| r.weight).fold(0.0, f64::max),
            avg: total / rows.len() as f64,
        }
    };

    Distribution {
        rows,
        weights,
        result_types,
    }
}
