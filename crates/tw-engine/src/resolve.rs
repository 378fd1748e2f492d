//! Per-variant table resolution.
//!
//! Dispatches on the table kind: simple tables pick an entry by weight,
//! composites pick a source table and resolve it, collections pick a member
//! weighted by entry count and resolve it. Values come out raw — expansion
//! of embedded expressions happens afterwards.

use rand::rngs::StdRng;

use tw_core::{Table, TableKind};

use crate::error::{EngineError, EngineResult};
use crate::expand::MAX_EXPANSION_DEPTH;
use crate::inherit::{effective_entries, entry_count};
use crate::lookup::TableLookup;
use crate::result::EntryDescription;
use crate::trace::{TraceNode, TraceStep};
use crate::weight::{entry_weight, pick_weighted, source_weight};

/// Shared, immutable state for one roll call.
pub(crate) struct ResolveCtx<'a> {
    /// The lookup port the host injected.
    pub lookup: &'a dyn TableLookup,
    /// Whether to record trace nodes.
    pub trace: bool,
}

/// The raw outcome of resolving one table (pre-expansion).
#[derive(Debug)]
pub(crate) struct Resolved {
    /// The chosen value, not yet expanded.
    pub value: String,
    /// Result type declared by the chosen entry, if any.
    pub result_type: Option<String>,
    /// Provenance, outermost table first.
    pub descriptions: Vec<EntryDescription>,
    /// Trace node for this resolution, when tracing is enabled.
    pub trace: Option<TraceNode>,
}

/// Resolve one table to a raw value.
///
/// `depth` is the shared recursion budget for the whole roll call; composite
/// and collection indirection consume it the same way expression expansion
/// does, so cyclic source graphs terminate with `MaxExpansionDepth` instead
/// of overflowing the stack.
pub(crate) fn resolve_table(
    table: &Table,
    collection: &str,
    ctx: &ResolveCtx<'_>,
    rng: &mut StdRng,
    depth: usize,
) -> EngineResult<Resolved> {
    if depth >= MAX_EXPANSION_DEPTH {
        return Err(EngineError::MaxExpansionDepth { depth });
    }

    match &table.kind {
        TableKind::Simple { .. } => {
            let entries = effective_entries(table, collection, ctx.lookup)?;
            let pick = pick_weighted(&entries, entry_weight, rng).ok_or_else(|| {
                EngineError::EmptyPool {
                    table_id: table.id.clone(),
                }
            })?;
            let entry = &entries[pick.index];

            let trace = ctx.trace.then(|| {
                TraceNode::new(
                    &table.id,
                    &table.name,
                    TraceStep::Entry {
                        entry_id: entry.id.clone(),
                        value: entry.value.clone(),
                    },
                    pick.weight,
                    pick.probability,
                )
            });

            Ok(Resolved {
                value: entry.value.clone(),
                result_type: entry.result_type.clone(),
                descriptions: vec![EntryDescription {
                    table_id: table.id.clone(),
                    table_name: table.name.clone(),
                    rolled_value: entry.value.clone(),
                    description: entry.description.clone(),
                }],
                trace,
            })
        }

        TableKind::Composite { sources } => {
            let pick = pick_weighted(sources, source_weight, rng).ok_or_else(|| {
                EngineError::EmptyPool {
                    table_id: table.id.clone(),
                }
            })?;
            let source = &sources[pick.index];
            let target = ctx.lookup.table(collection, &source.table_id).ok_or_else(|| {
                EngineError::UnknownReference {
                    id: source.table_id.clone(),
                }
            })?;

            let nested = resolve_table(target, collection, ctx, rng, depth + 1)?;
            let step = TraceStep::Source {
                table_id: source.table_id.clone(),
            };
            Ok(wrap_nested(table, nested, step, pick.weight, pick.probability, ctx))
        }

        TableKind::Collection { members } => {
            let mut candidates = Vec::with_capacity(members.len());
            for member_id in members {
                let member = ctx.lookup.table(collection, member_id).ok_or_else(|| {
                    EngineError::UnknownReference {
                        id: member_id.clone(),
                    }
                })?;
                let count = entry_count(member, collection, ctx.lookup)?;
                candidates.push((member, count));
            }

            let pick = pick_weighted(&candidates, |(_, count)| *count as f64, rng).ok_or_else(
                || EngineError::EmptyPool {
                    table_id: table.id.clone(),
                },
            )?;
            let (member, _) = candidates[pick.index];

            let nested = resolve_table(member, collection, ctx, rng, depth + 1)?;
            let step = TraceStep::Member {
                table_id: member.id.clone(),
            };
            Ok(wrap_nested(table, nested, step, pick.weight, pick.probability, ctx))
        }
    }
}

/// Propagate a nested resolution through a composite or collection node:
/// the value passes through unchanged, and the outer table's own
/// attribution is prepended to the nested description list.
fn wrap_nested(
    table: &Table,
    nested: Resolved,
    step: TraceStep,
    weight: f64,
    probability: f64,
    ctx: &ResolveCtx<'_>,
) -> Resolved {
    let Resolved {
        value,
        result_type,
        descriptions: nested_descriptions,
        trace: nested_trace,
    } = nested;

    let mut descriptions = vec![EntryDescription {
        table_id: table.id.clone(),
        table_name: table.name.clone(),
        rolled_value: value.clone(),
        description: table.description.clone(),
    }];
    descriptions.extend(nested_descriptions);

    let trace = ctx.trace.then(|| {
        let mut node = TraceNode::new(&table.id, &table.name, step, weight, probability);
        node.children.extend(nested_trace);
        node
    });

    Resolved {
        value,
        result_type,
        descriptions,
        trace,
    }
}
