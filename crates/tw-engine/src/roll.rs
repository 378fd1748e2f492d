//! The public roll entry points.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{EngineError, EngineResult};
use crate::expand::expand;
use crate::lookup::TableLookup;
use crate::resolve::{ResolveCtx, resolve_table};
use crate::result::RollResult;
use crate::trace::{TraceNode, TraceStep};

/// Configuration for a [`Roller`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RollOptions {
    /// Record a [`TraceNode`] tree on every result.
    pub trace: bool,
    /// Seed for the random source. `None` seeds from the operating system;
    /// a fixed seed makes every roll reproducible.
    pub seed: Option<u64>,
}

impl RollOptions {
    /// Enable tracing.
    pub fn with_trace(mut self) -> Self {
        self.trace = true;
        self
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Rolls tables and templates against an injected lookup.
///
/// Owns the single random source all selection flows through: given the same
/// document state and the same seed, a sequence of rolls is reproducible.
pub struct Roller<'a> {
    lookup: &'a dyn TableLookup,
    trace: bool,
    rng: StdRng,
}

impl<'a> Roller<'a> {
    /// Create a roller over the given lookup.
    pub fn new(lookup: &'a dyn TableLookup, options: RollOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            lookup,
            trace: options.trace,
            rng,
        }
    }

    /// Roll a table: resolve it, expand the resulting value, and assemble
    /// the final result.
    pub fn roll_table(&mut self, collection: &str, table_id: &str) -> EngineResult<RollResult> {
        let table = self.lookup.table(collection, table_id).ok_or_else(|| {
            EngineError::UnknownReference {
                id: table_id.to_string(),
            }
        })?;

        let ctx = ResolveCtx {
            lookup: self.lookup,
            trace: self.trace,
        };
        let resolved = resolve_table(table, collection, &ctx, &mut self.rng, 0)?;
        let expansion = expand(&resolved.value, collection, &ctx, &mut self.rng, 0)?;

        let mut descriptions = resolved.descriptions;
        descriptions.extend(expansion.descriptions);

        let mut trace = resolved.trace;
        if let Some(node) = &mut trace {
            node.children.extend(expansion.trace_children);
        }

        Ok(RollResult {
            value: expansion.text,
            result_type: resolved.result_type.or(expansion.result_type),
            descriptions,
            trace,
        })
    }

    /// Roll a template: expand its text and assemble the final result.
    pub fn roll_template(
        &mut self,
        collection: &str,
        template_id: &str,
    ) -> EngineResult<RollResult> {
        let template = self.lookup.template(collection, template_id).ok_or_else(|| {
            EngineError::UnknownReference {
                id: template_id.to_string(),
            }
        })?;

        let ctx = ResolveCtx {
            lookup: self.lookup,
            trace: self.trace,
        };
        let expansion = expand(&template.text, collection, &ctx, &mut self.rng, 0)?;

        let trace = self.trace.then(|| {
            let mut node =
                TraceNode::new(&template.id, &template.name, TraceStep::Template, 1.0, 1.0);
            node.children.extend(expansion.trace_children);
            node
        });

        Ok(RollResult {
            value: expansion.text,
            result_type: template.result_type.clone().or(expansion.result_type),
            descriptions: expansion.descriptions,
            trace,
        })
    }
}
