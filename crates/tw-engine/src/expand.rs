//! Embedded expression expansion.
//!
//! Rolled values and template texts may contain `{{reference}}` placeholders
//! naming a table or template, optionally qualified with a collection slug
//! (`{{collection:table}}`). Each placeholder is resolved, its result is
//! itself expanded, and the expansion is substituted textually in place.
//! A shared depth budget bounds the recursion so cyclic references fail
//! with an error instead of hanging.

use rand::rngs::StdRng;

use crate::error::{EngineError, EngineResult};
use crate::resolve::{ResolveCtx, resolve_table};
use crate::result::EntryDescription;
use crate::trace::{TraceNode, TraceStep};

/// Ceiling on the shared resolution-depth counter of one roll call.
pub const MAX_EXPANSION_DEPTH: usize = 20;

/// The outcome of expanding one string.
#[derive(Debug)]
pub(crate) struct Expansion {
    /// The text with every placeholder substituted.
    pub text: String,
    /// First result type encountered, in order of appearance.
    pub result_type: Option<String>,
    /// Attributions in left-to-right, depth-first order.
    pub descriptions: Vec<EntryDescription>,
    /// Trace nodes for each placeholder, when tracing is enabled.
    pub trace_children: Vec<TraceNode>,
}

/// A reference parsed out of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RefSpec {
    /// Explicit collection qualifier, if the reference carried one.
    pub collection: Option<String>,
    /// The referenced table or template id.
    pub id: String,
}

/// Scan a string for `{{reference}}` placeholders without resolving them.
///
/// Used by the validator. An unterminated `{{` yields nothing, matching the
/// expander's behavior of leaving it verbatim.
pub(crate) fn references(text: &str) -> Vec<RefSpec> {
    let mut refs = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let (collection, id) = split_qualifier(after[..end].trim());
        refs.push(RefSpec {
            collection: collection.map(str::to_string),
            id: id.to_string(),
        });
        rest = &after[end + 2..];
    }
    refs
}

fn split_qualifier(reference: &str) -> (Option<&str>, &str) {
    match reference.split_once(':') {
        Some((collection, id)) => (Some(collection.trim()), id.trim()),
        None => (None, reference),
    }
}

/// Expand every placeholder in `text`, left to right.
pub(crate) fn expand(
    text: &str,
    collection: &str,
    ctx: &ResolveCtx<'_>,
    rng: &mut StdRng,
    depth: usize,
) -> EngineResult<Expansion> {
    let mut out = String::with_capacity(text.len());
    let mut result_type: Option<String> = None;
    let mut descriptions = Vec::new();
    let mut trace_children = Vec::new();

    let mut rest = text;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // Unterminated placeholder: keep the tail verbatim.
            out.push_str(&rest[start..]);
            return Ok(Expansion {
                text: out,
                result_type,
                descriptions,
                trace_children,
            });
        };
        let reference = after[..end].trim();
        rest = &after[end + 2..];

        let step = expand_reference(reference, collection, ctx, rng, depth)?;
        out.push_str(&step.text);
        descriptions.extend(step.descriptions);
        trace_children.extend(step.trace_children);
        if result_type.is_none() {
            result_type = step.result_type;
        }
    }
    out.push_str(rest);

    Ok(Expansion {
        text: out,
        result_type,
        descriptions,
        trace_children,
    })
}

/// Resolve one placeholder reference and expand its value in turn.
///
/// Tables are tried before templates. A qualified reference switches the
/// ambient collection for everything it pulls in — a value rolled from
/// another collection resolves its own nested references there.
fn expand_reference(
    reference: &str,
    ambient: &str,
    ctx: &ResolveCtx<'_>,
    rng: &mut StdRng,
    depth: usize,
) -> EngineResult<Expansion> {
    if depth >= MAX_EXPANSION_DEPTH {
        return Err(EngineError::MaxExpansionDepth { depth });
    }

    let (qualifier, id) = split_qualifier(reference);
    let collection = qualifier.unwrap_or(ambient);

    if let Some(table) = ctx.lookup.table(collection, id) {
        let resolved = resolve_table(table, collection, ctx, rng, depth + 1)?;
        let nested = expand(&resolved.value, collection, ctx, rng, depth + 1)?;

        let mut trace_children = Vec::new();
        if let Some(mut node) = resolved.trace {
            node.children.extend(nested.trace_children);
            trace_children.push(node);
        }

        let mut descriptions = resolved.descriptions;
        descriptions.extend(nested.descriptions);

        return Ok(Expansion {
            text: nested.text,
            result_type: resolved.result_type.or(nested.result_type),
            descriptions,
            trace_children,
        });
    }

    if let Some(template) = ctx.lookup.template(collection, id) {
        let nested = expand(&template.text, collection, ctx, rng, depth + 1)?;

        let mut trace_children = Vec::new();
        if ctx.trace {
            let mut node =
                TraceNode::new(&template.id, &template.name, TraceStep::Template, 1.0, 1.0);
            node.children.extend(nested.trace_children);
            trace_children.push(node);
        }

        return Ok(Expansion {
            text: nested.text,
            result_type: template.result_type.clone().or(nested.result_type),
            descriptions: nested.descriptions,
            trace_children,
        });
    }

    Err(EngineError::UnknownReference {
        id: reference.to_string(),
    })
}
