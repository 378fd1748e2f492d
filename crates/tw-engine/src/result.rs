//! Roll results and provenance records.

use serde::Serialize;

use crate::trace::TraceNode;

/// Attribution for one table that contributed to a rolled value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDescription {
    /// Id of the contributing table.
    pub table_id: String,
    /// Display name of the contributing table.
    pub table_name: String,
    /// The value rolled from that table (pre-expansion).
    pub rolled_value: String,
    /// Flavor text of the chosen entry or table, if any.
    pub description: Option<String>,
}

/// The product of one roll: the composed value plus provenance.
///
/// Created per roll invocation and owned by the caller; never mutated by the
/// engine after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// The fully expanded result string.
    pub value: String,
    /// Result category, when the chosen entry or template declared one.
    pub result_type: Option<String>,
    /// Attributions in left-to-right, depth-first order of appearance.
    pub descriptions: Vec<EntryDescription>,
    /// The recorded decision tree, when tracing was enabled.
    pub trace: Option<TraceNode>,
}
