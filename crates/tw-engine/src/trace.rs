//! Optional execution traces recorded during resolution.

use std::fmt;

use serde::Serialize;

/// What kind of decision a trace node records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TraceStep {
    /// An entry was picked from a simple table.
    Entry {
        /// Id of the chosen entry.
        entry_id: String,
        /// The entry's raw value at selection time.
        value: String,
    },
    /// A source table was picked from a composite table.
    Source {
        /// Id of the chosen source table.
        table_id: String,
    },
    /// A member table was picked from a collection table.
    Member {
        /// Id of the chosen member table.
        table_id: String,
    },
    /// A template's text was expanded.
    Template,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry { entry_id, value } => write!(f, "entry \"{entry_id}\" -> \"{value}\""),
            Self::Source { table_id } => write!(f, "source -> \"{table_id}\""),
            Self::Member { table_id } => write!(f, "member -> \"{table_id}\""),
            Self::Template => write!(f, "template"),
        }
    }
}

/// One resolution decision, with the nested decisions it caused.
///
/// Forms a tree rooted at the initiating roll call. Only recorded when
/// tracing is enabled; rolls are identical with it on or off.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceNode {
    /// Id of the table (or template) this step resolved.
    pub table_id: String,
    /// Display name of the table (or template).
    pub table_name: String,
    /// The decision taken.
    pub step: TraceStep,
    /// Effective weight of the chosen candidate.
    pub weight: f64,
    /// Probability the candidate had at selection time.
    pub probability: f64,
    /// Nested resolution steps.
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    /// Create a leaf node.
    pub fn new(
        table_id: impl Into<String>,
        table_name: impl Into<String>,
        step: TraceStep,
        weight: f64,
        probability: f64,
    ) -> Self {
        Self {
            table_id: table_id.into(),
            table_name: table_name.into(),
            step,
            weight,
            probability,
            children: Vec::new(),
        }
    }

    /// Total number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TraceNode::node_count).sum::<usize>()
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        writeln!(
            f,
            "{} ({}): {} [{:.1}%]",
            self.table_name,
            self.table_id,
            self.step,
            self.probability * 100.0
        )?;
        for child in &self.children {
            child.fmt_at(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TraceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}
