use serde::{Deserialize, Serialize};

/// An atomic weighted outcome within a simple table.
///
/// The `value` string may contain embedded `{{reference}}` expressions that
/// the engine expands when the entry is rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Identifier, unique within the owning table.
    pub id: String,
    /// The outcome text. May contain embedded expressions.
    pub value: String,
    /// Explicit weight. `None` means the default weight of 1; a weight of 0
    /// makes the entry unselectable while still counting it in entry lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Optional flavor text shown with the rolled result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional result category (e.g. "item", "npc") carried into the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
}

impl Entry {
    /// Create an entry with the default weight.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            weight: None,
            description: None,
            result_type: None,
        }
    }

    /// Set an explicit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the flavor description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the result type.
    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = Some(result_type.into());
        self
    }
}

/// A weighted reference to another table, used by composite tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    /// The id of the referenced table.
    pub table_id: String,
    /// Explicit weight for the source pick. `None` means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl SourceRef {
    /// Create a source reference with the default weight.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            weight: None,
        }
    }

    /// Set an explicit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Attribution for where a table came from (sourcebook citation).
///
/// Display-only; never consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSource {
    /// Name of the sourcebook or collection the table was taken from.
    pub book: String,
    /// Page number within the book, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// The variant-specific part of a table.
///
/// Serialized with a `"type"` discriminant so documents read as
/// `{"type": "simple", "entries": [...]}` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableKind {
    /// A flat list of weighted entries.
    Simple {
        /// The entries to pick from.
        entries: Vec<Entry>,
    },
    /// Outcomes are references to other tables, chosen by weight; the chosen
    /// table is then resolved in turn.
    Composite {
        /// The weighted table references to pick from.
        sources: Vec<SourceRef>,
    },
    /// An unweighted aggregate of member tables; a member is picked with
    /// probability proportional to its entry count, then resolved.
    Collection {
        /// Ids of the member tables.
        members: Vec<String>,
    },
}

/// A rollable table: shared metadata plus a variant-specific body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Identifier, unique within the owning document. Referenced by
    /// `extends`, composite sources, collection members, and `{{id}}`
    /// expressions.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description shown with results rolled from this table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User-defined tags for filtering.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Hidden tables are omitted from listings but remain rollable and
    /// referenceable.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Id of a parent table whose entries this table inherits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Sourcebook attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TableSource>,
    /// The variant-specific body.
    #[serde(flatten)]
    pub kind: TableKind,
}

impl Table {
    /// Create a simple table from its entries.
    pub fn simple(id: impl Into<String>, name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self::with_kind(id, name, TableKind::Simple { entries })
    }

    /// Create a composite table from its sources.
    pub fn composite(
        id: impl Into<String>,
        name: impl Into<String>,
        sources: Vec<SourceRef>,
    ) -> Self {
        Self::with_kind(id, name, TableKind::Composite { sources })
    }

    /// Create a collection table from its member ids.
    pub fn collection(
        id: impl Into<String>,
        name: impl Into<String>,
        members: Vec<String>,
    ) -> Self {
        Self::with_kind(id, name, TableKind::Collection { members })
    }

    fn with_kind(id: impl Into<String>, name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            hidden: false,
            extends: None,
            source: None,
            kind,
        }
    }

    /// Set the parent table id.
    pub fn with_extends(mut self, parent_id: impl Into<String>) -> Self {
        self.extends = Some(parent_id.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Mark the table as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// The variant name as it appears in documents: "simple", "composite",
    /// or "collection".
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            TableKind::Simple { .. } => "simple",
            TableKind::Composite { .. } => "composite",
            TableKind::Collection { .. } => "collection",
        }
    }

    /// This table's own entries, not following `extends`. Empty for
    /// composite and collection tables.
    pub fn own_entries(&self) -> &[Entry] {
        match &self.kind {
            TableKind::Simple { entries } => entries,
            _ => &[],
        }
    }

    /// Number of candidates this table's own body holds: entries for simple
    /// tables, sources for composites, members for collections.
    pub fn own_count(&self) -> usize {
        match &self.kind {
            TableKind::Simple { entries } => entries.len(),
            TableKind::Composite { sources } => sources.len(),
            TableKind::Collection { members } => members.len(),
        }
    }
}
