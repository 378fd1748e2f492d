use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use crate::template::Template;

/// Metadata about a document of tables and templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Stable identifier assigned when the document is created.
    pub id: Uuid,
    /// Display name of the document.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Authors of the document.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Document schema version.
    pub schema_version: u32,
    /// Timestamp when the document was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the document was last modified.
    pub updated_at: DateTime<Utc>,
}

impl DocumentMeta {
    /// Create metadata for a new document.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            authors: Vec::new(),
            schema_version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// On-disk shape of a document. Indexes are rebuilt on load.
#[derive(Serialize, Deserialize)]
struct DocumentFile {
    meta: DocumentMeta,
    #[serde(default)]
    tables: Vec<Table>,
    #[serde(default)]
    templates: Vec<Template>,
}

/// A document of tables and templates — the immutable snapshot the engine
/// resolves rolls against.
///
/// Owns its tables and templates and keeps by-id indexes current. Duplicate
/// ids are rejected at insert time, so lookups are unambiguous.
#[derive(Debug, Clone)]
pub struct TableDocument {
    /// Metadata about this document.
    pub meta: DocumentMeta,
    tables: Vec<Table>,
    templates: Vec<Template>,

    // Indexes
    table_index: HashMap<String, usize>,
    template_index: HashMap<String, usize>,
}

impl TableDocument {
    /// Create an empty document.
    pub fn new(meta: DocumentMeta) -> Self {
        Self {
            meta,
            tables: Vec::new(),
            templates: Vec::new(),
            table_index: HashMap::new(),
            template_index: HashMap::new(),
        }
    }

    /// Build a document from already-collected parts, checking id uniqueness.
    pub fn from_parts(
        meta: DocumentMeta,
        tables: Vec<Table>,
        templates: Vec<Template>,
    ) -> CoreResult<Self> {
        let mut doc = Self::new(meta);
        for table in tables {
            doc.add_table(table)?;
        }
        for template in templates {
            doc.add_template(template)?;
        }
        Ok(doc)
    }

    /// Parse a document from its JSON form.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let file: DocumentFile = serde_json::from_str(json)?;
        Self::from_parts(file.meta, file.tables, file.templates)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        let file = DocumentFile {
            meta: self.meta.clone(),
            tables: self.tables.clone(),
            templates: self.templates.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Add a table. Fails if a table with the same id already exists.
    pub fn add_table(&mut self, table: Table) -> CoreResult<()> {
        if self.table_index.contains_key(&table.id) {
            return Err(CoreError::DuplicateTableId(table.id.clone()));
        }
        self.table_index.insert(table.id.clone(), self.tables.len());
        self.tables.push(table);
        Ok(())
    }

    /// Add a template. Fails if a template with the same id already exists.
    pub fn add_template(&mut self, template: Template) -> CoreResult<()> {
        if self.template_index.contains_key(&template.id) {
            return Err(CoreError::DuplicateTemplateId(template.id.clone()));
        }
        self.template_index
            .insert(template.id.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Get a table by id.
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.table_index.get(id).map(|i| &self.tables[*i])
    }

    /// Get a template by id.
    pub fn template(&self, id: &str) -> Option<&Template> {
        self.template_index.get(id).map(|i| &self.templates[*i])
    }

    /// All tables in insertion order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// All templates in insertion order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Number of templates.
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Entry;

    fn doc() -> TableDocument {
        TableDocument::new(DocumentMeta::new("Test"))
    }

    #[test]
    fn add_and_look_up_table() {
        let mut d = doc();
        d.add_table(Table::simple("weapons", "Weapons", vec![Entry::new("a", "Sword")]))
            .unwrap();
        assert_eq!(d.table("weapons").unwrap().name, "Weapons");
        assert!(d.table("armor").is_none());
        assert_eq!(d.table_count(), 1);
    }

    #[test]
    fn duplicate_table_id_rejected() {
        let mut d = doc();
        d.add_table(Table::simple("weapons", "Weapons", vec![]))
            .unwrap();
        let err = d
            .add_table(Table::simple("weapons", "Other", vec![]))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTableId(id) if id == "weapons"));
    }

    #[test]
    fn duplicate_template_id_rejected() {
        let mut d = doc();
        d.add_template(Template::new("hook", "Hook", "text")).unwrap();
        let err = d
            .add_template(Template::new("hook", "Hook 2", "other"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateTemplateId(id) if id == "hook"));
    }

    #[test]
    fn json_round_trip_rebuilds_indexes() {
        let mut d = doc();
        d.add_table(Table::simple(
            "weapons",
            "Weapons",
            vec![Entry::new("a", "Sword").with_weight(3.0)],
        ))
        .unwrap();
        d.add_template(Template::new("hook", "Hook", "You find a {{weapons}}."))
            .unwrap();

        let json = d.to_json().unwrap();
        let back = TableDocument::from_json(&json).unwrap();
        assert_eq!(back.table_count(), 1);
        assert_eq!(back.template_count(), 1);
        assert_eq!(
            back.table("weapons").unwrap().own_entries()[0].weight,
            Some(3.0)
        );
        assert_eq!(back.template("hook").unwrap().name, "Hook");
    }

    #[test]
    fn from_json_rejects_duplicate_ids() {
        let json = r#"{
            "meta": {
                "id": "7c4e1f0a-8a2b-4c3d-9e5f-012345678901",
                "name": "Bad",
                "schemaVersion": 1,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            },
            "tables": [
                {"id": "t", "name": "A", "type": "simple", "entries": []},
                {"id": "t", "name": "B", "type": "simple", "entries": []}
            ]
        }"#;
        assert!(matches!(
            TableDocument::from_json(json),
            Err(CoreError::DuplicateTableId(_))
        ));
    }
}
