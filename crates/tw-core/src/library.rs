use std::collections::HashMap;

use crate::document::TableDocument;
use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use crate::template::Template;

/// A set of documents keyed by collection slug.
///
/// The library is what the engine's lookup port is implemented against:
/// every roll names the collection it resolves in, and cross-collection
/// references (`{{collection:table}}`) route through here.
#[derive(Debug, Clone, Default)]
pub struct Library {
    documents: HashMap<String, TableDocument>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document under a collection slug.
    pub fn insert(&mut self, slug: impl Into<String>, document: TableDocument) -> CoreResult<()> {
        let slug = slug.into();
        if self.documents.contains_key(&slug) {
            return Err(CoreError::DuplicateCollection(slug));
        }
        self.documents.insert(slug, document);
        Ok(())
    }

    /// Get a document by collection slug.
    pub fn document(&self, collection: &str) -> Option<&TableDocument> {
        self.documents.get(collection)
    }

    /// Get a table by collection slug and table id.
    pub fn table(&self, collection: &str, id: &str) -> Option<&Table> {
        self.documents.get(collection).and_then(|d| d.table(id))
    }

    /// Get a template by collection slug and template id.
    pub fn template(&self, collection: &str, id: &str) -> Option<&Template> {
        self.documents.get(collection).and_then(|d| d.template(id))
    }

    /// Collection slugs in sorted order.
    pub fn collections(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    /// Number of loaded collections.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True if no collections are loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Turn a display name into a collection slug: lowercased, spaces to
    /// dashes, everything else alphanumeric kept as-is.
    pub fn slugify(name: &str) -> String {
        name.trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}
