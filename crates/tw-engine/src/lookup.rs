//! The lookup port the engine requires from its host.

use tw_core::{Library, Table, TableDocument, Template};

/// Read access to tables and templates by collection and id.
///
/// The engine takes this as an explicit parameter and never reaches into
/// global state; the host decides what a "collection" is. [`Library`]
/// implements it for multi-collection use, and a bare [`TableDocument`]
/// implements it as a single collection that answers to any slug.
pub trait TableLookup {
    /// Look up a table.
    fn table(&self, collection: &str, id: &str) -> Option<&Table>;

    /// Look up a template.
    fn template(&self, collection: &str, id: &str) -> Option<&Template>;
}

impl TableLookup for Library {
    fn table(&self, collection: &str, id: &str) -> Option<&Table> {
        Library::table(self, collection, id)
    }

    fn template(&self, collection: &str, id: &str) -> Option<&Template> {
        Library::template(self, collection, id)
    }
}

impl TableLookup for TableDocument {
    fn table(&self, _collection: &str, id: &str) -> Option<&Table> {
        TableDocument::table(self, id)
    }

    fn template(&self, _collection: &str, id: &str) -> Option<&Template> {
        TableDocument::template(self, id)
    }
}
