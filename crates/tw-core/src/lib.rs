//! Core types for Tablewright: entries, tables, templates, and documents.
//!
//! This crate defines the data model the resolution engine operates on. It is
//! independent of the engine — you can construct a [`TableDocument`]
//! programmatically or deserialize one from JSON.

/// Documents of tables and templates with by-id lookup.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Collections of documents keyed by slug.
pub mod library;
/// Table variants, entries, and source references.
pub mod table;
/// Template root objects.
pub mod template;

/// Re-export document types.
pub use document::{DocumentMeta, TableDocument};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the library.
pub use library::Library;
/// Re-export table types.
pub use table::{Entry, SourceRef, Table, TableKind, TableSource};
/// Re-export the template type.
pub use template::Template;
