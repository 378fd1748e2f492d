//! Weighted random table resolution engine for Tablewright.
//!
//! Given a document of typed tables and templates, the engine resolves a
//! roll request into a concrete result: weighted random selection over
//! entries, `extends` inheritance, composite and collection aggregation,
//! and recursive `{{reference}}` expansion inside values and templates.
//! All randomness flows through a single injected seedable source, so
//! rolls are reproducible, and a shared depth budget bounds resolution on
//! malformed documents. Statistics mirror the selection math without
//! rolling, for chart-style consumers.

pub mod error;
mod expand;
pub mod inherit;
pub mod lookup;
mod resolve;
pub mod result;
pub mod roll;
pub mod stats;
pub mod trace;
pub mod validate;
pub mod weight;

pub use error::{EngineError, EngineResult};
pub use expand::MAX_EXPANSION_DEPTH;
pub use inherit::{ChainLink, MAX_INHERIT_DEPTH, effective_entries, inheritance_chain};
pub use lookup::TableLookup;
pub use result::{EntryDescription, RollResult};
pub use roll::{RollOptions, Roller};
pub use stats::{Distribution, DistributionRow, WeightSummary, distribution};
pub use trace::{TraceNode, TraceStep};
pub use validate::{ValidationIssue, validate_document};
pub use weight::{DEFAULT_WEIGHT, effective_weight};
