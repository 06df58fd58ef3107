//! apicompat core - detection of breaking API changes between two
//! snapshots of a program's public interface
//!
//! This crate provides:
//! - The interface model: a tagged node tree keyed by package and name
//! - Declaration descriptors and the extractor that folds them into a model
//! - The asymmetric comparison engine (additions free, removals and
//!   reshapes break, `T` may widen to `...T`)
//! - A deterministic snapshot codec and the store-backed check workflow
//!
//! Source parsing, file-system traversal and command-line handling belong to
//! the embedding tool.

pub mod compat;
pub mod decl;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;
pub mod snapshot;
pub mod workflow;

// Logging macros reach schema constants through `$crate`.
pub use apicompat_core_types;

// Re-export commonly used types
pub use compat::{check_compat, CompatReport, Violation, ViolationKind};
pub use errors::{ApiCompatError, ExError, ExErrorKind, Result};
pub use extract::{extract_project, Extractor, ExtractorConfig};
pub use model::{Node, Package, Project};
pub use snapshot::{decode_snapshot, encode_snapshot, MemorySnapshotStore, SnapshotStore};
pub use workflow::{decide, run_check, CheckOptions, CheckOutcome, Decision};
