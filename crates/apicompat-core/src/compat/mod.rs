//! Cross-snapshot compatibility comparison.
//!
//! ## Entry point
//!
//! ```
//! use apicompat_core::compat::check_compat;
//! use apicompat_core::model::Project;
//!
//! let older = Project::new();
//! let report = check_compat(&older, &Project::new());
//! assert!(report.compatible);
//! ```
//!
//! ## Guarantees
//!
//! - **Asymmetry**: additions are compatible; removals, renames, retypes and
//!   arity changes are not. `T` widening to `...T` is the one allowed rename.
//! - **First failure**: the engine stops at the first violation; it is a
//!   gate, not a full diff.
//! - **Determinism**: the same inputs always produce the same report,
//!   including which violation is reported.

pub mod engine;
pub mod summary;
pub mod violation;

pub use engine::{check_compat, check_node, names_match};
pub use summary::render_summary;
pub use violation::{Clause, CompatReport, Mismatch, MismatchReason, Violation, ViolationKind};
