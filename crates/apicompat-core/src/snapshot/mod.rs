//! Snapshot persistence boundary.
//!
//! A snapshot is the serialized [`Project`](crate::model::Project) of the
//! last accepted run. This module owns its byte format and the store seam;
//! where the bytes live is up to the embedding tool.
//!
//! ## Document format
//!
//! ```text
//! {
//!   "snapshot_schema_version": 1,
//!   "project_digest": "<hex sha256 of the compact project JSON>",
//!   "project": { "packages": { ... } }
//! }
//! ```

pub mod codec;
pub mod digest;
pub mod store;

pub use codec::{decode_snapshot, encode_snapshot, SnapshotDocument, SNAPSHOT_SCHEMA_VERSION};
pub use digest::compute_project_digest;
pub use store::{MemorySnapshotStore, SnapshotStore};
