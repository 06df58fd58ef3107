//! Snapshot encoding and decoding.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ApiCompatError, ExError, Result};
use crate::model::invariants::validate_project;
use crate::model::Project;
use crate::snapshot::digest::compute_project_digest;
use crate::{log_op_end, log_op_error, log_op_start};

/// Schema version written by this build; the only one it reads.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// On-disk snapshot envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub snapshot_schema_version: u32,
    pub project_digest: String,
    pub project: Project,
}

impl SnapshotDocument {
    /// Wrap `project` with the current schema version and its digest.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Serialization` if the digest cannot be computed.
    pub fn new(project: Project) -> Result<Self> {
        let project_digest = compute_project_digest(&project)?;
        Ok(Self {
            snapshot_schema_version: SNAPSHOT_SCHEMA_VERSION,
            project_digest,
            project,
        })
    }
}

/// Serialize `project` into snapshot bytes (pretty JSON).
///
/// Equal projects always produce identical bytes.
///
/// # Errors
///
/// Returns `ExErrorKind::Serialization` if JSON serialization fails.
pub fn encode_snapshot(project: &Project) -> Result<Vec<u8>> {
    let start = Instant::now();
    log_op_start!(
        "encode_snapshot",
        package_count = project.packages.len(),
        symbol_count = project.symbol_count()
    );

    let result = SnapshotDocument::new(project.clone()).and_then(|document| {
        serde_json::to_vec_pretty(&document)
            .map_err(|e| ExError::from(ApiCompatError::from(e)).with_op("encode_snapshot"))
    });

    match &result {
        Ok(bytes) => {
            log_op_end!(
                "encode_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                size_bytes = bytes.len()
            );
        }
        Err(err) => {
            log_op_error!(
                "encode_snapshot",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

/// Parse and validate snapshot bytes.
///
/// Checks, in order: UTF-8, JSON object root, `snapshot_schema_version`,
/// presence of `project_digest` and `project`, typed decoding, digest
/// agreement, and the model key invariants.
///
/// # Errors
///
/// - `InvalidSnapshot` for malformed bytes or wrongly typed fields
/// - `UnsupportedSchemaVersion` for a version other than [`SNAPSHOT_SCHEMA_VERSION`]
/// - `MissingField` when a required field is absent
/// - `DigestMismatch` when the recorded digest disagrees with the content
/// - `InvariantViolation` when a map key disagrees with its entry's name
pub fn decode_snapshot(bytes: &[u8]) -> Result<Project> {
    let start = Instant::now();
    log_op_start!("decode_snapshot", size_bytes = bytes.len());

    let result = decode_document(bytes).map_err(|e| e.with_op("decode_snapshot"));
    match &result {
        Ok(project) => {
            log_op_end!(
                "decode_snapshot",
                duration_ms = start.elapsed().as_millis() as u64,
                package_count = project.packages.len(),
                symbol_count = project.symbol_count()
            );
        }
        Err(err) => {
            log_op_error!(
                "decode_snapshot",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn decode_document(bytes: &[u8]) -> Result<Project> {
    let invalid = |reason: String| ExError::from(ApiCompatError::InvalidSnapshot { reason });
    let missing = |field: &str| {
        ExError::from(ApiCompatError::MissingField {
            field: field.to_string(),
        })
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|e| invalid(format!("snapshot is not valid UTF-8: {}", e)))?;
    let raw: Value = serde_json::from_str(text)
        .map_err(|e| invalid(format!("snapshot is not valid JSON: {}", e)))?;
    let obj = raw
        .as_object()
        .ok_or_else(|| invalid("snapshot JSON root must be an object".to_string()))?;

    let version = obj
        .get("snapshot_schema_version")
        .ok_or_else(|| missing("snapshot_schema_version"))?;
    let version = version.as_u64().ok_or_else(|| {
        invalid(format!(
            "`snapshot_schema_version` must be an unsigned integer, got: {}",
            version
        ))
    })?;
    if version != u64::from(SNAPSHOT_SCHEMA_VERSION) {
        return Err(ApiCompatError::UnsupportedSchemaVersion {
            found: version,
            expected: SNAPSHOT_SCHEMA_VERSION,
        }
        .into());
    }

    let recorded = obj
        .get("project_digest")
        .ok_or_else(|| missing("project_digest"))?
        .as_str()
        .ok_or_else(|| invalid("`project_digest` must be a string".to_string()))?
        .to_string();
    let project_value = obj.get("project").ok_or_else(|| missing("project"))?;

    let project: Project = serde_json::from_value(project_value.clone())
        .map_err(|e| invalid(format!("failed to deserialize project: {}", e)))?;

    let computed = compute_project_digest(&project)?;
    if computed != recorded {
        return Err(ApiCompatError::DigestMismatch { recorded, computed }.into());
    }

    validate_project(&project)?;
    Ok(project)
}
