//! Snapshot store seam.

use crate::errors::Result;

/// Durable home of the last accepted snapshot.
///
/// Implementations hold at most one snapshot. `load` returning `Ok(None)`
/// means nothing was ever saved. I/O failures are reported as
/// [`ApiCompatError::Store`](crate::errors::ApiCompatError::Store), which
/// converts into an `ExErrorKind::Persistence` error.
pub trait SnapshotStore {
    /// Bytes of the stored snapshot, if any.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the stored snapshot.
    fn save(&mut self, bytes: &[u8]) -> Result<()>;
}

/// In-memory store, used by tests and by callers that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    bytes: Option<Vec<u8>>,
    saves: usize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bytes`.
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            saves: 0,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn save(&mut self, bytes: &[u8]) -> Result<()> {
        self.bytes = Some(bytes.to_vec());
        self.saves += 1;
        Ok(())
    }
}
