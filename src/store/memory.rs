use std::sync::Mutex;

use crate::error::{StoreError, StoreResult};

use super::{RaioXSnapshot, SnapshotBackend};

/// Process-local backend, for tests and for running without a data directory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    snapshots: Mutex<Vec<RaioXSnapshot>>,
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self) -> StoreResult<Vec<RaioXSnapshot>> {
        let snapshots = self
            .snapshots
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))?;
        Ok(snapshots.clone())
    }

    fn persist(&self, snapshots: &[RaioXSnapshot]) -> StoreResult<()> {
        let mut stored = self
            .snapshots
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))?;
        *stored = snapshots.to_vec();
        Ok(())
    }
}
