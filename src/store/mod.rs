//! Dated history of diagnostics for a single local profile.
//!
//! [`SnapshotStore`] owns the list and its ordering; a [`SnapshotBackend`]
//! only reads and writes the whole list. Reads degrade to "empty" or
//! "not found" when storage is unavailable; only saving reports the failure.

mod file;
mod memory;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{RaioXInput, RaioXSummary};
use crate::error::{StoreError, StoreResult};

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaioXSnapshot {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub input: RaioXInput,
    pub summary: RaioXSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTrendEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub score: u8,
    /// Change against the next older snapshot; `None` for the oldest one.
    pub delta: Option<i16>,
}

/// Durable storage for the full snapshot list, most recent first.
pub trait SnapshotBackend: Send + Sync {
    fn load(&self) -> StoreResult<Vec<RaioXSnapshot>>;
    fn persist(&self, snapshots: &[RaioXSnapshot]) -> StoreResult<()>;
}

pub struct SnapshotStore {
    backend: Arc<dyn SnapshotBackend>,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::default()))
    }

    /// All snapshots, most recent first. Empty when storage cannot be read.
    pub fn list_snapshots(&self) -> Vec<RaioXSnapshot> {
        match self.backend.load() {
            Ok(snapshots) => snapshots,
            Err(err) => {
                tracing::warn!(error = %err, "snapshot list unavailable; returning empty history");
                Vec::new()
            }
        }
    }

    /// Freezes `input` and `summary` under a fresh id and the current time.
    ///
    /// NaN and infinities are refused before storage is touched: JSON writes
    /// them as `null`, which would make the whole history unreadable.
    pub fn save_snapshot(
        &self,
        input: &RaioXInput,
        summary: &RaioXSummary,
    ) -> StoreResult<RaioXSnapshot> {
        if let Some(field) = input.non_finite_field().or_else(|| summary.non_finite_field()) {
            return Err(StoreError::NonFinite(field));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut snapshots = self.backend.load()?;
        let snapshot = RaioXSnapshot {
            id: Uuid::new_v4(),
            date: Utc::now(),
            input: input.clone(),
            summary: summary.clone(),
        };
        snapshots.insert(0, snapshot.clone());
        self.backend.persist(&snapshots)?;

        tracing::info!(
            id = %snapshot.id,
            score = snapshot.summary.score,
            total = snapshots.len(),
            "snapshot saved"
        );
        Ok(snapshot)
    }

    /// Removes the snapshot with `id`. Absent ids and unavailable storage are no-ops.
    pub fn delete_snapshot(&self, id: Uuid) {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut snapshots = match self.backend.load() {
            Ok(snapshots) => snapshots,
            Err(err) => {
                tracing::warn!(%id, error = %err, "snapshot storage unavailable; delete skipped");
                return;
            }
        };
        let before = snapshots.len();
        snapshots.retain(|snapshot| snapshot.id != id);
        if snapshots.len() == before {
            tracing::debug!(%id, "snapshot not found; nothing to delete");
            return;
        }

        match self.backend.persist(&snapshots) {
            Ok(()) => tracing::info!(%id, remaining = snapshots.len(), "snapshot deleted"),
            Err(err) => tracing::warn!(%id, error = %err, "failed to persist snapshot deletion"),
        }
    }

    /// The stored input for `id`. The stored summary is never handed back;
    /// callers rebuild it with the current rules.
    pub fn load_snapshot(&self, id: Uuid) -> Option<RaioXInput> {
        self.list_snapshots()
            .into_iter()
            .find(|snapshot| snapshot.id == id)
            .map(|snapshot| snapshot.input)
    }

    /// Score of every snapshot with its change against the previous (older) one.
    pub fn score_trend(&self) -> Vec<ScoreTrendEntry> {
        score_trend(&self.list_snapshots())
    }
}

fn score_trend(snapshots: &[RaioXSnapshot]) -> Vec<ScoreTrendEntry> {
    snapshots
        .iter()
        .enumerate()
        .map(|(idx, snapshot)| ScoreTrendEntry {
            id: snapshot.id,
            date: snapshot.date,
            score: snapshot.summary.score,
            delta: snapshots
                .get(idx + 1)
                .map(|older| snapshot.summary.score as i16 - older.summary.score as i16),
        })
        .collect()
}
