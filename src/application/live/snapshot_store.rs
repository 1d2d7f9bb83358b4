//! SnapshotStore - sole owner of the current draw snapshot.

use tokio::sync::RwLock;

use crate::domain::lottery::Snapshot;

/// Holds exactly one current [`Snapshot`].
///
/// Writes swap the whole value under the write lock, so a reader sees
/// either the previous snapshot or the new one, never a mix. The lock is
/// never held across I/O.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Snapshot>,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Replaces the current snapshot.
    pub async fn set(&self, snapshot: Snapshot) {
        *self.current.write().await = snapshot;
    }

    /// Returns a copy of the current snapshot.
    pub async fn get(&self) -> Snapshot {
        self.current.read().await.clone()
    }
}
