//! Shared, in-memory store of resolved works.

use crate::work::Work;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Works by ID, each replaced wholesale on update.
///
/// Readers get an [`Arc`] snapshot that later updates never mutate.
/// Resolution of a single work is serialised through [`WorkCache::lock`], so
/// two concurrent requests for the same work never fetch the same page twice.
#[derive(Debug, Default)]
pub struct WorkCache {
    works: RwLock<HashMap<u64, Arc<Work>>>,
    locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
    cursors: RwLock<HashMap<u64, usize>>,
}

impl WorkCache {
    pub async fn get(&self, work_id: u64) -> Option<Arc<Work>> {
        self.works.read().await.get(&work_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.works.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.works.read().await.is_empty()
    }

    /// Index of the chapter most recently resolved for a work.
    pub async fn last_index(&self, work_id: u64) -> Option<usize> {
        self.cursors.read().await.get(&work_id).copied()
    }

    /// Forgets a work and its reading position.
    pub async fn evict(&self, work_id: u64) -> Option<Arc<Work>> {
        self.locks.lock().await.remove(&work_id);
        self.cursors.write().await.remove(&work_id);
        self.works.write().await.remove(&work_id)
    }

    pub(crate) async fn lock(&self, work_id: u64) -> OwnedMutexGuard<()> {
        let lock = self.locks.lock().await.entry(work_id).or_default().clone();
        lock.lock_owned().await
    }

    /// Releases a work's lock, dropping it once no other task holds or
    /// awaits it.
    pub(crate) async fn unlock(&self, work_id: u64, guard: OwnedMutexGuard<()>) {
        drop(guard);
        let mut locks = self.locks.lock().await;
        if locks.get(&work_id).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&work_id);
        }
    }

    #[cfg(test)]
    pub(crate) async fn lock_count(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub(crate) async fn replace(&self, work: Work) -> Arc<Work> {
        let work = Arc::new(work);
        self.works.write().await.insert(work.id(), Arc::clone(&work));
        work
    }

    pub(crate) async fn record_index(&self, work_id: u64, index: usize) {
        self.cursors.write().await.insert(work_id, index);
    }
}
