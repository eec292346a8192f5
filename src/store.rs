//! In-memory anomaly store
//!
//! Replaces a detection database for the demo deployment. The handle is
//! cheap to clone and injected through the application state; the engine
//! itself only ever sees snapshots.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::AnomalyRecord;

#[derive(Clone)]
pub struct AnomalyStore {
    inner: Arc<RwLock<Vec<AnomalyRecord>>>,
}

impl AnomalyStore {
    pub fn new(records: Vec<AnomalyRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(records)),
        }
    }

    /// Clone of the whole collection; the filter pipeline runs on this
    pub async fn snapshot(&self) -> Vec<AnomalyRecord> {
        self.inner.read().await.clone()
    }

    /// Swap the collection, returning the new size
    pub async fn replace(&self, records: Vec<AnomalyRecord>) -> usize {
        let mut guard = self.inner.write().await;
        *guard = records;
        guard.len()
    }

    /// Newest detections go to the front, like the dashboard feed
    pub async fn prepend(&self, record: AnomalyRecord) {
        self.inner.write().await.insert(0, record);
    }

    pub async fn find(&self, id: &str) -> Option<AnomalyRecord> {
        self.inner.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
