//! Session-scoped tracker structure cache

use crate::connection::Connection;
use forgelink_core::{Error, Result, TrackerStructure};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache of fetched tracker structures, keyed by tracker id
///
/// One structure exists per tracker id per session: asking for an id that is
/// already cached returns the cached instance and never refetches. The cache
/// is owned by whoever owns the connection, not by the process.
#[derive(Default)]
pub struct StructureCache {
    inner: Mutex<HashMap<i64, Arc<TrackerStructure>>>,
}

impl StructureCache {
    /// An empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached structure for a tracker id, if any
    pub fn get(&self, tracker_id: i64) -> Option<Arc<TrackerStructure>> {
        self.inner.lock().get(&tracker_id).cloned()
    }

    /// Insert a structure, keeping any already-cached instance for its id
    pub fn insert(&self, structure: TrackerStructure) -> Arc<TrackerStructure> {
        let id = structure.id;
        let mut inner = self.inner.lock();
        Arc::clone(
            inner
                .entry(id)
                .or_insert_with(move || Arc::new(structure)),
        )
    }

    /// Cached structure for a tracker id, fetching the schema on first use
    ///
    /// # Errors
    ///
    /// Propagates transport failures; a schema payload that does not parse
    /// is reported as [`Error::Schema`].
    pub fn get_or_fetch(
        &self,
        connection: &dyn Connection,
        tracker_id: i64,
    ) -> Result<Arc<TrackerStructure>> {
        if let Some(structure) = self.get(tracker_id) {
            return Ok(structure);
        }
        let body = connection.get(&format!("trackers/{tracker_id}"))?;
        let structure: TrackerStructure =
            serde_json::from_str(&body).map_err(|e| Error::Schema {
                tracker_id,
                reason: e.to_string(),
            })?;
        tracing::debug!(
            target: "forgelink::cache",
            tracker_id,
            fields = structure.fields.len(),
            "fetched tracker structure"
        );
        Ok(self.insert(structure))
    }

    /// Number of cached structures
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
