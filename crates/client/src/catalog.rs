//! Tracker metadata and artifact-id listing

use crate::connection::Connection;
use crate::store::ArtifactStore;
use forgelink_core::{ArtifactRecord, Result};
use serde_json::Value as Json;

/// Artifacts fetched per listing page
pub const PAGE_SIZE: usize = 100;

/// Metadata of one tracker plus the ordered set of its known artifact ids
#[derive(Debug, Clone)]
pub struct TrackerCatalog {
    /// Tracker id the catalog was fetched for
    pub tracker_id: i64,
    /// Tracker label
    pub name: String,
    /// Tracker description
    pub description: String,
    /// Short item name (e.g. `bug`)
    pub item_name: String,
    artifact_ids: Vec<i64>,
}

impl TrackerCatalog {
    /// Fetch tracker metadata and the full artifact-id listing
    ///
    /// Metadata is requested once; the listing is paged with
    /// [`PAGE_SIZE`]-sized requests until a short or empty page.
    ///
    /// # Errors
    ///
    /// A transport failure on the metadata request or any page aborts the
    /// whole listing with that error.
    pub fn fetch(connection: &dyn Connection, tracker_id: i64) -> Result<Self> {
        let body = connection.get(&format!("trackers/{tracker_id}"))?;
        let meta: Json = serde_json::from_str(&body)?;
        let name = meta
            .get("label")
            .and_then(Json::as_str)
            .unwrap_or_default()
            .to_string();
        let description = meta
            .get("description")
            .and_then(Json::as_str)
            .unwrap_or_default()
            .to_string();
        let item_name = meta
            .get("item_name")
            .and_then(Json::as_str)
            .unwrap_or_default()
            .to_string();

        let artifact_ids = list_artifact_ids(connection, tracker_id)?;
        Ok(Self {
            tracker_id,
            name,
            description,
            item_name,
            artifact_ids,
        })
    }

    /// Known artifact ids, in server order
    pub fn artifact_ids(&self) -> &[i64] {
        &self.artifact_ids
    }

    /// Number of known artifact ids
    pub fn len(&self) -> usize {
        self.artifact_ids.len()
    }

    /// Whether the tracker listed no artifacts
    pub fn is_empty(&self) -> bool {
        self.artifact_ids.is_empty()
    }

    /// Read every listed artifact through a store
    ///
    /// # Errors
    ///
    /// Stops at the first failing read and returns its error.
    pub fn fetch_all(
        &self,
        connection: &dyn Connection,
        store: &ArtifactStore,
    ) -> Result<Vec<ArtifactRecord>> {
        self.artifact_ids
            .iter()
            .map(|&id| store.read(connection, id))
            .collect()
    }

    /// Delete every listed artifact, returning how many the service acknowledged
    ///
    /// # Errors
    ///
    /// Stops at the first transport failure.
    pub fn delete_all(&self, connection: &dyn Connection) -> Result<usize> {
        let mut deleted = 0;
        for &id in &self.artifact_ids {
            if connection.delete(&format!("artifacts/{id}"), "")? {
                deleted += 1;
            }
        }
        tracing::debug!(
            target: "forgelink::catalog",
            tracker_id = self.tracker_id,
            deleted,
            "deleted listed artifacts"
        );
        Ok(deleted)
    }
}

/// Page through a tracker's artifact listing, accumulating ids in server order
///
/// Each non-terminal page returns exactly [`PAGE_SIZE`] entries; a short or
/// empty page (or an empty body) terminates the loop. The accumulated ids
/// match what was fetched, with no silent drops.
///
/// # Errors
///
/// A transport failure on any page aborts the listing with that error.
pub fn list_artifact_ids(connection: &dyn Connection, tracker_id: i64) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    let mut offset = 0usize;
    loop {
        let path = format!("trackers/{tracker_id}/artifacts?limit={PAGE_SIZE}&offset={offset}");
        let body = connection.get(&path)?;
        if body.trim().is_empty() {
            break;
        }
        let page: Vec<Json> = serde_json::from_str(&body)?;
        let fetched = page.len();
        for entry in &page {
            if let Some(id) = entry.get("id").and_then(Json::as_i64) {
                ids.push(id);
            }
        }
        if fetched < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }
    tracing::debug!(
        target: "forgelink::catalog",
        tracker_id,
        total = ids.len(),
        "listed artifact ids"
    );
    Ok(ids)
}
