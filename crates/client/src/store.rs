//! Artifact create/update/delete/read orchestration
//!
//! The store binds a tracker structure to a connection-agnostic set of
//! operations. Field names are resolved case-insensitively against the
//! structure; names with no matching field are silently dropped from write
//! payloads, per the service's legacy client behavior. The actual HTTP
//! exchange is delegated to the injected [`Connection`].

use crate::connection::Connection;
use forgelink_codec::{decode_field, encode_field};
use forgelink_core::{ArtifactRecord, Error, FieldValue, Result, TrackerStructure};
use serde_json::{json, Value as Json};
use std::collections::HashMap;
use std::sync::Arc;

/// Operations over the artifacts of one tracker
pub struct ArtifactStore {
    structure: Arc<TrackerStructure>,
}

impl ArtifactStore {
    /// A store bound to a tracker structure
    pub fn new(structure: Arc<TrackerStructure>) -> Self {
        Self { structure }
    }

    /// The bound structure
    pub fn structure(&self) -> &TrackerStructure {
        &self.structure
    }

    /// Create an artifact from a name→value map, returning its new id
    ///
    /// Unknown field names are skipped; fields the codec omits (unresolved
    /// choice labels, nulls) are absent from the request body.
    ///
    /// # Errors
    ///
    /// Fails on encode mismatches, transport failures, or a create response
    /// that carries no id.
    pub fn create(
        &self,
        connection: &dyn Connection,
        values: &HashMap<String, FieldValue>,
    ) -> Result<i64> {
        let fragments = self.encode_fragments(values)?;
        let body = json!({
            "tracker": {"id": self.structure.id},
            "values": fragments,
        });
        let response = connection.post("artifacts", &body.to_string())?;
        let payload: Json = serde_json::from_str(&response)?;
        let id = payload
            .get("id")
            .and_then(Json::as_i64)
            .ok_or_else(|| Error::MissingId {
                path: "artifacts".to_string(),
            })?;
        tracing::debug!(
            target: "forgelink::store",
            tracker_id = self.structure.id,
            artifact_id = id,
            "created artifact"
        );
        Ok(id)
    }

    /// Update a single field of an artifact (legacy one-request-per-field path)
    ///
    /// An unknown field name, or a value the codec omits, is a silent no-op.
    ///
    /// # Errors
    ///
    /// Fails on encode mismatches and transport failures.
    pub fn update(
        &self,
        connection: &dyn Connection,
        artifact_id: i64,
        field_name: &str,
        value: &FieldValue,
    ) -> Result<()> {
        let Some(field) = self.structure.field_by_name(field_name) else {
            tracing::debug!(
                target: "forgelink::store",
                field = field_name,
                "no matching field in tracker structure, skipping update"
            );
            return Ok(());
        };
        let Some(fragment) = encode_field(field, value)? else {
            return Ok(());
        };
        let body = json!({"values": [fragment]});
        connection.put(&format!("artifacts/{artifact_id}"), &body.to_string())?;
        Ok(())
    }

    /// Update several fields with one request
    ///
    /// # Errors
    ///
    /// Fails on encode mismatches and transport failures. All-or-nothing on
    /// the wire, unlike repeated [`ArtifactStore::update`] calls.
    pub fn update_values(
        &self,
        connection: &dyn Connection,
        artifact_id: i64,
        values: &HashMap<String, FieldValue>,
    ) -> Result<()> {
        let fragments = self.encode_fragments(values)?;
        if fragments.is_empty() {
            return Ok(());
        }
        let body = json!({"values": fragments});
        connection.put(&format!("artifacts/{artifact_id}"), &body.to_string())?;
        Ok(())
    }

    /// Delete an artifact
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn delete(&self, connection: &dyn Connection, artifact_id: i64) -> Result<bool> {
        connection.delete(&format!("artifacts/{artifact_id}"), "")
    }

    /// Read an artifact and decode every schema field into a record
    ///
    /// Missing or malformed fields degrade to null values; only transport
    /// and payload-level JSON failures abort the read.
    ///
    /// # Errors
    ///
    /// Fails on transport failures or an unparseable response body.
    pub fn read(&self, connection: &dyn Connection, artifact_id: i64) -> Result<ArtifactRecord> {
        let path = format!(
            "artifacts/{artifact_id}?values_format=collection&tracker_structure_format=complete"
        );
        let body = connection.get(&path)?;
        let payload: Json = serde_json::from_str(&body)?;

        let mut record = ArtifactRecord::new(self.structure.id);
        record.id = payload
            .get("id")
            .and_then(Json::as_i64)
            .unwrap_or(forgelink_core::INVALID_ARTIFACT_ID);
        if let Some(tracker) = payload.get("tracker") {
            if let Some(id) = tracker.get("id").and_then(Json::as_i64) {
                record.tracker_id = id;
            }
            if let Some(label) = tracker.get("label").and_then(Json::as_str) {
                record.tracker_name = label.to_string();
            }
        }
        record.insert_value("aid", FieldValue::Int(record.id));
        if let Some(xref) = payload.get("xref").and_then(Json::as_str) {
            record.insert_value("xref", FieldValue::Text(xref.to_string()));
        }

        let fragments = payload.get("values").and_then(Json::as_array);
        for field in &self.structure.fields {
            let fragment = fragments.and_then(|entries| {
                entries
                    .iter()
                    .find(|entry| entry.get("field_id").and_then(Json::as_i64) == Some(field.id))
            });
            if let Some(value) = decode_field(field, fragment) {
                record.insert_value(field.name.clone(), value);
            }
        }
        Ok(record)
    }

    fn encode_fragments(&self, values: &HashMap<String, FieldValue>) -> Result<Vec<Json>> {
        let mut fragments = Vec::new();
        for (name, value) in values {
            let Some(field) = self.structure.field_by_name(name) else {
                tracing::debug!(
                    target: "forgelink::store",
                    field = %name,
                    "no matching field in tracker structure, value dropped"
                );
                continue;
            };
            if let Some(fragment) = encode_field(field, value)? {
                fragments.push(fragment);
            }
        }
        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockConnection;

    fn structure() -> Arc<TrackerStructure> {
        Arc::new(
            serde_json::from_value(json!({
                "id": 1041,
                "item_name": "request",
                "fields": [
                    {"field_id": 10, "name": "myint", "type": "int"},
                    {"field_id": 20, "name": "mychoice", "type": "sb",
                     "values": [{"id": 1, "label": "one"}, {"id": 2, "label": "two"}]},
                    {"field_id": 30, "name": "summary", "type": "string"},
                ],
            }))
            .unwrap(),
        )
    }

    fn sent_fragments(body: &str) -> Vec<Json> {
        let payload: Json = serde_json::from_str(body).unwrap();
        payload["values"].as_array().unwrap().clone()
    }

    #[test]
    fn test_create_builds_fragments_and_parses_id() {
        let conn = MockConnection::new();
        conn.push_response(r#"{"id": 4843}"#);

        let store = ArtifactStore::new(structure());
        let mut values = HashMap::new();
        values.insert("myint".to_string(), FieldValue::Int(5));
        values.insert("mychoice".to_string(), FieldValue::Choice("two".to_string()));

        let id = store.create(&conn, &values).unwrap();
        assert_eq!(id, 4843);
        assert_eq!(conn.requests(), vec!["POST artifacts"]);

        let body: Json = serde_json::from_str(&conn.bodies()[0]).unwrap();
        assert_eq!(body["tracker"], json!({"id": 1041}));
        let mut fragments = sent_fragments(&conn.bodies()[0]);
        fragments.sort_by_key(|fragment| fragment["field_id"].as_i64());
        assert_eq!(fragments[0], json!({"field_id": 10, "value": 5}));
        assert_eq!(fragments[1], json!({"field_id": 20, "bind_value_ids": [2]}));
    }

    #[test]
    fn test_create_skips_unknown_field_names() {
        let conn = MockConnection::new();
        conn.push_response(r#"{"id": 1}"#);

        let store = ArtifactStore::new(structure());
        let mut values = HashMap::new();
        values.insert("myint".to_string(), FieldValue::Int(5));
        values.insert("nonexistent".to_string(), FieldValue::Int(9));

        store.create(&conn, &values).unwrap();
        assert_eq!(sent_fragments(&conn.bodies()[0]).len(), 1);
    }

    #[test]
    fn test_create_without_id_in_response_fails() {
        let conn = MockConnection::new();
        conn.push_response(r#"{"ok": true}"#);
        let store = ArtifactStore::new(structure());
        let err = store.create(&conn, &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::MissingId { .. }));
    }

    #[test]
    fn test_create_encode_mismatch_fails_whole_call() {
        let conn = MockConnection::new();
        let store = ArtifactStore::new(structure());
        let mut values = HashMap::new();
        values.insert("myint".to_string(), FieldValue::Text("five".to_string()));
        let err = store.create(&conn, &values).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        // Nothing was sent
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_update_single_field() {
        let conn = MockConnection::new();
        conn.push_response("");
        let store = ArtifactStore::new(structure());
        store
            .update(&conn, 33980, "summary", &FieldValue::Text("hello".to_string()))
            .unwrap();
        assert_eq!(conn.requests(), vec!["PUT artifacts/33980"]);
        assert_eq!(
            sent_fragments(&conn.bodies()[0])[0],
            json!({"field_id": 30, "value": "hello"})
        );
    }

    #[test]
    fn test_update_field_name_is_case_insensitive() {
        let conn = MockConnection::new();
        conn.push_response("");
        let store = ArtifactStore::new(structure());
        store
            .update(&conn, 1, "SUMMARY", &FieldValue::Text("x".to_string()))
            .unwrap();
        assert_eq!(conn.requests().len(), 1);
    }

    #[test]
    fn test_update_unknown_field_is_silent_noop() {
        let conn = MockConnection::new();
        let store = ArtifactStore::new(structure());
        store
            .update(&conn, 1, "missing", &FieldValue::Int(1))
            .unwrap();
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_update_unresolved_choice_is_silent_noop() {
        let conn = MockConnection::new();
        let store = ArtifactStore::new(structure());
        store
            .update(&conn, 1, "mychoice", &FieldValue::Choice("bogus".to_string()))
            .unwrap();
        assert!(conn.requests().is_empty());
    }

    #[test]
    fn test_update_values_batches_one_request() {
        let conn = MockConnection::new();
        conn.push_response("");
        let store = ArtifactStore::new(structure());
        let mut values = HashMap::new();
        values.insert("myint".to_string(), FieldValue::Int(7));
        values.insert("summary".to_string(), FieldValue::Text("s".to_string()));
        store.update_values(&conn, 2, &values).unwrap();
        assert_eq!(conn.requests(), vec!["PUT artifacts/2"]);
        assert_eq!(sent_fragments(&conn.bodies()[0]).len(), 2);
    }

    #[test]
    fn test_delete() {
        let conn = MockConnection::new();
        let store = ArtifactStore::new(structure());
        assert!(store.delete(&conn, 42).unwrap());
        assert_eq!(conn.requests(), vec!["DELETE artifacts/42"]);
    }

    #[test]
    fn test_read_populates_record() {
        let conn = MockConnection::new();
        conn.push_response(
            &json!({
                "id": 4843,
                "xref": "request #4843",
                "tracker": {"id": 1041, "label": "Requests"},
                "values": [
                    {"field_id": 10, "value": 77},
                    {"field_id": 20, "values": [{"id": 1}]},
                ],
            })
            .to_string(),
        );

        let store = ArtifactStore::new(structure());
        let record = store.read(&conn, 4843).unwrap();
        assert_eq!(record.id, 4843);
        assert_eq!(record.tracker_id, 1041);
        assert_eq!(record.tracker_name, "Requests");
        assert_eq!(record.value("aid").unwrap().as_int(), Some(4843));
        assert_eq!(record.value("xref").unwrap().as_str(), Some("request #4843"));
        assert_eq!(record.value("myint").unwrap().as_int(), Some(77));
        assert_eq!(record.value("mychoice").unwrap().as_str(), Some("one"));
        // summary had no fragment: present as Null
        assert!(record.value("summary").unwrap().is_null());
        assert_eq!(
            conn.requests(),
            vec!["GET artifacts/4843?values_format=collection&tracker_structure_format=complete"]
        );
    }

    #[test]
    fn test_read_twice_yields_identical_values() {
        let payload = json!({
            "id": 1, "xref": "r #1", "tracker": {"id": 1041, "label": "R"},
            "values": [{"field_id": 10, "value": 3}, {"field_id": 20, "values": []}],
        })
        .to_string();
        let conn = MockConnection::new();
        conn.push_response(&payload);
        conn.push_response(&payload);

        let store = ArtifactStore::new(structure());
        let first = store.read(&conn, 1).unwrap();
        let second = store.read(&conn, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_transport_failure_propagates() {
        let conn = MockConnection::new();
        conn.push_error("boom");
        let store = ArtifactStore::new(structure());
        assert!(matches!(
            store.read(&conn, 1).unwrap_err(),
            Error::Transport(_)
        ));
    }
}
