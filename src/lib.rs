//! forgelink - typed client library for tracker-style REST+JSON services
//!
//! forgelink talks to a remote artifact tracker: it fetches a tracker's field
//! schema, lists and reads artifact records, creates/updates/deletes them,
//! and converts between the service's heterogeneous JSON field payloads and
//! a typed value union.
//!
//! # Quick Start
//!
//! ```ignore
//! use forgelink::{ArtifactStore, FieldValue, RestConnection, StructureCache};
//! use std::collections::HashMap;
//!
//! let connection = RestConnection::new("https://forge.example.test/api/", "tlp-k1-...");
//! let cache = StructureCache::new();
//! let structure = cache.get_or_fetch(&connection, 1041)?;
//!
//! let store = ArtifactStore::new(structure);
//! let mut values = HashMap::new();
//! values.insert("summary".to_string(), FieldValue::from("my title"));
//! values.insert("status".to_string(), FieldValue::Choice("open".into()));
//! let id = store.create(&connection, &values)?;
//!
//! let record = store.read(&connection, id)?;
//! println!("{record}");
//! ```
//!
//! # Architecture
//!
//! The decision logic lives in the field codec: per-kind decode of JSON
//! fragments into [`FieldValue`] and per-kind encode back into the service's
//! write fragments. The client layer (store, catalog, cache) is thin plumbing
//! around that codec and delegates all I/O to the injected [`Connection`]
//! capability.

// Re-export the public API from the member crates
pub use forgelink_codec::*;
pub use forgelink_core::*;

pub use forgelink_client::*;
