//! Client layer for the forgelink tracker library
//!
//! Everything above the codec is thin plumbing around an injected transport:
//! - Connection: the transport trait (get/post/put/delete over JSON text)
//! - RestConnection: blocking ureq transport with access-key auth
//! - StructureCache: one fetched schema per tracker id per session
//! - ArtifactStore: create/update/delete/read for one tracker's artifacts
//! - TrackerCatalog: metadata plus the paged artifact-id listing
//! - model: declarative attribute↔field binding tables

#![warn(clippy::all)]

pub mod cache;
pub mod catalog;
pub mod connection;
pub mod model;
pub mod rest;
pub mod store;

#[cfg(test)]
pub(crate) mod mock;

pub use cache::StructureCache;
pub use catalog::{list_artifact_ids, TrackerCatalog, PAGE_SIZE};
pub use connection::Connection;
pub use model::{collect, hydrate, Binding, Mapped};
pub use rest::RestConnection;
pub use store::ArtifactStore;
