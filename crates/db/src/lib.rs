//! Document storage for the Concierge services.
//!
//! Records are JSON objects keyed by an [`ObjectId`] stored under `_id` as a
//! 24-character hex string. Services talk to a [`DocumentStore`] through a
//! typed [`Collection`], and always validate ids with [`ObjectId::parse`]
//! before touching storage.

pub mod collection;
pub mod memory;
pub mod object_id;
pub mod store;

pub use collection::Collection;
pub use memory::MemoryStore;
pub use object_id::{InvalidObjectId, ObjectId};
pub use store::{Document, DocumentStore, StoreError, ID_FIELD};
