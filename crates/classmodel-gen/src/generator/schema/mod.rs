//! Schema documents, the identity-preserving store, and `$ref` resolution.

mod store;

pub use store::{ContentResolver, DocId, FileContentResolver, MapContentResolver, SchemaStore};
