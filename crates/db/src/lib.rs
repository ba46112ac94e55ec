//! Document store used by the lending service.
//!
//! Collections hold whole documents keyed by [`DocumentId`] and keep them in
//! insertion order, which is the order scans and aggregations observe.

mod collection;
mod error;
mod seed;

pub use collection::{Collection, Document, DocumentId};
pub use error::{DbError, DbResult};
pub use seed::load_seed;
