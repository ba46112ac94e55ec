use std::path::PathBuf;

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("document '{id}' already exists in collection '{collection}'")]
    Duplicate { collection: String, id: String },

    #[error("document '{id}' does not exist in collection '{collection}'")]
    Missing { collection: String, id: String },

    #[error("failed to read seed file {}", path.display())]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file {}", path.display())]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
