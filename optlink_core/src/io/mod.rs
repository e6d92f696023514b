//! Module for writing task snapshots
pub mod json;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("could not serialize the task snapshot")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not write the task snapshot")]
    WriteError(#[from] std::io::Error),
}
