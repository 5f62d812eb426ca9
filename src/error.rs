// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String),
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}
