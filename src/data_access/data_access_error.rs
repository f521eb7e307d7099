use diesel::r2d2::PoolError;
use thiserror::Error;

/// Failures of the task store. None of these are caused by the client.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("connection pool: {0}")]
    Pool(#[from] PoolError),
    #[error("query: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("blocking task: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("stored row {id} is invalid: {reason}")]
    CorruptRow { id: i32, reason: String },
}
