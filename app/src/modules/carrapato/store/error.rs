use crate::modules::common::{
    error_codes::CODIGO_SERIAL_IN_USE,
    responses::{internal_error_res, SimpleError},
};
use http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failure of a carrapato store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// the store rejected the write because another carrapato already
    /// uses the same codigo serial
    #[error("codigo serial already in use")]
    CodigoSerialInUse,

    /// a stored record cannot be turned into a carrapato
    #[error("malformed carrapato record: {0}")]
    MalformedRecord(String),

    /// connectivity or command failure of the underlying store
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

impl From<StoreError> for (StatusCode, SimpleError) {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CodigoSerialInUse => (
                StatusCode::BAD_REQUEST,
                SimpleError::from(CODIGO_SERIAL_IN_USE),
            ),
            _ => {
                error!("[STORE] {:#}", err);
                internal_error_res()
            }
        }
    }
}
