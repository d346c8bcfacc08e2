use proto::{DfsError, types::ErrorResponse};
use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
    serde::json::Json,
};
use storage::storage::StorageError;
use utilities::logger::error;

#[derive(Debug)]
pub struct ApiError(pub DfsError);

impl From<DfsError> for ApiError {
    fn from(value: DfsError) -> Self {
        Self(value)
    }
}

impl From<StorageError> for ApiError {
    fn from(value: StorageError) -> Self {
        let error = match value {
            StorageError::NotFound(block_id) => {
                DfsError::NotFound(format!("Block '{block_id}' not found."))
            }
            StorageError::InvalidBlockId(block_id) => {
                DfsError::InvalidArgument(format!("Invalid block id {block_id:?}."))
            }
            StorageError::Io(e) => {
                error!(error = %e, "Storage failure while serving block");
                DfsError::StorageFailure(format!("Failed to access block : {e}"))
            }
        };
        Self(error)
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = Status::from_code(self.0.status_code()).unwrap_or(Status::InternalServerError);
        let body = Json(ErrorResponse {
            error: self.0.message().to_owned(),
        });
        (status, body).respond_to(request)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
