use proto::{DfsError, types::ErrorResponse};
use rocket::{
    Request,
    http::Status,
    response::{self, Responder},
    serde::json::Json,
};

/// Carries a `DfsError` out of a route as `{error}` with the matching status.
#[derive(Debug)]
pub struct ApiError(pub DfsError);

impl From<DfsError> for ApiError {
    fn from(value: DfsError) -> Self {
        Self(value)
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
