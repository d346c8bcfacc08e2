use std::sync::Arc;

use proto::{
    DfsError,
    types::{CommitRequest, MessageResponse, PlanResponse, WritePlanRequest},
};
use rocket::{
    State, get, post,
    serde::json::{self, Json},
};

use crate::{api_service::error::ApiResult, client_handler::ClientHandler};

fn malformed_body(e: json::Error<'_>) -> DfsError {
    DfsError::InvalidArgument(format!("Malformed request body : {e}"))
}

#[post("/write-plan", data = "<body>")]
pub async fn write_plan(
    handler: &State<Arc<ClientHandler>>,
    body: Result<Json<WritePlanRequest>, json::Error<'_>>,
) -> ApiResult<Json<PlanResponse>> {
    let request = body.map_err(malformed_body)?.into_inner();
    let plan = handler
        .request_write_plan(&request.filename, request.block_count)
        .await?;
    Ok(Json(PlanResponse { plan }))
}

#[post("/commit", data = "<body>")]
pub async fn commit(
    handler: &State<Arc<ClientHandler>>,
    body: Result<Json<CommitRequest>, json::Error<'_>>,
) -> ApiResult<Json<MessageResponse>> {
    let request = body.map_err(malformed_body)?.into_inner();
    handler.commit_write(&request.filename, request.blocks).await?;
    Ok(Json(MessageResponse {
        message: format!("File '{}' committed successfully.", request.filename),
    }))
}

#[get("/read-plan?<filename>")]
pub async fn read_plan(
    handler: &State<Arc<ClientHandler>>,
    filename: Option<&str>,
) -> ApiResult<Json<PlanResponse>> {
    let plan = handler
        .request_read_plan(filename.unwrap_or_default())
        .await?;
    Ok(Json(PlanResponse { plan }))
}

#[get("/list-files")]
pub async fn list_files(handler: &State<Arc<ClientHandler>>) -> Json<Vec<String>> {
    Json(handler.list_files().await)
}
