use proto::types::HealthResponse;
use rocket::{get, serde::json::Json};

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("datanode"))
}
