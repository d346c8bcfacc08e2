use std::net::IpAddr;

use proto::types::ErrorResponse;
use rocket::{Build, Config, Request, Rocket, catch, catchers, http::Status, serde::json::Json};
use storage::file_storage::FileStorage;

pub mod controller;
pub mod error;
pub mod routes;

use crate::api_service::routes::{block, monitoring};

#[catch(default)]
fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: format!("{} : {} {}", status, request.method(), request.uri()),
        }),
    )
}

pub fn rocket(store: FileStorage, address: IpAddr, port: u16) -> Rocket<Build> {
    let config = Config {
        address,
        port,
        ..Config::default()
    };
    rocket::custom(config)
        .manage(store)
        .mount("/", block::routes())
        .mount("/", monitoring::routes())
        .register("/", catchers![default_catcher])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::types::{HealthResponse, MessageResponse};
    use rocket::{http::ContentType, local::asynchronous::Client};

    async fn client(root: &std::path::Path) -> Client {
        let store = FileStorage::new(root).unwrap();
        Client::tracked(rocket(store, "127.0.0.1".parse().unwrap(), 0))
            .await
            .expect("valid rocket instance")
    }

    #[rocket::async_test]
    async fn health_reports_service() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;
        let response = client.get("/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<HealthResponse>().await.unwrap(),
            HealthResponse::healthy("datanode")
        );
    }

    #[rocket::async_test]
    async fn written_block_reads_back_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;
        let payload: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();

        let response = client
            .post("/write-block/doc.bin_block_0")
            .header(ContentType::Binary)
            .body(&payload)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        assert!(
            response
                .into_json::<MessageResponse>()
                .await
                .unwrap()
                .message
                .contains("doc.bin_block_0")
        );
        assert_eq!(
            std::fs::read(dir.path().join("doc.bin_block_0")).unwrap(),
            payload
        );

        let response = client.get("/read-block/doc.bin_block_0").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::Binary));
        assert_eq!(response.into_bytes().await.unwrap(), payload);

        let response = client
            .post("/write-block/doc.bin_block_0")
            .body("short")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        let response = client.get("/read-block/doc.bin_block_0").dispatch().await;
        assert_eq!(response.into_bytes().await.unwrap(), b"short");
    }

    #[rocket::async_test]
    async fn staging_dir_name_is_not_a_block_id() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;
        let response = client
            .post("/write-block/staged")
            .body("payload")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(dir.path().join("staged").is_dir());
    }

    #[rocket::async_test]
    async fn missing_block_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(dir.path()).await;
        let response = client.get("/read-block/absent_block_0").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        let body = response.into_json::<ErrorResponse>().await.unwrap();
        assert!(body.error.contains("absent_block_0"));
    }
}
