use std::{net::IpAddr, sync::Arc};

use rocket::{
    Build, Config, Request, Rocket, catch, catchers,
    data::{Limits, ToByteUnit},
    http::Status,
    serde::json::Json,
};

pub mod controller;
pub mod error;
pub mod routes;

use crate::{
    api_service::routes::{file, monitoring},
    client_handler::ClientHandler,
};
use proto::types::ErrorResponse;

#[catch(default)]
fn default_catcher(status: Status, request: &Request<'_>) -> (Status, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: format!("{} : {} {}", status, request.method(), request.uri()),
        }),
    )
}

pub fn rocket(handler: Arc<ClientHandler>, address: IpAddr, port: u16) -> Rocket<Build> {
    let config = Config {
        address,
        port,
        limits: Limits::default().limit("json", 16.mebibytes()),
        ..Config::default()
    };
    rocket::custom(config)
        .manage(handler)
        .mount("/", file::routes())
        .mount("/", monitoring::routes())
        .register("/", catchers![default_catcher])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_handler::tests::{MemoryLedger, handler_with};
    use proto::{
        BlockLocation,
        types::{CommitRequest, HealthResponse, MessageResponse, PlanResponse, WritePlanRequest},
    };
    use rocket::{http::ContentType, local::asynchronous::Client};

    async fn client(worker_count: usize) -> Client {
        let handler = Arc::new(handler_with(MemoryLedger::default(), worker_count));
        Client::tracked(rocket(handler, "127.0.0.1".parse().unwrap(), 0))
            .await
            .expect("valid rocket instance")
    }

    #[rocket::async_test]
    async fn health_reports_service() {
        let client = client(1).await;
        let response = client.get("/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.into_json::<HealthResponse>().await.unwrap(),
            HealthResponse::healthy("namenode")
        );
    }

    #[rocket::async_test]
    async fn write_commit_read_cycle() {
        let client = client(4).await;
        let response = client
            .post("/write-plan")
            .json(&WritePlanRequest {
                filename: "doc.bin".to_owned(),
                block_count: 3,
            })
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let plan = response.into_json::<PlanResponse>().await.unwrap().plan;
        assert_eq!(
            plan[2],
            BlockLocation::new("doc.bin_block_2", "http://worker2")
        );

        let response = client
            .post("/commit")
            .json(&CommitRequest {
                filename: "doc.bin".to_owned(),
                blocks: plan.clone(),
            })
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert!(
            response
                .into_json::<MessageResponse>()
                .await
                .unwrap()
                .message
                .contains("doc.bin")
        );

        let response = client.get("/read-plan?filename=doc.bin").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<PlanResponse>().await.unwrap().plan, plan);

        let response = client.get("/list-files").dispatch().await;
        assert_eq!(
            response.into_json::<Vec<String>>().await.unwrap(),
            vec!["doc.bin"]
        );

        let response = client
            .post("/write-plan")
            .json(&WritePlanRequest {
                filename: "doc.bin".to_owned(),
                block_count: 2,
            })
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Conflict);
        let body = response.into_json::<ErrorResponse>().await.unwrap();
        assert!(body.error.contains("already exists"));
    }

    #[rocket::async_test]
    async fn error_statuses_are_distinct() {
        let client = client(2).await;
        let response = client.get("/read-plan?filename=missing").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);

        let response = client.get("/read-plan").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);

        let response = client
            .post("/write-plan")
            .json(&WritePlanRequest {
                filename: "a.txt".to_owned(),
                block_count: 0,
            })
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);

        let response = client
            .post("/write-plan")
            .header(ContentType::JSON)
            .body("{not json")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(response.into_json::<ErrorResponse>().await.is_some());

        let response = client
            .post("/commit")
            .json(&CommitRequest {
                filename: "a.txt".to_owned(),
                blocks: vec![],
            })
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[rocket::async_test]
    async fn unknown_route_gets_json_error() {
        let client = client(1).await;
        let response = client.get("/nope").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        assert!(response.into_json::<ErrorResponse>().await.is_some());
    }
}
