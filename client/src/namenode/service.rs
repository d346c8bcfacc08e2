use std::time::Duration;

use async_trait::async_trait;
use proto::{
    Plan,
    error::Result,
    types::{CommitRequest, HealthResponse, MessageResponse, PlanResponse, WritePlanRequest},
};
use utilities::{
    http_client::{HTTP_CLIENT, join_url},
    logger::{instrument, trace, tracing},
};

use super::Namenode;
use crate::response::{decode_json, transport_failure};

const PEER: &str = "namenode";

#[derive(Clone, Debug)]
pub struct NamenodeService {
    address: String,
}
impl NamenodeService {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl Namenode for NamenodeService {
    #[instrument(name = "service_namenode_write_plan", skip(self))]
    async fn request_write_plan(&self, file_name: &str, block_count: u64) -> Result<Plan> {
        let request = WritePlanRequest {
            filename: file_name.to_owned(),
            block_count,
        };
        let response = HTTP_CLIENT
            .post(join_url(&self.address, "/write-plan"))
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_failure(PEER, e))?;
        let plan = decode_json::<PlanResponse>(PEER, response).await?.plan;
        trace!(?plan, "got write plan");
        Ok(plan)
    }
    #[instrument(name = "service_namenode_commit_write", skip(self, plan))]
    async fn commit_write(&self, file_name: &str, plan: &Plan) -> Result<String> {
        let request = CommitRequest {
            filename: file_name.to_owned(),
            blocks: plan.clone(),
        };
        let response = HTTP_CLIENT
            .post(join_url(&self.address, "/commit"))
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_failure(PEER, e))?;
        Ok(decode_json::<MessageResponse>(PEER, response).await?.message)
    }
    #[instrument(name = "service_namenode_read_plan", skip(self))]
    async fn request_read_plan(&self, file_name: &str) -> Result<Plan> {
        let response = HTTP_CLIENT
            .get(join_url(&self.address, "/read-plan"))
            .query(&[("filename", file_name)])
            .send()
            .await
            .map_err(|e| transport_failure(PEER, e))?;
        Ok(decode_json::<PlanResponse>(PEER, response).await?.plan)
    }
    async fn list_files(&self) -> Result<Vec<String>> {
        let response = HTTP_CLIENT
            .get(join_url(&self.address, "/list-files"))
            .send()
            .await
            .map_err(|e| transport_failure(PEER, e))?;
        decode_json(PEER, response).await
    }
    async fn health(&self) -> Result<HealthResponse> {
        let response = HTTP_CLIENT
            .get(join_url(&self.address, "/health"))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .map_err(|e| transport_failure(PEER, e))?;
        decode_json(PEER, response).await
    }
}
