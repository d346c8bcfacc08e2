use std::time::Duration;

use async_trait::async_trait;
use proto::{DfsError, error::Result, types::HealthResponse};
use reqwest::{Url, header::CONTENT_TYPE};
use utilities::{
    http_client::{HTTP_CLIENT, join_url},
    logger::{instrument, trace, tracing},
};

use super::Datanode;
use crate::response::{decode_json, error_from_response, transport_failure};

#[derive(Clone, Debug, Default)]
pub struct DatanodeService {}
impl DatanodeService {
    pub fn new() -> Self {
        Self {}
    }
    /// `<worker>/<action>/<block_id>` with the block id percent-encoded as one segment.
    fn block_url(worker_address: &str, action: &str, block_id: &str) -> Result<Url> {
        let mut url = Url::parse(worker_address).map_err(|e| {
            DfsError::InvalidArgument(format!("Invalid worker address {worker_address:?} : {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                DfsError::InvalidArgument(format!("Invalid worker address {worker_address:?}"))
            })?
            .pop_if_empty()
            .push(action)
            .push(block_id);
        Ok(url)
    }
}

#[async_trait]
impl Datanode for DatanodeService {
    #[instrument(name = "service_datanode_write_block", skip(self, payload), fields(size = payload.len()))]
    async fn write_block(
        &self,
        worker_address: &str,
        block_id: &str,
        payload: Vec<u8>,
    ) -> Result<()> {
        let url = Self::block_url(worker_address, "write-block", block_id)?;
        let response = HTTP_CLIENT
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(payload)
            .send()
            .await
            .map_err(|e| transport_failure(worker_address, e))?;
        if !response.status().is_success() {
            return Err(error_from_response(worker_address, response).await);
        }
        trace!("block written");
        Ok(())
    }
    #[instrument(name = "service_datanode_read_block", skip(self))]
    async fn read_block(&self, worker_address: &str, block_id: &str) -> Result<Vec<u8>> {
        let url = Self::block_url(worker_address, "read-block", block_id)?;
        let response = HTTP_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| transport_failure(worker_address, e))?;
        if !response.status().is_success() {
            return Err(error_from_response(worker_address, response).await);
        }
        let payload = response
            .bytes()
            .await
            .map_err(|e| transport_failure(worker_address, e))?;
        trace!(size = payload.len(), "block read");
        Ok(payload.to_vec())
    }
    async fn health(&self, worker_address: &str) -> Result<HealthResponse> {
        let response = HTTP_CLIENT
            .get(join_url(worker_address, "/health"))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .map_err(|e| transport_failure(worker_address, e))?;
        decode_json(worker_address, response).await
    }
}
