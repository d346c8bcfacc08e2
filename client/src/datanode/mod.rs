pub mod service;

use async_trait::async_trait;
use proto::{error::Result, types::HealthResponse};

/// Data plane calls against a single worker, addressed per call.
#[async_trait]
pub trait Datanode {
    async fn write_block(&self, worker_address: &str, block_id: &str, payload: Vec<u8>)
    -> Result<()>;
    async fn read_block(&self, worker_address: &str, block_id: &str) -> Result<Vec<u8>>;
    async fn health(&self, worker_address: &str) -> Result<HealthResponse>;
}
