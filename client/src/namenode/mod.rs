pub mod service;

use async_trait::async_trait;
use proto::{Plan, error::Result, types::HealthResponse};

/// Control plane calls the client makes against the metadata authority.
#[async_trait]
pub trait Namenode {
    async fn request_write_plan(&self, file_name: &str, block_count: u64) -> Result<Plan>;
    /// Returns the acknowledgement message of the authority.
    async fn commit_write(&self, file_name: &str, plan: &Plan) -> Result<String>;
    async fn request_read_plan(&self, file_name: &str) -> Result<Plan>;
    async fn list_files(&self) -> Result<Vec<String>>;
    async fn health(&self) -> Result<HealthResponse>;
}
