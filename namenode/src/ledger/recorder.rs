use async_trait::async_trait;
use proto::error::Result;

use crate::namenode_state::NamenodeState;

#[async_trait]
pub trait Recorder {
    /// Replaces the persisted document with `state`.
    async fn record(&self, state: &NamenodeState) -> Result<()>;
}
