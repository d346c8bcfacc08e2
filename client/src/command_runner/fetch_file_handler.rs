use std::sync::Arc;

use proto::error::Result;
use utilities::logger::{error, info, instrument, trace, tracing};

use crate::{chunk_joiner::ChunkJoiner, datanode::Datanode, namenode::Namenode};

pub struct FetchFileHandler<N, D> {
    namenode: Arc<N>,
    datanode: Arc<D>,
}
impl<N, D> FetchFileHandler<N, D>
where
    N: Namenode + Send + Sync,
    D: Datanode + Send + Sync,
{
    pub fn new(namenode: Arc<N>, datanode: Arc<D>) -> Self {
        Self { namenode, datanode }
    }

    /// The output file is only created once the read plan is known. A failed block fetch
    /// leaves what was written so far in place.
    #[instrument(name = "client_fetch_file", skip(self))]
    pub async fn fetch_file(&self, file_name: &str, output_path: &str) -> Result<String> {
        let plan = self.namenode.request_read_plan(file_name).await?;
        info!(blocks = plan.len(), "Got read plan");
        let mut joiner = ChunkJoiner::create(output_path).await?;
        for location in &plan {
            trace!(block_id = %location.block_id, worker = %location.worker_address, "fetching block");
            let payload = match self
                .datanode
                .read_block(&location.worker_address, &location.block_id)
                .await
            {
                Ok(payload) => payload,
                Err(e) => {
                    error!(error = %e, block_id = %location.block_id, "aborting the fetch file operation");
                    return Err(e);
                }
            };
            joiner.join_chunk(&payload).await?;
        }
        let written = joiner.finish().await?;
        Ok(format!(
            "File {file_name} read, {written} bytes written to {output_path}"
        ))
    }
}
