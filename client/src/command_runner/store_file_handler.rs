use std::{path::Path, sync::Arc};

use proto::{DfsError, error::Result};
use utilities::logger::{error, info, instrument, trace, tracing};

use crate::{datanode::Datanode, file_chunker::FileChunker, namenode::Namenode};

pub struct StoreFileHandler<N, D> {
    namenode: Arc<N>,
    datanode: Arc<D>,
    block_size: u64,
}
impl<N, D> StoreFileHandler<N, D>
where
    N: Namenode + Send + Sync,
    D: Datanode + Send + Sync,
{
    pub fn new(namenode: Arc<N>, datanode: Arc<D>, block_size: u64) -> Self {
        Self {
            namenode,
            datanode,
            block_size,
        }
    }

    /// Uploads `local_file_path` under its base name. Blocks are sent one at a time in
    /// plan order and the file is committed only once every block is stored. A failed
    /// transfer aborts the upload; blocks already sent stay on their workers.
    #[instrument(name = "client_store_file", skip(self))]
    pub async fn store_file(&self, local_file_path: &str) -> Result<String> {
        let file_name = Path::new(local_file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                DfsError::InvalidArgument(format!("No file name in path {local_file_path:?}"))
            })?
            .to_owned();
        let chunker = FileChunker::new(local_file_path, self.block_size).await?;
        let block_count = chunker.block_count();
        info!(%file_name, size = chunker.file_size(), block_count, "Requesting write plan");
        let plan = self
            .namenode
            .request_write_plan(&file_name, block_count)
            .await?;
        if plan.len() as u64 != block_count {
            return Err(DfsError::InvalidArgument(format!(
                "Write plan has {} locations for {block_count} blocks",
                plan.len()
            )));
        }
        for (chunk, location) in chunker.zip(plan.iter()) {
            trace!(block_id = %location.block_id, worker = %location.worker_address, "sending block");
            let payload = chunk.read().await?;
            if let Err(e) = self
                .datanode
                .write_block(&location.worker_address, &location.block_id, payload)
                .await
            {
                error!(error = %e, block_id = %location.block_id, "aborting the store file operation");
                return Err(e);
            }
        }
        let ack = self.namenode.commit_write(&file_name, &plan).await?;
        info!(%file_name, "File committed");
        Ok(format!("{ack} ({block_count} blocks)"))
    }
}
