use thiserror::Error;
use tokio::io;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("block {0} not found")]
    NotFound(String),
    #[error("invalid block id {0:?}")]
    InvalidBlockId(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Flat key to bytes table holding the blocks of one worker.
pub trait Storage {
    /// Stores everything `block_stream` yields under `block_id`, replacing any previous
    /// bytes. Returns the number of bytes stored.
    async fn write(
        &self,
        block_id: &str,
        block_stream: &mut (impl io::AsyncRead + Unpin + Send),
    ) -> Result<u64>;
    async fn read(&self, block_id: &str) -> Result<Box<dyn io::AsyncRead + Unpin + Send>>;
    async fn available_blocks(&self) -> Result<Vec<String>>;
}

/// Directory under a store's root where incoming blocks are written before being renamed
/// into place. Not usable as a block id.
pub const STAGING_DIR: &str = "staged";

/// Block ids become file names, so anything that could leave the root or collide with the
/// staging area is refused.
pub fn validate_block_id(block_id: &str) -> Result<()> {
    if block_id.is_empty()
        || block_id == "."
        || block_id == ".."
        || block_id == STAGING_DIR
        || block_id.contains('/')
        || block_id.contains('\\')
        || block_id.contains('\0')
    {
        return Err(StorageError::InvalidBlockId(block_id.to_owned()));
    }
    Ok(())
}
