use std::path::{Path, PathBuf};

use proto::error::Result;
use tokio::{fs::File, io::AsyncWriteExt};
use utilities::logger::{instrument, trace, tracing};

use crate::file_chunker::local_io_error;

/// Appends fetched blocks straight into the destination file. Nothing is removed when a
/// read aborts, so the destination may be left truncated.
#[derive(Debug)]
pub struct ChunkJoiner {
    file_path: PathBuf,
    file: File,
    written: u64,
}

impl ChunkJoiner {
    #[instrument(name = "new_chunk_joiner", skip(file_path), fields(path = %file_path.as_ref().display()))]
    pub async fn create(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        trace!("Creating file");
        let file = File::create(&file_path)
            .await
            .map_err(|e| local_io_error(&file_path, e))?;
        Ok(Self {
            file_path,
            file,
            written: 0,
        })
    }
    pub async fn join_chunk(&mut self, payload: &[u8]) -> Result<()> {
        self.file
            .write_all(payload)
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        self.file
            .flush()
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        self.written += payload.len() as u64;
        Ok(())
    }
    /// Syncs the file and returns the number of bytes written.
    pub async fn finish(self) -> Result<u64> {
        self.file
            .sync_all()
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        Ok(self.written)
    }
}
