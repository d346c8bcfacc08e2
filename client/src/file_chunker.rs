use std::{
    io::{ErrorKind, SeekFrom},
    path::{Path, PathBuf},
};

use proto::{DfsError, error::Result};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use utilities::logger::{instrument, trace, tracing};

/// Byte range `[start, end)` of a local file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChunk {
    file_path: PathBuf,
    pub start: u64,
    pub end: u64,
}
impl FileChunk {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
    #[instrument(name = "file_chunk_read", skip(self), fields(start = self.start, end = self.end))]
    pub async fn read(&self) -> Result<Vec<u8>> {
        let mut file = tokio::fs::File::open(&self.file_path)
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        file.seek(SeekFrom::Start(self.start))
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        let mut payload = vec![0; self.len() as usize];
        file.read_exact(&mut payload)
            .await
            .map_err(|e| local_io_error(&self.file_path, e))?;
        trace!("chunk read from disk");
        Ok(payload)
    }
}

/// Splits a local file into consecutive chunks of `block_size` bytes, the last one
/// possibly shorter. An empty file yields no chunk.
#[derive(Debug)]
pub struct FileChunker {
    file_path: PathBuf,
    file_size: u64,
    block_size: u64,
    offset: u64,
}

impl FileChunker {
    pub async fn new(file_path: impl AsRef<Path>, block_size: u64) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        if block_size == 0 {
            return Err(DfsError::InvalidArgument(
                "Block size must be positive".to_owned(),
            ));
        }
        let metadata = tokio::fs::metadata(&file_path)
            .await
            .map_err(|e| local_io_error(&file_path, e))?;
        if metadata.is_dir() {
            return Err(DfsError::InvalidArgument(format!(
                "Provided file path ({}) is dir",
                file_path.display()
            )));
        }
        Ok(Self {
            file_path,
            file_size: metadata.len(),
            block_size,
            offset: 0,
        })
    }
    pub fn file_size(&self) -> u64 {
        self.file_size
    }
    pub fn block_count(&self) -> u64 {
        self.file_size.div_ceil(self.block_size)
    }
}

impl Iterator for FileChunker {
    type Item = FileChunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.file_size {
            return None;
        }
        let start = self.offset;
        let end = (start + self.block_size).min(self.file_size);
        self.offset = end;
        Some(FileChunk {
            file_path: self.file_path.clone(),
            start,
            end,
        })
    }
}

pub(crate) fn local_io_error(path: &Path, e: std::io::Error) -> DfsError {
    match e.kind() {
        ErrorKind::NotFound => {
            DfsError::NotFound(format!("Local file {} not found", path.display()))
        }
        _ => DfsError::StorageFailure(format!(
            "Error while accessing local file {} : {e}",
            path.display()
        )),
    }
}
