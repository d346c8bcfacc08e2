use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, trace};

use crate::storage::{Result, STAGING_DIR, Storage, StorageError, validate_block_id};
use tokio::{
    fs::{self, File},
    io::{AsyncWriteExt, copy},
};

/// Blocks live as plain files named by their id directly under `root`. Writes land in
/// `root/staged` first and are renamed into place once complete.
#[derive(Clone, Debug)]
pub struct FileStorage {
    root: PathBuf,
}
impl FileStorage {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        match std::fs::create_dir_all(root.join(STAGING_DIR)) {
            Ok(()) => {
                info!(root = %root.display(), "Created root and staging dir for storage");
            }
            Err(e) => {
                error!(root = %root.display(), error = %e, "Error while creating the root for storage");
                return Err(e.into());
            }
        }
        Ok(FileStorage { root })
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    fn get_committed_path(&self, block_id: &str) -> PathBuf {
        self.root.join(block_id)
    }
    fn get_staged_path(&self, block_id: &str) -> PathBuf {
        self.root
            .join(STAGING_DIR)
            .join(format!("{block_id}.{}", uuid::Uuid::new_v4()))
    }
}
impl Storage for FileStorage {
    #[instrument(name = "file_storage_write", skip(self, block_stream))]
    async fn write(
        &self,
        block_id: &str,
        block_stream: &mut (impl tokio::io::AsyncRead + Unpin + Send),
    ) -> Result<u64> {
        validate_block_id(block_id)?;
        let staged_path = self.get_staged_path(block_id);
        let staged = async {
            let mut block_file = File::create(&staged_path).await?;
            let byte_count = copy(block_stream, &mut block_file).await?;
            block_file.flush().await?;
            block_file.sync_all().await?;
            Ok::<_, std::io::Error>(byte_count)
        }
        .await;
        let byte_count = match staged {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Error while staging block, discarding partial copy");
                let _ = fs::remove_file(&staged_path).await;
                return Err(e.into());
            }
        };
        // rename replaces an existing block atomically
        fs::rename(&staged_path, self.get_committed_path(block_id)).await?;
        info!(%block_id, %byte_count, "block stored");
        Ok(byte_count)
    }
    #[instrument(name = "file_storage_read", skip(self))]
    async fn read(&self, block_id: &str) -> Result<Box<dyn tokio::io::AsyncRead + Unpin + Send>> {
        validate_block_id(block_id)?;
        match File::open(self.get_committed_path(block_id)).await {
            Ok(block_file) => Ok(Box::new(block_file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(%block_id, "block not present");
                Err(StorageError::NotFound(block_id.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }
    #[instrument(name = "file_storage_available_blocks", skip(self))]
    async fn available_blocks(&self) -> Result<Vec<String>> {
        let mut dir_enteries = fs::read_dir(&self.root).await?;
        let mut block_ids = vec![];
        while let Some(block) = dir_enteries.next_entry().await? {
            if block.file_type().await?.is_dir() {
                continue;
            }
            match block.file_name().into_string() {
                Ok(name) => block_ids.push(name),
                Err(name) => {
                    error!(?name, "Skipping block with non utf-8 file name");
                }
            }
        }
        block_ids.sort();
        Ok(block_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::storage_test;
    use std::io::Cursor;

    #[tokio::test]
    async fn file_storage_test() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("blocks"))?;
        storage_test(storage).await
    }

    #[tokio::test]
    async fn staging_area_is_empty_after_write() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path())?;
        storage
            .write("a_block_0", &mut Cursor::new(vec![7u8; 4096]))
            .await?;
        let mut staged = fs::read_dir(dir.path().join("staged")).await?;
        assert!(staged.next_entry().await?.is_none());
        assert_eq!(
            fs::read(dir.path().join("a_block_0")).await?,
            vec![7u8; 4096]
        );
        Ok(())
    }

    #[tokio::test]
    async fn invalid_block_id_is_not_written() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path())?;
        let result = storage.write("../escape", &mut Cursor::new(b"x")).await;
        assert!(matches!(result, Err(StorageError::InvalidBlockId(_))));
        let result = storage.write(STAGING_DIR, &mut Cursor::new(b"x")).await;
        assert!(matches!(result, Err(StorageError::InvalidBlockId(_))));
        assert!(fs::metadata(dir.path().join(STAGING_DIR)).await?.is_dir());
        assert!(storage.available_blocks().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_block_is_stored() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path())?;
        let written = storage.write("empty_block_0", &mut Cursor::new(Vec::<u8>::new())).await?;
        assert_eq!(written, 0);
        assert_eq!(storage.available_blocks().await?, vec!["empty_block_0"]);
        Ok(())
    }
}
