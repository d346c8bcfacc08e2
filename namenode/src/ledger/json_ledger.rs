use std::path::{Path, PathBuf};

use async_trait::async_trait;
use proto::{DfsError, error::Result};
use tokio::io::AsyncWriteExt;
use utilities::logger::{debug, error, info, instrument, tracing};

use super::{recorder::Recorder, replayer::Replayer};
use crate::namenode_state::NamenodeState;

/// Keeps the whole metadata mapping in one json document. Every record rewrites the
/// document through a sibling temp file and a rename, so a crash mid-write leaves the
/// previous version intact.
#[derive(Clone, Debug)]
pub struct JsonLedger {
    log_store: PathBuf,
}
impl JsonLedger {
    pub async fn new(log_store: impl AsRef<Path>) -> Result<Self> {
        let log_store = log_store.as_ref().to_path_buf();
        if let Some(parent) = log_store.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| storage_failure("creating metadata directory", &e))?;
            }
        }
        Ok(Self { log_store })
    }
    pub fn path(&self) -> &Path {
        &self.log_store
    }
    fn get_staged_path(&self) -> PathBuf {
        let file_name = self
            .log_store
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "metadata".to_owned());
        self.log_store
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}

fn storage_failure(action: &str, e: &dyn std::fmt::Display) -> DfsError {
    DfsError::StorageFailure(format!("Error while {action} : {e}"))
}

#[async_trait]
impl Recorder for JsonLedger {
    #[instrument(name = "namenode_metadata_record", skip(self, state), fields(files = state.file_to_plan_map.len()))]
    async fn record(&self, state: &NamenodeState) -> Result<()> {
        let document = serde_json::to_vec_pretty(state)
            .map_err(|e| storage_failure("serializing metadata", &e))?;
        let staged_path = self.get_staged_path();
        let staged = async {
            let mut staged_file = tokio::fs::File::create(&staged_path).await?;
            staged_file.write_all(&document).await?;
            staged_file.flush().await?;
            staged_file.sync_all().await?;
            tokio::fs::rename(&staged_path, &self.log_store).await
        }
        .await;
        if let Err(e) = staged {
            error!(error = %e, path = %self.log_store.display(), "Error while persisting metadata");
            let _ = tokio::fs::remove_file(&staged_path).await;
            return Err(storage_failure("persisting metadata", &e));
        }
        info!(path = %self.log_store.display(), "Metadata saved to disk");
        Ok(())
    }
}

impl Replayer for JsonLedger {
    #[instrument(name = "namenode_metadata_replay", skip(self))]
    fn replay(&self) -> Result<NamenodeState> {
        debug!(filepath = %self.log_store.display(), "file path");
        let document = match std::fs::read(&self.log_store) {
            Ok(v) => v,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing metadata file found. Starting fresh");
                return Ok(NamenodeState::new());
            }
            Err(e) => return Err(storage_failure("reading metadata", &e)),
        };
        let state: NamenodeState = serde_json::from_slice(&document)
            .map_err(|e| storage_failure("parsing metadata", &e))?;
        info!(files = state.file_to_plan_map.len(), "Metadata loaded from disk");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::BlockLocation;

    #[tokio::test]
    async fn missing_document_replays_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonLedger::new(dir.path().join("nested/metadata.json"))
            .await
            .unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert_eq!(ledger.replay().unwrap(), NamenodeState::new());
    }

    #[tokio::test]
    async fn recorded_state_replays() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonLedger::new(dir.path().join("metadata.json"))
            .await
            .unwrap();
        let mut state = NamenodeState::new();
        state.file_to_plan_map.insert(
            "doc.bin".to_owned(),
            vec![
                BlockLocation::new("doc.bin_block_0", "http://127.0.0.1:5001"),
                BlockLocation::new("doc.bin_block_1", "http://127.0.0.1:5002"),
            ],
        );
        ledger.record(&state).await.unwrap();
        state.file_to_plan_map.insert(
            "b.txt".to_owned(),
            vec![BlockLocation::new("b.txt_block_0", "http://127.0.0.1:5003")],
        );
        ledger.record(&state).await.unwrap();

        let reopened = JsonLedger::new(ledger.path()).await.unwrap();
        assert_eq!(reopened.replay().unwrap(), state);
        // only the document itself remains, no temp files
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn corrupt_document_is_a_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, b"{ truncated").unwrap();
        let ledger = JsonLedger::new(&path).await.unwrap();
        assert!(matches!(ledger.replay(), Err(DfsError::StorageFailure(_))));
    }
}
