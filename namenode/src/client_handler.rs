use std::sync::Arc;

use proto::{BlockLocation, DfsError, Plan, error::Result, types::block_id};
use tokio::sync::Mutex;
use utilities::logger::{info, instrument, trace, tracing, warn};

use crate::{
    datanode::selection_policy::selection_policy::DatanodeSelectionPolicy,
    ledger::Ledger,
    namenode_state::NamenodeState,
};

/// Serves the client facing metadata operations. Commits are serialised by the state lock
/// and each one rewrites the persisted document before it is acknowledged.
pub struct ClientHandler {
    state: Arc<Mutex<NamenodeState>>,
    datanode_selector: Box<dyn DatanodeSelectionPolicy + Send + Sync>,
    ledger: Box<dyn Ledger + Send + Sync>,
}
impl ClientHandler {
    pub fn new(
        state: NamenodeState,
        datanode_selector: Box<dyn DatanodeSelectionPolicy + Send + Sync>,
        ledger: Box<dyn Ledger + Send + Sync>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            datanode_selector,
            ledger,
        }
    }

    /// Assigns a worker to each of `block_count` blocks. Nothing is persisted; only the
    /// placement cursor moves, and it is not moved back if the write never commits.
    #[instrument(name = "namenode_write_plan", skip(self))]
    pub async fn request_write_plan(&self, file_name: &str, block_count: u64) -> Result<Plan> {
        if file_name.is_empty() {
            return Err(DfsError::InvalidArgument("Filename is required.".to_owned()));
        }
        if block_count == 0 {
            return Err(DfsError::InvalidArgument(
                "block_count must be greater than zero.".to_owned(),
            ));
        }
        let block_count = usize::try_from(block_count).map_err(|_| {
            DfsError::InvalidArgument(format!("block_count {block_count} is too large."))
        })?;
        if self.state.lock().await.contains_file(file_name) {
            return Err(DfsError::AlreadyExists(format!(
                "File '{file_name}' already exists."
            )));
        }
        let plan: Plan = self
            .datanode_selector
            .get_datanodes_to_store(block_count)
            .into_iter()
            .enumerate()
            .map(|(index, datanode)| BlockLocation::new(block_id(file_name, index), datanode))
            .collect();
        info!(?plan, "Generated write plan");
        Ok(plan)
    }

    /// Makes `plan` the readable layout of `file_name`. The plan is trusted as given and
    /// replaces any entry already committed under the same name.
    #[instrument(name = "namenode_commit_write", skip(self, plan), fields(blocks = plan.len()))]
    pub async fn commit_write(&self, file_name: &str, plan: Plan) -> Result<()> {
        if file_name.is_empty() || plan.is_empty() {
            return Err(DfsError::InvalidArgument(
                "Filename and blocks info are required.".to_owned(),
            ));
        }
        let mut state = self.state.lock().await;
        let previous = state.file_to_plan_map.insert(file_name.to_owned(), plan);
        if previous.is_some() {
            warn!("Replacing the plan of an already committed file");
        }
        if let Err(e) = self.ledger.record(&state).await {
            // the mapping in memory must never run ahead of the persisted document
            match previous {
                Some(plan) => state.file_to_plan_map.insert(file_name.to_owned(), plan),
                None => state.file_to_plan_map.remove(file_name),
            };
            return Err(e);
        }
        info!("Successfully committed write");
        Ok(())
    }

    #[instrument(name = "namenode_read_plan", skip(self))]
    pub async fn request_read_plan(&self, file_name: &str) -> Result<Plan> {
        if file_name.is_empty() {
            return Err(DfsError::InvalidArgument("Filename is required.".to_owned()));
        }
        let state = self.state.lock().await;
        match state.file_to_plan_map.get(file_name) {
            Some(plan) => {
                trace!(?plan, "Providing read plan");
                Ok(plan.clone())
            }
            None => Err(DfsError::NotFound(format!("File '{file_name}' not found."))),
        }
    }

    /// Committed file names in sorted order.
    pub async fn list_files(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .file_to_plan_map
            .keys()
            .cloned()
            .collect()
    }

    pub fn datanodes(&self) -> &[String] {
        self.datanode_selector.datanodes()
    }
}
