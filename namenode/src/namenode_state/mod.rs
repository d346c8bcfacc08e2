use std::collections::BTreeMap;

use proto::Plan;
use serde::{Deserialize, Serialize};

/// Committed files and where their blocks live. Serialized as a plain
/// `{ "filename": [ {block_id, worker_address}, ... ] }` document.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamenodeState {
    pub file_to_plan_map: BTreeMap<String, Plan>,
}
impl NamenodeState {
    pub fn new() -> Self {
        Self {
            file_to_plan_map: BTreeMap::default(),
        }
    }
    pub fn contains_file(&self, file_name: &str) -> bool {
        self.file_to_plan_map.contains_key(file_name)
    }
}
