use serde::{Deserialize, Serialize};

/// Largest payload a single block may carry. The last block of a file may be shorter.
pub const BLOCK_SIZE: u64 = 32 * 1024 * 1024;

/// Identifier of the `index`-th block of `file_name`, unique across the cluster as long as
/// file names are.
pub fn block_id(file_name: &str, index: usize) -> String {
    format!("{file_name}_block_{index}")
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockLocation {
    pub block_id: String,
    pub worker_address: String,
}

impl BlockLocation {
    pub fn new(block_id: impl Into<String>, worker_address: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            worker_address: worker_address.into(),
        }
    }
}

/// Block locations of one file in byte-offset order.
pub type Plan = Vec<BlockLocation>;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WritePlanRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub block_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommitRequest {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub blocks: Plan,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: Plan,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn healthy(service: &str) -> Self {
        Self {
            status: "healthy".to_owned(),
            service: service.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_ids_follow_file_order() {
        assert_eq!(block_id("doc.bin", 0), "doc.bin_block_0");
        assert_eq!(block_id("doc.bin", 12), "doc.bin_block_12");
    }

    #[test]
    fn write_plan_request_defaults_missing_fields() {
        let request: WritePlanRequest = serde_json::from_str(r#"{"filename":"a.txt"}"#).unwrap();
        assert_eq!(request.filename, "a.txt");
        assert_eq!(request.block_count, 0);
    }

    #[test]
    fn plan_response_wire_shape() {
        let response = PlanResponse {
            plan: vec![BlockLocation::new("a_block_0", "http://127.0.0.1:5001")],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["plan"][0]["block_id"], "a_block_0");
        assert_eq!(json["plan"][0]["worker_address"], "http://127.0.0.1:5001");
    }
}
