use std::sync::atomic::{AtomicUsize, Ordering};

use proto::DfsError;
use utilities::logger::{instrument, trace, tracing};

use super::selection_policy::DatanodeSelectionPolicy;

/// Cycles over a fixed worker list with one cursor shared by every file and client.
/// The cursor lives only in memory and starts at the first worker.
#[derive(Debug)]
pub struct RoundRobinSelectionPolicy {
    datanodes: Vec<String>,
    cursor: AtomicUsize,
}
impl RoundRobinSelectionPolicy {
    pub fn new(datanodes: Vec<String>) -> Result<Self, DfsError> {
        if datanodes.is_empty() {
            return Err(DfsError::InvalidArgument(
                "at least one datanode address is required".to_owned(),
            ));
        }
        Ok(Self {
            datanodes,
            cursor: AtomicUsize::new(0),
        })
    }
    /// Index of the worker the next block will be assigned to.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::SeqCst) % self.datanodes.len()
    }
}

impl DatanodeSelectionPolicy for RoundRobinSelectionPolicy {
    #[instrument(name = "policy_datanode_selection_to_store", skip(self))]
    fn get_datanodes_to_store(&self, block_count: usize) -> Vec<String> {
        // a single fetch_add reserves the whole run, so concurrent plans never interleave
        let start = self.cursor.fetch_add(block_count, Ordering::SeqCst);
        let selected: Vec<String> = (0..block_count)
            .map(|offset| {
                self.datanodes[start.wrapping_add(offset) % self.datanodes.len()].clone()
            })
            .collect();
        trace!(start, ?selected, "selected datanodes");
        selected
    }
    fn datanodes(&self) -> &[String] {
        &self.datanodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("worker{i}")).collect()
    }

    #[test]
    fn empty_membership_is_rejected() {
        assert!(matches!(
            RoundRobinSelectionPolicy::new(vec![]),
            Err(DfsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn fresh_cursor_starts_at_first_worker() {
        let policy = RoundRobinSelectionPolicy::new(workers(4)).unwrap();
        assert_eq!(
            policy.get_datanodes_to_store(3),
            vec!["worker0", "worker1", "worker2"]
        );
        assert_eq!(policy.cursor(), 3);
    }

    #[test]
    fn cursor_is_shared_across_requests_and_wraps() {
        let policy = RoundRobinSelectionPolicy::new(workers(4)).unwrap();
        let mut assigned = vec![];
        for block_count in [3, 2, 5, 1] {
            let before = policy.cursor();
            assigned.extend(policy.get_datanodes_to_store(block_count));
            assert_eq!(policy.cursor(), (before + block_count) % 4);
        }
        let expected: Vec<String> = (0..11).map(|i| format!("worker{}", i % 4)).collect();
        assert_eq!(assigned, expected);
    }

    #[test]
    fn concurrent_requests_get_contiguous_runs() {
        let policy = std::sync::Arc::new(RoundRobinSelectionPolicy::new(workers(3)).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let policy = policy.clone();
                std::thread::spawn(move || policy.get_datanodes_to_store(3))
            })
            .collect();
        for handle in handles {
            let mut run = handle.join().unwrap();
            run.sort();
            // three consecutive slots over three workers always cover each worker once
            assert_eq!(run, workers(3));
        }
        assert_eq!(policy.cursor(), 0);
    }
}
