/// Decides which workers receive the blocks of a new file.
pub trait DatanodeSelectionPolicy {
    /// One worker address per block, in block order.
    fn get_datanodes_to_store(&self, block_count: usize) -> Vec<String>;
    fn datanodes(&self) -> &[String];
}
