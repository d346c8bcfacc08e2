pub mod round_robin_selection_policy;
pub mod selection_policy;
