pub mod selection_policy;
