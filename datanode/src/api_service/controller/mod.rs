pub mod block;
pub mod monitoring;
