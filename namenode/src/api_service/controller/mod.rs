pub mod file;
pub mod monitoring;
