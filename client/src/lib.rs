pub mod chunk_joiner;
pub mod command_runner;
pub mod config;
pub mod datanode;
pub mod file_chunker;
pub mod namenode;
mod response;
