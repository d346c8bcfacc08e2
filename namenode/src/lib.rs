pub mod api_service;
pub mod client_handler;
pub mod config;
pub mod datanode;
pub mod ledger;
pub mod namenode_state;
