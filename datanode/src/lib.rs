pub mod api_service;
pub mod config;
