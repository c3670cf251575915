pub mod apis;
pub mod codepoints;
pub mod common;
pub mod config;
pub mod logging;
pub mod observability;
pub mod pipeline;

// Ports and their infrastructure adapters
pub mod app;
pub mod infra;
