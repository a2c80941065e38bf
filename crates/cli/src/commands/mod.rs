//! CLI command implementations

pub mod compose;
pub mod config;
pub mod hooks;
pub mod plan;
pub mod serve;
