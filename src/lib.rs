//! Chat relay server: forwards chat messages to an LLM and keeps the history.
//!
//! Library exports for the binary and the integration tests.

pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod infrastructure;
