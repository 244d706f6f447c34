//! HTTP API: server, routing, and request/response mapping for the allocation engine.

pub mod app;
pub mod config;
pub mod history;
pub mod middleware;
