//! Shared helpers for the gateway service-handler crates.
//!
//! - `utils::logging` bootstraps `tracing` output.
//! - `utils::time` formats the timestamps the downstream services exchange.
//! - `pagination` normalizes list parameters before they go downstream.

pub mod pagination;
pub mod utils;
