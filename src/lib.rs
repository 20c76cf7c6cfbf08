//! Content studio backend: content lifecycle, scheduled publishing and channel relay
//! - Library exports for testing
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;
