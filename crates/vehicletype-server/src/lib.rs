//! Vehicle Type Registry HTTP Server Library
//!
//! Provides the REST surface, configuration and wiring for testing and reuse.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
