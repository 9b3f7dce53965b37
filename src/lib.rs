//! Glot - Instant Text Translation
//!
//! A Rust implementation of a quick text translator that routes requests
//! between a remote translation endpoint and a local on-device engine,
//! with heuristic language detection and persistent user preferences.

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod live;
pub mod orchestrator;
pub mod settings;
pub mod translate;
