//! # Core
//!
//! Settings shared by every front end. Knows nothing about ratatui or
//! the network.
//!
//! - [`config`]: layered configuration (defaults → file → env → CLI)

pub mod config;
