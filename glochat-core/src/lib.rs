//! Core types and utilities for glochat
//!
//! This crate provides the chat data model, the session store with its
//! pluggable persistence backends, configuration, and logging setup used
//! by the relay server and the CLI.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use error::{Error, Result};
