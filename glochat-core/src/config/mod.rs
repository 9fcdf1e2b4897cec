//! Configuration management
//!
//! Handles loading of glochat configuration from the config file and
//! environment variables.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::*;
