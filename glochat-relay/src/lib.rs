//! Relay server for glochat
//!
//! Exposes `POST /api/chat`, forwarding each submitted message with a
//! fixed system prompt to the upstream completion provider. Every
//! failure class collapses into one generic 500 response; specifics go
//! to the log only.

pub mod handlers;
pub mod server;
pub mod state;

pub use server::{router, run_server};
pub use state::AppState;
