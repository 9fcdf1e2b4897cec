//! Chat session management
//!
//! The session store keeps the chat list and the active chat, persists
//! the whole state to a key-value backend after every mutation, and
//! relays submissions to the server through a transport trait.

pub mod chat;
pub mod storage;
pub mod store;
pub mod title;

pub use chat::{Chat, ChatMessage, Role};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{ChatTransport, SessionState, SessionStore, SubmissionTicket};
pub use title::{KeywordTitler, TitleStrategy};
