//! Session store
//!
//! Owns the chat list and active-chat reference, persists the full state
//! after every mutation, and relays submissions through a transport.
//! Overlapping submissions are rejected at the store level: a chat with
//! an in-flight submission refuses a second one until it completes.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use super::chat::{Chat, ChatMessage};
use super::storage::StateStorage;
use super::title::{KeywordTitler, TitleStrategy};

/// Storage key holding the serialized session state
pub const CHATS_KEY: &str = "chats";

/// Storage key holding the theme preference ("dark" or "light")
pub const THEME_KEY: &str = "theme";

/// Assistant bubble shown when the relay call fails
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Persisted session state
///
/// Invariant: if `active_chat_id` is set, a chat with that id exists in
/// `chats`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    pub chats: Vec<Chat>,
    pub active_chat_id: Option<String>,
}

/// Transport used to deliver a submission to the relay
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one user message and return the assistant reply text
    async fn send(&self, message: &str) -> crate::Result<String>;
}

/// Proof of a begun submission, consumed by [`SessionStore::complete_submission`]
#[derive(Debug)]
pub struct SubmissionTicket {
    chat_id: String,
}

impl SubmissionTicket {
    /// Id of the chat the submission belongs to
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

/// The client-side session store
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn StateStorage>,
    titler: Box<dyn TitleStrategy>,
    pending: HashSet<String>,
}

impl SessionStore {
    /// Create an empty store on top of a storage backend
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            state: SessionState::default(),
            storage,
            titler: Box::new(KeywordTitler),
            pending: HashSet::new(),
        }
    }

    /// Replace the title strategy
    pub fn with_titler(mut self, titler: Box<dyn TitleStrategy>) -> Self {
        self.titler = titler;
        self
    }

    /// Load persisted state from the backend
    ///
    /// Malformed persisted state is an explicit error. A dangling
    /// `active_chat_id` is repaired to `None`.
    pub fn load(storage: Arc<dyn StateStorage>) -> crate::Result<Self> {
        let mut state = match storage.get(CHATS_KEY)? {
            Some(raw) => serde_json::from_str::<SessionState>(&raw)?,
            None => SessionState::default(),
        };

        if let Some(id) = &state.active_chat_id {
            if !state.chats.iter().any(|c| &c.id == id) {
                warn!("Active chat {} not found in persisted state, clearing", id);
                state.active_chat_id = None;
            }
        }

        Ok(Self {
            state,
            storage,
            titler: Box::new(KeywordTitler),
            pending: HashSet::new(),
        })
    }

    /// Persist the full state to the backend
    pub fn save(&self) -> crate::Result<()> {
        let raw = serde_json::to_string(&self.state)?;
        self.storage.put(CHATS_KEY, &raw)
    }

    /// All chats, in insertion order
    pub fn chats(&self) -> &[Chat] {
        &self.state.chats
    }

    /// Id of the active chat, if any
    pub fn active_chat_id(&self) -> Option<&str> {
        self.state.active_chat_id.as_deref()
    }

    /// The active chat, if any
    pub fn active_chat(&self) -> Option<&Chat> {
        let id = self.state.active_chat_id.as_deref()?;
        self.state.chats.iter().find(|c| c.id == id)
    }

    /// Message sequence of the active chat (empty if none is active)
    pub fn active_messages(&self) -> &[ChatMessage] {
        self.active_chat().map(|c| c.messages.as_slice()).unwrap_or(&[])
    }

    /// Create a fresh empty chat and make it active
    pub fn new_chat(&mut self) -> crate::Result<String> {
        let chat = Chat::new();
        let id = chat.id.clone();
        self.state.chats.push(chat);
        self.state.active_chat_id = Some(id.clone());
        self.save()?;
        debug!("Created chat {}", id);
        Ok(id)
    }

    /// Make the chat with `id` active
    ///
    /// Unknown ids are a no-op: the active chat and its displayed
    /// messages are left unchanged and `false` is returned.
    pub fn switch_chat(&mut self, id: &str) -> crate::Result<bool> {
        if !self.state.chats.iter().any(|c| c.id == id) {
            debug!("Ignoring switch to unknown chat {}", id);
            return Ok(false);
        }
        self.state.active_chat_id = Some(id.to_string());
        self.save()?;
        Ok(true)
    }

    /// Begin a submission: append the user message and mark the chat pending
    ///
    /// Creates and activates a chat if none is active. The chat title is
    /// assigned here if this is the chat's first message. Fails with
    /// [`crate::Error::SubmissionPending`] if the chat already has an
    /// outstanding submission.
    pub fn begin_submission(&mut self, text: &str) -> crate::Result<SubmissionTicket> {
        let text = text.trim();
        if text.is_empty() {
            return Err(crate::Error::Session("empty submission".to_string()));
        }

        let active_id = match &self.state.active_chat_id {
            Some(id) => id.clone(),
            None => {
                let chat = Chat::new();
                let id = chat.id.clone();
                self.state.chats.push(chat);
                self.state.active_chat_id = Some(id.clone());
                id
            }
        };

        if self.pending.contains(&active_id) {
            return Err(crate::Error::SubmissionPending(active_id));
        }

        let title = self.titler.title_for(text);
        let chat = self
            .state
            .chats
            .iter_mut()
            .find(|c| c.id == active_id)
            .ok_or_else(|| crate::Error::Session("active chat missing".to_string()))?;

        // Title assignment is first-submission-only.
        if chat.messages.is_empty() {
            chat.title = title;
        }
        chat.push(ChatMessage::user(text));

        // Mark pending only once the save has succeeded: a failed save
        // returns no ticket, so nothing would ever clear the mark.
        self.save()?;
        self.pending.insert(active_id.clone());

        Ok(SubmissionTicket { chat_id: active_id })
    }

    /// Complete a submission with the relay outcome
    ///
    /// On success the assistant reply is appended; on failure the fixed
    /// fallback bubble is appended instead. The relay error itself never
    /// propagates to the caller.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: crate::Result<String>,
    ) -> crate::Result<()> {
        self.pending.remove(&ticket.chat_id);

        let reply = match outcome {
            Ok(content) => content,
            Err(e) => {
                warn!("Relay call failed for chat {}: {}", ticket.chat_id, e);
                FALLBACK_REPLY.to_string()
            }
        };

        let chat = self
            .state
            .chats
            .iter_mut()
            .find(|c| c.id == ticket.chat_id)
            .ok_or_else(|| crate::Error::NotFound(ticket.chat_id.clone()))?;
        chat.push(ChatMessage::assistant(reply));
        self.save()
    }

    /// Submit a message: one relay round trip, then record the outcome
    pub async fn submit(
        &mut self,
        transport: &dyn ChatTransport,
        text: &str,
    ) -> crate::Result<()> {
        let ticket = self.begin_submission(text)?;
        let outcome = transport.send(text).await;
        self.complete_submission(ticket, outcome)
    }

    /// Read the persisted theme preference
    pub fn theme(&self) -> crate::Result<Option<String>> {
        self.storage.get(THEME_KEY)
    }

    /// Persist the theme preference
    pub fn set_theme(&self, theme: &str) -> crate::Result<()> {
        self.storage.put(THEME_KEY, theme)
    }
}
