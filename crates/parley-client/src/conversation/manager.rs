//! Conversation struct, transcript and draft handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parley_common::{ConversationId, Event, EventBus};
use tokio::sync::RwLock;

use crate::session_store::{SessionStore, SessionToken};
use crate::{ChatBackend, Message, SearchMode};

use super::types::ConversationState;

/// A chat view's transcript plus the machinery to extend it.
pub struct Conversation {
    pub(super) id: ConversationId,
    pub(super) backend: Arc<dyn ChatBackend>,
    /// Token source for queries. `None` sends queries anonymously.
    pub(super) session: Option<SessionStore>,
    pub(super) attach_token: bool,
    pub(super) mode: SearchMode,
    /// Append-only, in conversation order.
    transcript: RwLock<Vec<Message>>,
    /// Text the user is composing.
    draft: RwLock<String>,
    /// Number of query round trips currently outstanding.
    pub(super) in_flight: AtomicUsize,
    events: Option<Arc<EventBus>>,
}

impl Conversation {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            id: ConversationId::new(),
            backend,
            session: None,
            attach_token: true,
            mode: SearchMode::default(),
            transcript: RwLock::new(Vec::new()),
            draft: RwLock::new(String::new()),
            in_flight: AtomicUsize::new(0),
            events: None,
        }
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_attach_token(mut self, attach: bool) -> Self {
        self.attach_token = attach;
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_event_bus(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn state(&self) -> ConversationState {
        if self.in_flight() == 0 {
            ConversationState::Idle
        } else {
            ConversationState::Submitting
        }
    }

    /// Number of queries still waiting on the service.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the transcript.
    pub async fn messages(&self) -> Vec<Message> {
        self.transcript.read().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.transcript.read().await.len()
    }

    pub async fn draft(&self) -> String {
        self.draft.read().await.clone()
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        *self.draft.write().await = text.into();
    }

    /// Events are published under the write lock, so subscribers see them
    /// in transcript order.
    pub(super) async fn append(&self, message: Message) {
        let event = Event::MessageAppended {
            sender: message.sender.to_string(),
            text: message.text.clone(),
        };
        let mut transcript = self.transcript.write().await;
        transcript.push(message);
        self.publish(event);
    }

    /// Clear the draft if it still holds `submitted`. Returns true if it
    /// was cleared.
    pub(super) async fn clear_draft_if(&self, submitted: &str) -> bool {
        let mut draft = self.draft.write().await;
        if *draft != submitted {
            return false;
        }
        draft.clear();
        self.publish(Event::DraftCleared);
        true
    }

    /// The token to send with a query, if any.
    pub(super) async fn query_token(&self) -> Option<SessionToken> {
        if !self.attach_token {
            return None;
        }
        match self.session {
            Some(ref store) => store.get().await,
            None => None,
        }
    }

    fn publish(&self, event: Event) {
        if let Some(ref bus) = self.events {
            bus.publish(event);
        }
    }
}
