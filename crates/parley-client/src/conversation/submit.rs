//! The query round trip.

use parley_common::new_correlation_id;
use tracing::{debug, debug_span, warn, Instrument};

use crate::{Message, QueryRequest};

use super::manager::Conversation;
use super::types::{InFlightGuard, FALLBACK_REPLY};

impl Conversation {
    /// Submit one line of user input.
    ///
    /// Blank input (empty after trimming) is ignored: nothing is appended
    /// and no request is made, so `None` is returned. Otherwise the user
    /// message is appended before the request goes out, and the agent
    /// message appended afterwards is returned. The draft is cleared only
    /// if it holds exactly `text`; anything else the user is composing is
    /// left alone.
    ///
    /// Submissions may overlap. Each appends its own user and agent
    /// messages, but agent replies land in the order the service answers,
    /// not the order they were asked. The future should be driven to
    /// completion; dropping it early leaves the user message unanswered.
    pub async fn submit(&self, text: impl Into<String>) -> Option<Message> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!(conversation = %self.id, "ignoring blank submission");
            return None;
        }

        let _guard = InFlightGuard::enter(&self.in_flight);
        let cid = new_correlation_id();

        self.append(Message::user(text.clone())).await;
        self.clear_draft_if(&text).await;

        let token = self.query_token().await;
        debug!(
            conversation = %self.id,
            cid = %cid,
            mode = self.mode.as_str(),
            authenticated = token.is_some(),
            "query"
        );

        let request = QueryRequest { query: text };
        let reply = match self
            .backend
            .search(&request, self.mode, token.as_ref())
            .instrument(debug_span!("request", %cid))
            .await
        {
            Ok(response) => Message::agent(response.response),
            Err(e) => {
                warn!(conversation = %self.id, cid = %cid, error = %e, "query failed");
                Message::agent(FALLBACK_REPLY)
            }
        };

        self.append(reply.clone()).await;
        Some(reply)
    }

    /// Submit whatever is in the draft buffer.
    pub async fn submit_draft(&self) -> Option<Message> {
        let text = self.draft().await;
        self.submit(text).await
    }
}
