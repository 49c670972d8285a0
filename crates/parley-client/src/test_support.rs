//! Scripted `ChatBackend` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    ApiError, ChatBackend, LoginRequest, QueryRequest, QueryResponse, SearchMode, SessionToken,
    SignupRequest, SignupResponse, TokenResponse, UserProfile,
};

type QueryResult = Result<QueryResponse, ApiError>;

enum SearchReply {
    Ready(QueryResult),
    Gated(oneshot::Receiver<QueryResult>),
}

/// A call the fake received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Signup {
        username: String,
        email: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
    Search {
        query: String,
        mode: SearchMode,
        token: Option<String>,
    },
    CurrentUser {
        token: String,
    },
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    signup: Mutex<VecDeque<Result<SignupResponse, ApiError>>>,
    login: Mutex<VecDeque<Result<TokenResponse, ApiError>>>,
    search: Mutex<VecDeque<SearchReply>>,
    me: Mutex<VecDeque<Result<UserProfile, ApiError>>>,
    calls: Mutex<Vec<Call>>,
}

pub(crate) fn status(code: u16) -> ApiError {
    ApiError::Status {
        status: code,
        body: String::new(),
    }
}

pub(crate) fn token_response(token: &str) -> TokenResponse {
    TokenResponse {
        access_token: token.into(),
        token_type: Some("bearer".into()),
    }
}

pub(crate) fn answer(text: &str) -> QueryResponse {
    QueryResponse {
        response: text.into(),
    }
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_signup(&self, reply: Result<SignupResponse, ApiError>) {
        self.signup.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_login(&self, reply: Result<TokenResponse, ApiError>) {
        self.login.lock().unwrap().push_back(reply);
    }

    pub(crate) fn push_search(&self, reply: QueryResult) {
        self.search
            .lock()
            .unwrap()
            .push_back(SearchReply::Ready(reply));
    }

    /// Queue a search reply that only resolves when the returned sender fires.
    pub(crate) fn push_gated_search(&self) -> oneshot::Sender<QueryResult> {
        let (tx, rx) = oneshot::channel();
        self.search
            .lock()
            .unwrap()
            .push_back(SearchReply::Gated(rx));
        tx
    }

    pub(crate) fn push_current_user(&self, reply: Result<UserProfile, ApiError>) {
        self.me.lock().unwrap().push_back(reply);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn search_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Search { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted() -> ApiError {
    ApiError::NetworkError("no scripted reply".into())
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.record(Call::Signup {
            username: request.username.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
        });
        self.signup
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.record(Call::Login {
            username: request.username.clone(),
            password: request.password.clone(),
        });
        self.login
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn search(
        &self,
        request: &QueryRequest,
        mode: SearchMode,
        token: Option<&SessionToken>,
    ) -> Result<QueryResponse, ApiError> {
        self.record(Call::Search {
            query: request.query.clone(),
            mode,
            token: token.map(|t| t.as_str().to_string()),
        });
        let reply = self.search.lock().unwrap().pop_front();
        match reply {
            Some(SearchReply::Ready(result)) => result,
            Some(SearchReply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::NetworkError("gate dropped".into()))),
            None => Err(unscripted()),
        }
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        self.record(Call::CurrentUser {
            token: token.as_str().to_string(),
        });
        self.me
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}
