use crate::batches::BatchError;
use crate::catalog::User;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::navigation::NavError;
use crate::roster::RosterError;
use crate::session::SessionError;
use crate::threads::ThreadError;
use serde_json::{json, Value};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn response(self, id: &str) -> Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing params.{}", key)))
}

/// Like `get_required_str` but keeps the value untrimmed; empty text is valid.
pub fn get_required_text<'a>(params: &'a Value, key: &str) -> Result<&'a str, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing params.{}", key)))
}

pub fn get_opt_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn require_user(state: &AppState) -> Result<&User, HandlerErr> {
    state
        .session
        .current_user()
        .ok_or_else(|| HandlerErr::new("not_signed_in", "sign in first"))
}

/// Runs a fallible handler and wraps the outcome in the response envelope.
pub fn respond(
    state: &mut AppState,
    req: &Request,
    f: fn(&mut AppState, &Request) -> Result<Value, HandlerErr>,
) -> Value {
    match f(state, req) {
        Ok(v) => ok(&req.id, v),
        Err(e) => {
            tracing::warn!(code = e.code, message = %e.message, "request rejected");
            e.response(&req.id)
        }
    }
}

impl From<RosterError> for HandlerErr {
    fn from(e: RosterError) -> Self {
        HandlerErr::new(e.code(), e.to_string())
    }
}

impl From<SessionError> for HandlerErr {
    fn from(e: SessionError) -> Self {
        let message = match &e {
            SessionError::Storage(inner) => format!("{inner:?}"),
            other => other.to_string(),
        };
        HandlerErr::new(e.code(), message)
    }
}

impl From<NavError> for HandlerErr {
    fn from(e: NavError) -> Self {
        HandlerErr::new(e.code(), e.to_string())
    }
}

impl From<ThreadError> for HandlerErr {
    fn from(e: ThreadError) -> Self {
        HandlerErr::new(e.code(), e.to_string())
    }
}

impl From<BatchError> for HandlerErr {
    fn from(e: BatchError) -> Self {
        let err = HandlerErr::new(e.code(), e.to_string());
        match &e {
            BatchError::ReadFailed(cause) => err.with_details(json!({ "cause": format!("{cause:#}") })),
            _ => err,
        }
    }
}
