use crate::ipc::helpers::{get_required_text, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::roster;
use serde_json::{json, Value};

/// Parses inline text without touching the batch draft.
fn parse(_state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let text = get_required_text(&req.params, "text")?;
    let report = roster::parse_report(text)?;
    Ok(json!(report))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "roster.parse" => Some(respond(state, req, parse)),
        _ => None,
    }
}
