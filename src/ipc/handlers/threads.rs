use crate::ipc::helpers::{get_required_str, require_user, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn get_thread_id(params: &Value) -> Result<u32, HandlerErr> {
    params
        .get("threadId")
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| HandlerErr::new("bad_params", "missing params.threadId"))
}

fn list(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_user(state)?;
    Ok(json!({ "threads": state.threads.summaries() }))
}

fn get(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let viewer = require_user(state)?;
    let id = get_thread_id(&req.params)?;
    let thread = state.threads.get(id)?;
    let messages = state.threads.messages_for(id, viewer)?;
    Ok(json!({
        "id": thread.id,
        "title": thread.title,
        "student": thread.student,
        "faculty": thread.faculty,
        "status": thread.status,
        "messages": messages,
    }))
}

fn reply(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let author = require_user(state)?.clone();
    let id = get_thread_id(&req.params)?;
    let content = get_required_str(&req.params, "content")?;
    let message = state.threads.reply(id, &author, &content)?;
    Ok(json!({ "message": message }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "threads.list" => Some(respond(state, req, list)),
        "threads.get" => Some(respond(state, req, get)),
        "threads.reply" => Some(respond(state, req, reply)),
        _ => None,
    }
}
