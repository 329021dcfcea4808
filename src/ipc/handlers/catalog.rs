use crate::ipc::helpers::{require_user, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::{json, Value};

fn courses(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_user(state)?;
    Ok(json!({ "courses": state.catalog.courses }))
}

fn problems(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_user(state)?;
    Ok(json!({ "problems": state.catalog.problems }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "courses.list" => Some(respond(state, req, courses)),
        "problems.list" => Some(respond(state, req, problems)),
        _ => None,
    }
}
