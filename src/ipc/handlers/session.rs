use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::roles::Role;
use serde_json::{json, Value};

fn handle_get(state: &mut AppState, req: &Request) -> Value {
    ok(&req.id, json!({ "user": state.session.current_user() }))
}

fn login(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let email = get_required_str(&req.params, "email")?;
    let password = req
        .params
        .get("password")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let user = state
        .session
        .login(state.db.as_ref(), &state.catalog.users, &email, password)?
        .clone();
    state.after_session_change();
    Ok(json!({ "user": user }))
}

fn logout(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    state.session.logout(state.db.as_ref())?;
    state.after_session_change();
    Ok(json!({}))
}

fn set_role(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let raw = get_required_str(&req.params, "role")?;
    let role = Role::parse(&raw)
        .ok_or_else(|| HandlerErr::new("bad_params", format!("unknown role: {}", raw)))?;
    let user = state
        .session
        .set_role(state.db.as_ref(), &state.catalog.users, role)?
        .clone();
    state.after_session_change();
    Ok(json!({ "user": user }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "session.get" => Some(handle_get(state, req)),
        "session.login" => Some(respond(state, req, login)),
        "session.logout" => Some(respond(state, req, logout)),
        "session.setRole" => Some(respond(state, req, set_role)),
        _ => None,
    }
}
