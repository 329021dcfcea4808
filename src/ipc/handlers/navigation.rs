use crate::batches::BatchDraft;
use crate::ipc::helpers::{get_opt_str, get_required_str, require_user, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::navigation::Page;
use serde_json::{json, Value};

fn nav_state(state: &AppState) -> Result<Value, HandlerErr> {
    let role = require_user(state)?.role;
    Ok(json!({
        "page": state.nav.page,
        "view": state.nav.view(role),
        "problemId": state.nav.selected_problem,
    }))
}

fn items(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    let role = require_user(state)?.role;
    Ok(json!({
        "role": role,
        "badge": role.badge(),
        "items": role.nav_items(),
    }))
}

fn current(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    nav_state(state)
}

fn navigate(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    let role = require_user(state)?.role;
    let page = get_required_str(&req.params, "page")?;
    let problem_id = get_opt_str(&req.params, "problemId");
    if let Some(id) = problem_id.as_deref() {
        // Roles without the editor get page_not_available from navigate.
        if page == "problem" && role.can_view("editor") && state.catalog.problem(id).is_none() {
            return Err(HandlerErr::new("unknown_problem", format!("unknown problem: {}", id)));
        }
    }
    let was_on_batches = state.nav.page == Page::Batches;
    state.nav.navigate(role, &page, problem_id.as_deref())?;
    if was_on_batches && state.nav.page != Page::Batches {
        state.draft = BatchDraft::default();
    }
    nav_state(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "nav.items" => Some(respond(state, req, items)),
        "nav.current" => Some(respond(state, req, current)),
        "nav.navigate" => Some(respond(state, req, navigate)),
        _ => None,
    }
}
