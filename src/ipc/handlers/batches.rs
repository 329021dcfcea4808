use crate::batches::{BatchDetails, UploadMethod};
use crate::ipc::helpers::{get_opt_str, get_required_str, get_required_text, require_user, respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use anyhow::Context;
use serde_json::{json, Value};

fn require_batch_role(state: &AppState) -> Result<(), HandlerErr> {
    let role = require_user(state)?.role;
    if !role.can_manage_batches() {
        return Err(HandlerErr::new(
            "forbidden",
            format!("{} accounts cannot manage batches", role.as_str()),
        ));
    }
    Ok(())
}

fn draft_json(state: &AppState) -> Value {
    json!({ "draft": state.draft })
}

fn get(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    Ok(draft_json(state))
}

fn set_upload_method(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    let raw = get_required_str(&req.params, "method")?;
    let method = UploadMethod::parse(&raw)
        .ok_or_else(|| HandlerErr::new("bad_params", format!("unknown upload method: {}", raw)))?;
    state.draft.set_upload_method(method);
    Ok(draft_json(state))
}

enum Source {
    /// Content the UI already read.
    Text(String),
    /// File the sidecar reads itself.
    Path(String),
}

fn stage_csv(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    let file_name = get_required_text(&req.params, "fileName")?;
    let text = req
        .params
        .get("text")
        .and_then(|v| v.as_str())
        .map(str::to_string);
    let source = match (text, get_opt_str(&req.params, "path")) {
        (Some(t), _) => Source::Text(t),
        (None, Some(p)) => Source::Path(p),
        (None, None) => {
            return Err(HandlerErr::new("bad_params", "missing params.path or params.text"))
        }
    };

    let message = state.draft.stage_csv(file_name, move || match source {
        Source::Text(t) => Ok(t),
        Source::Path(p) => {
            std::fs::read_to_string(&p).with_context(|| format!("failed to read {}", p))
        }
    })?;

    let mut out = draft_json(state);
    out["message"] = json!(message);
    Ok(out)
}

fn clear_csv(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    state.draft.clear_csv();
    Ok(draft_json(state))
}

fn remove_student(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    let student_id = get_required_str(&req.params, "studentId")?;
    state.draft.remove_student(&student_id)?;
    Ok(draft_json(state))
}

fn create(state: &mut AppState, req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    let details = BatchDetails {
        name: get_required_str(&req.params, "name")?,
        course_id: get_required_str(&req.params, "courseId")?,
        start_date: get_opt_str(&req.params, "startDate"),
        end_date: get_opt_str(&req.params, "endDate"),
        schedule: get_opt_str(&req.params, "schedule"),
    };
    let (batch, message) = state.draft.create(&state.catalog, details)?;
    let out = json!({ "batch": batch, "message": message });
    state.batches.push(batch);
    Ok(out)
}

fn list(state: &mut AppState, _req: &Request) -> Result<Value, HandlerErr> {
    require_batch_role(state)?;
    Ok(json!({ "batches": state.batches }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "batches.draft.get" => Some(respond(state, req, get)),
        "batches.draft.setUploadMethod" => Some(respond(state, req, set_upload_method)),
        "batches.draft.stageCsv" => Some(respond(state, req, stage_csv)),
        "batches.draft.clearCsv" => Some(respond(state, req, clear_csv)),
        "batches.draft.removeStudent" => Some(respond(state, req, remove_student)),
        "batches.create" => Some(respond(state, req, create)),
        "batches.list" => Some(respond(state, req, list)),
        _ => None,
    }
}
