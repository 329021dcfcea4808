mod test_support;

use serde_json::json;
use test_support::spawn_sidecar;

#[test]
fn health_and_protocol_errors() {
    let mut sidecar = spawn_sidecar();

    let health = sidecar.request_ok("1", "health", json!({}));
    assert_eq!(
        health.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert_eq!(health.get("signedIn").and_then(|v| v.as_bool()), Some(false));
    assert!(health.get("workspacePath").expect("workspacePath").is_null());

    let bad = sidecar.send_line("{not json");
    assert_eq!(bad.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        bad.get("error").and_then(|e| e.get("code")).and_then(|v| v.as_str()),
        Some("bad_json")
    );

    assert_eq!(
        sidecar.request_err("2", "grades.export", json!({})),
        "not_implemented"
    );
}

#[test]
fn signed_in_methods_are_guarded() {
    let mut sidecar = spawn_sidecar();
    for (i, method) in [
        "nav.items",
        "nav.current",
        "courses.list",
        "problems.list",
        "threads.list",
        "batches.draft.get",
        "batches.list",
    ]
    .iter()
    .enumerate()
    {
        let id = format!("g{}", i);
        assert_eq!(
            sidecar.request_err(&id, method, json!({})),
            "not_signed_in",
            "{} should need a user",
            method
        );
    }
    // Parsing needs no session.
    let _ = sidecar.request_ok("p", "roster.parse", json!({ "text": "name,email\nA,a@x\n" }));
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let mut sidecar = spawn_sidecar();

    let _ = sidecar.request_ok("1", "session.login", json!({ "email": "admin@codify.dev", "password": "pw" }));
    let _ = sidecar.request_ok("2", "nav.items", json!({}));
    let _ = sidecar.request_ok("3", "nav.navigate", json!({ "page": "users" }));
    let _ = sidecar.request_ok("4", "courses.list", json!({}));
    let _ = sidecar.request_ok("5", "problems.list", json!({}));
    let _ = sidecar.request_ok("6", "threads.list", json!({}));
    let _ = sidecar.request_ok("7", "threads.get", json!({ "threadId": 1 }));
    let _ = sidecar.request_ok("8", "batches.draft.get", json!({}));
    let _ = sidecar.request_ok("9", "batches.list", json!({}));
    let _ = sidecar.request_ok("10", "roster.parse", json!({ "text": "name,email\nA,a@x\n" }));
    let _ = sidecar.request_ok("11", "session.logout", json!({}));
    let _ = sidecar.request_ok("12", "session.get", json!({}));
}
