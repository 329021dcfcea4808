mod test_support;

use serde_json::json;
use test_support::spawn_sidecar;

#[test]
fn parses_plain_roster_in_order() {
    let mut sidecar = spawn_sidecar();
    let parsed = sidecar.request_ok(
        "1",
        "roster.parse",
        json!({ "text": "name,email\nAlice Smith,alice@example.com\nBob Lee,bob@example.com\n" }),
    );
    assert_eq!(
        parsed.get("records"),
        Some(&json!([
            { "name": "Alice Smith", "email": "alice@example.com", "sourceRow": 2 },
            { "name": "Bob Lee", "email": "bob@example.com", "sourceRow": 3 }
        ]))
    );
    assert_eq!(parsed.get("rowsTotal").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(parsed.get("dropped"), Some(&json!([])));
}

#[test]
fn header_only_and_missing_columns_fail_with_messages() {
    let mut sidecar = spawn_sidecar();

    let resp = sidecar.request("1", "roster.parse", json!({ "text": "name,email\n" }));
    let error = resp.get("error").expect("error");
    assert_eq!(error.get("code").and_then(|v| v.as_str()), Some("empty_or_invalid"));
    assert_eq!(
        error.get("message").and_then(|v| v.as_str()),
        Some("CSV file is empty or invalid")
    );

    assert_eq!(
        sidecar.request_err("2", "roster.parse", json!({ "text": "id,phone\n1,555-1234\n" })),
        "missing_required_columns"
    );
    assert_eq!(
        sidecar.request_err("3", "roster.parse", json!({})),
        "bad_params"
    );
}

#[test]
fn rows_with_missing_values_are_dropped_and_reported() {
    let mut sidecar = spawn_sidecar();
    let parsed = sidecar.request_ok(
        "1",
        "roster.parse",
        json!({ "text": "Full Name,Contact Email\nCarol,carol@x.com\n,missing@x.com\nDan,\n" }),
    );
    assert_eq!(
        parsed.get("records"),
        Some(&json!([{ "name": "Carol", "email": "carol@x.com", "sourceRow": 2 }]))
    );
    assert_eq!(parsed.get("dropped"), Some(&json!([3, 4])));
}

#[test]
fn same_text_parses_identically_twice() {
    let mut sidecar = spawn_sidecar();
    let text = "Student Name,Email Address\nXu,x@x.com\n\n Yi , y@y.com \n";
    let a = sidecar.request_ok("1", "roster.parse", json!({ "text": text }));
    let b = sidecar.request_ok("2", "roster.parse", json!({ "text": text }));
    assert_eq!(a, b);
}
