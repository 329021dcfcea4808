use codifyd::configuration::get_configuration;
use codifyd::ipc;
use codifyd::telemetry::{get_subscriber, init_subscriber};
use std::io::{self, BufRead, Write};

fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;
    // stdout carries responses; logs go to stderr.
    let subscriber = get_subscriber("codifyd".into(), configuration.log_level.clone(), io::stderr);
    init_subscriber(subscriber)?;

    let mut state = ipc::AppState::new();
    if let Some(path) = configuration.workspace.as_deref() {
        if let Err(e) = ipc::select_workspace(&mut state, path) {
            tracing::error!(error = ?e, "failed to open configured workspace");
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin closed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "unparseable request line");
                let _ = writeln!(
                    stdout,
                    "{}",
                    serde_json::json!({
                        "ok": false,
                        "error": { "code": "bad_json", "message": e.to_string() }
                    })
                );
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    Ok(())
}
