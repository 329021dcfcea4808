use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Workspace opened at startup, as if the UI had sent `workspace.select`.
    pub workspace: Option<PathBuf>,
    pub log_level: String,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("log_level", "info")?
        .add_source(config::Environment::with_prefix("CODIFYD"))
        .build()?
        .try_deserialize::<Settings>()
}
