use crate::catalog::User;
use crate::db;
use crate::roles::Role;
use anyhow::Context;
use rusqlite::Connection;

/// Storage key holding the signed-in user.
pub const SESSION_KEY: &str = "codify_user";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no user matches {0}")]
    InvalidCredentials(String),
    #[error("no user has role {0}")]
    UnknownRole(&'static str),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials(_) => "invalid_credentials",
            SessionError::UnknownRole(_) => "unknown_role",
            SessionError::Storage(_) => "storage_failed",
        }
    }
}

/// The signed-in user. Owned by the sidecar state and passed to whatever
/// needs it. Methods that change the user take the workspace storage as
/// `conn`, which is `None` until a workspace is selected.
#[derive(Debug, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    /// Startup hook. A missing or unreadable stored user just means nobody is
    /// signed in.
    pub fn load(conn: &Connection) -> Self {
        let current_user = match db::settings_get_json(conn, SESSION_KEY) {
            Ok(Some(v)) => match serde_json::from_value::<User>(v) {
                Ok(u) => Some(u),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed stored user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = ?e, "failed to read stored user");
                None
            }
        };
        Self { current_user }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.id.as_str())
    }

    /// Any password is accepted; the email alone picks the user.
    #[tracing::instrument(name = "Signing in", skip(self, conn, users, _password))]
    pub fn login(
        &mut self,
        conn: Option<&Connection>,
        users: &[User],
        email: &str,
        _password: &str,
    ) -> Result<&User, SessionError> {
        let role = Role::infer_from_email(email);
        let user = users
            .iter()
            .find(|u| u.email == email || Some(u.role) == role)
            .ok_or_else(|| SessionError::InvalidCredentials(email.to_string()))?;
        self.replace(conn, user.clone())
    }

    #[tracing::instrument(name = "Switching role", skip(self, conn, users))]
    pub fn set_role(
        &mut self,
        conn: Option<&Connection>,
        users: &[User],
        role: Role,
    ) -> Result<&User, SessionError> {
        let user = users
            .iter()
            .find(|u| u.role == role)
            .ok_or(SessionError::UnknownRole(role.as_str()))?;
        self.replace(conn, user.clone())
    }

    /// Teardown hook: forgets the user here and in storage.
    pub fn logout(&mut self, conn: Option<&Connection>) -> Result<(), SessionError> {
        if let Some(conn) = conn {
            db::settings_delete(conn, SESSION_KEY).context("failed to clear stored user")?;
        }
        if let Some(u) = self.current_user.take() {
            tracing::info!(user_id = %u.id, "signed out");
        }
        Ok(())
    }

    fn replace(&mut self, conn: Option<&Connection>, user: User) -> Result<&User, SessionError> {
        if let Some(conn) = conn {
            let value = serde_json::to_value(&user).context("failed to serialize user")?;
            db::settings_set_json(conn, SESSION_KEY, &value).context("failed to store user")?;
        }
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "signed in");
        Ok(&*self.current_user.insert(user))
    }
}
