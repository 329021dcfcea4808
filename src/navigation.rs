use crate::roles::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Dashboard,
    Courses,
    Problems,
    Attendance,
    Messages,
    Leaderboard,
    Batches,
    Grading,
    Users,
    Analytics,
    Profile,
    Editor,
}

impl Page {
    const ALL: [Page; 12] = [
        Page::Dashboard,
        Page::Courses,
        Page::Problems,
        Page::Attendance,
        Page::Messages,
        Page::Leaderboard,
        Page::Batches,
        Page::Grading,
        Page::Users,
        Page::Analytics,
        Page::Profile,
        Page::Editor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Courses => "courses",
            Page::Problems => "problems",
            Page::Attendance => "attendance",
            Page::Messages => "messages",
            Page::Leaderboard => "leaderboard",
            Page::Batches => "batches",
            Page::Grading => "grading",
            Page::Users => "users",
            Page::Analytics => "analytics",
            Page::Profile => "profile",
            Page::Editor => "editor",
        }
    }

    pub fn parse(s: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error("page {page} is not available to {role}")]
    NotAvailable { page: &'static str, role: &'static str },
    #[error("opening a problem needs a problem id")]
    MissingProblem,
}

impl NavError {
    pub fn code(&self) -> &'static str {
        match self {
            NavError::UnknownPage(_) => "unknown_page",
            NavError::NotAvailable { .. } => "page_not_available",
            NavError::MissingProblem => "bad_params",
        }
    }
}

/// Where the signed-in user currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub page: Page,
    pub selected_problem: Option<String>,
    owner: Option<String>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            page: Page::Dashboard,
            selected_problem: None,
            owner: None,
        }
    }
}

impl NavState {
    /// Back to the dashboard whenever the signed-in user changes, including
    /// sign-out followed by sign-in. Returns true when a new user took over.
    pub fn sync_user(&mut self, user_id: Option<&str>) -> bool {
        if user_id.is_none() {
            self.owner = None;
            false
        } else if self.owner.as_deref() != user_id {
            *self = NavState {
                owner: user_id.map(str::to_string),
                ..NavState::default()
            };
            true
        } else {
            false
        }
    }

    /// `"problem"` with an id opens the editor on that problem; every other
    /// page clears the selection. The caller checks the id exists.
    pub fn navigate(
        &mut self,
        role: Role,
        page: &str,
        problem_id: Option<&str>,
    ) -> Result<(), NavError> {
        let (target, problem) = if page == "problem" {
            let id = problem_id.ok_or(NavError::MissingProblem)?;
            (Page::Editor, Some(id.to_string()))
        } else {
            let p = Page::parse(page).ok_or_else(|| NavError::UnknownPage(page.to_string()))?;
            (p, None)
        };
        if !role.can_view(target.as_str()) {
            return Err(NavError::NotAvailable {
                page: target.as_str(),
                role: role.as_str(),
            });
        }
        // The editor only makes sense with a problem open.
        if target == Page::Editor && problem.is_none() && self.selected_problem.is_none() {
            return Err(NavError::MissingProblem);
        }
        self.page = target;
        if target != Page::Editor {
            self.selected_problem = None;
        } else if problem.is_some() {
            self.selected_problem = problem;
        }
        Ok(())
    }

    /// Name of the view the UI should render.
    pub fn view(&self, role: Role) -> &'static str {
        match self.page {
            Page::Dashboard => role.dashboard_view(),
            Page::Editor => "codeEditor",
            p => p.as_str(),
        }
    }
}
