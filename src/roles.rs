use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub background: &'static str,
    pub color: &'static str,
}

/// Everything that differs by role, in one place.
pub struct RoleTable {
    pub nav: &'static [NavItem],
    pub dashboard: &'static str,
    pub badge: Badge,
    /// Pages reachable without a nav entry.
    pub extra_pages: &'static [&'static str],
}

const fn item(id: &'static str, label: &'static str) -> NavItem {
    NavItem { id, label }
}

static STUDENT: RoleTable = RoleTable {
    nav: &[
        item("dashboard", "Dashboard"),
        item("courses", "Courses"),
        item("problems", "Problems"),
        item("attendance", "Attendance"),
        item("messages", "Q&A"),
        item("leaderboard", "Leaderboard"),
    ],
    dashboard: "studentDashboard",
    badge: Badge {
        background: "rgba(16, 185, 129, 0.1)",
        color: "var(--color-accent)",
    },
    extra_pages: &["profile", "editor"],
};

static FACULTY: RoleTable = RoleTable {
    nav: &[
        item("dashboard", "Dashboard"),
        item("courses", "Courses"),
        item("batches", "Batches"),
        item("grading", "Grading Queue"),
        item("messages", "Q&A"),
    ],
    dashboard: "facultyDashboard",
    badge: Badge {
        background: "rgba(20, 184, 166, 0.1)",
        color: "var(--color-secondary)",
    },
    extra_pages: &["profile"],
};

static ADMIN: RoleTable = RoleTable {
    nav: &[
        item("dashboard", "Dashboard"),
        item("courses", "Courses"),
        item("users", "Users"),
        item("batches", "Batches"),
        item("analytics", "Analytics"),
    ],
    dashboard: "adminDashboard",
    badge: Badge {
        background: "rgba(124, 58, 237, 0.1)",
        color: "var(--color-primary)",
    },
    extra_pages: &["profile"],
};

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    pub fn table(self) -> &'static RoleTable {
        match self {
            Role::Student => &STUDENT,
            Role::Faculty => &FACULTY,
            Role::Admin => &ADMIN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Guesses a role from a sign-in email. Checked in admin, faculty,
    /// student order so `admin.student@...` is an admin.
    pub fn infer_from_email(email: &str) -> Option<Role> {
        if email.contains("admin") {
            Some(Role::Admin)
        } else if email.contains("faculty") || email.contains("trainer") {
            Some(Role::Faculty)
        } else if email.contains("student") {
            Some(Role::Student)
        } else {
            None
        }
    }

    pub fn nav_items(self) -> &'static [NavItem] {
        self.table().nav
    }

    pub fn dashboard_view(self) -> &'static str {
        self.table().dashboard
    }

    pub fn badge(self) -> Badge {
        self.table().badge
    }

    pub fn can_view(self, page: &str) -> bool {
        let t = self.table();
        t.nav.iter().any(|i| i.id == page) || t.extra_pages.contains(&page)
    }

    pub fn can_manage_batches(self) -> bool {
        self.can_view("batches")
    }
}
