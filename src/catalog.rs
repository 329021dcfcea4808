use crate::roles::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: Level,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub difficulty: String,
}

/// Fixed demo data. Order matters: sign-in picks the first matching user.
pub struct Catalog {
    pub users: Vec<User>,
    pub courses: Vec<Course>,
    pub problems: Vec<Problem>,
}

fn user(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
    }
}

fn course(id: &str, title: &str, description: &str, level: Level, tags: &[&str]) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        level,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn problem(id: &str, title: &str, difficulty: &str) -> Problem {
    Problem {
        id: id.to_string(),
        title: title.to_string(),
        difficulty: difficulty.to_string(),
    }
}

impl Catalog {
    pub fn demo() -> Self {
        Self {
            users: vec![
                user("u1", "Emma Wilson", "student@codify.dev", Role::Student),
                user("u2", "Dr. Sarah Johnson", "faculty@codify.dev", Role::Faculty),
                user("u3", "Alex Morgan", "admin@codify.dev", Role::Admin),
                user("u4", "Liam Martinez", "liam.student@codify.dev", Role::Student),
                user("u5", "Prof. Michael Roberts", "trainer@codify.dev", Role::Faculty),
                user("u6", "Olivia Taylor", "olivia.taylor@codify.dev", Role::Student),
            ],
            courses: vec![
                course(
                    "c1",
                    "Data Structures & Algorithms",
                    "Master arrays, trees, graphs and dynamic programming",
                    Level::Intermediate,
                    &["DSA", "Problem Solving"],
                ),
                course(
                    "c2",
                    "Full Stack Web Development",
                    "Build modern web applications end to end",
                    Level::Beginner,
                    &["Web", "JavaScript"],
                ),
                course(
                    "c3",
                    "System Design",
                    "Design scalable distributed systems",
                    Level::Advanced,
                    &["Architecture", "Scalability"],
                ),
            ],
            problems: vec![
                problem("p1", "Two Sum", "easy"),
                problem("p2", "Merge Intervals", "medium"),
                problem("p3", "Binary Tree Maximum Path Sum", "hard"),
            ],
        }
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }
}
