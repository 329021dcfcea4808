use crate::catalog::User;
use crate::roles::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Open,
    Answered,
    Closed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u32,
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone)]
pub struct Thread {
    pub id: u32,
    pub title: String,
    pub student: String,
    pub faculty: Option<String>,
    pub status: ThreadStatus,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary<'a> {
    pub id: u32,
    pub title: &'a str,
    pub student: &'a str,
    pub faculty: Option<&'a str>,
    pub status: ThreadStatus,
    pub last_message: Option<&'a str>,
    pub last_message_time: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView<'a> {
    #[serde(flatten)]
    pub message: &'a Message,
    pub is_me: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    #[error("unknown thread: {0}")]
    UnknownThread(u32),
    #[error("message is empty")]
    EmptyMessage,
}

impl ThreadError {
    pub fn code(&self) -> &'static str {
        match self {
            ThreadError::UnknownThread(_) => "unknown_thread",
            ThreadError::EmptyMessage => "bad_params",
        }
    }
}

fn msg(id: u32, sender: &str, content: &str, timestamp: &str) -> Message {
    Message {
        id,
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
    }
}

/// In-memory Q&A board. Replies live until the process exits.
#[derive(Debug, Clone)]
pub struct ThreadBoard {
    threads: Vec<Thread>,
}

impl ThreadBoard {
    pub fn demo() -> Self {
        let threads = vec![
            Thread {
                id: 1,
                title: "Help with Two-Pointer Approach".into(),
                student: "Emma Wilson".into(),
                faculty: Some("Dr. Sarah Johnson".into()),
                status: ThreadStatus::Answered,
                messages: vec![
                    msg(1, "Emma Wilson", "I'm having trouble understanding when to use the two-pointer approach vs hash map for array problems. Can you help?", "10:30 AM"),
                    msg(2, "Dr. Sarah Johnson", "Great question! Two-pointer is typically more efficient when you can sort the array or when you're looking for pairs. Hash maps are better when you need O(1) lookups and order doesn't matter.", "10:45 AM"),
                    msg(3, "Emma Wilson", "Thanks! That clarifies it perfectly.", "11:00 AM"),
                ],
            },
            Thread {
                id: 2,
                title: "Clarification on Merge Sort Time Complexity".into(),
                student: "Liam Martinez".into(),
                faculty: None,
                status: ThreadStatus::Open,
                messages: vec![msg(1, "Liam Martinez", "Can someone explain why merge sort is O(n log n)? I understand the merging is O(n), but where does the log n come from?", "11:45 AM")],
            },
            Thread {
                id: 3,
                title: "Binary Search Tree Implementation Question".into(),
                student: "Olivia Taylor".into(),
                faculty: Some("Prof. Michael Roberts".into()),
                status: ThreadStatus::Answered,
                messages: vec![
                    msg(1, "Olivia Taylor", "Should I use recursion or iteration for BST insertion?", "Yesterday 3:20 PM"),
                    msg(2, "Prof. Michael Roberts", "Both approaches work! Recursion is cleaner and easier to understand, but iteration uses less memory. For learning, start with recursion.", "Yesterday 3:35 PM"),
                    msg(3, "Olivia Taylor", "Perfect, I'll try that approach.", "Yesterday 3:40 PM"),
                ],
            },
        ];
        Self { threads }
    }

    pub fn summaries(&self) -> Vec<ThreadSummary<'_>> {
        self.threads
            .iter()
            .map(|t| {
                let last = t.messages.last();
                ThreadSummary {
                    id: t.id,
                    title: &t.title,
                    student: &t.student,
                    faculty: t.faculty.as_deref(),
                    status: t.status,
                    last_message: last.map(|m| m.content.as_str()),
                    last_message_time: last.map(|m| m.timestamp.as_str()),
                }
            })
            .collect()
    }

    pub fn get(&self, id: u32) -> Result<&Thread, ThreadError> {
        self.threads
            .iter()
            .find(|t| t.id == id)
            .ok_or(ThreadError::UnknownThread(id))
    }

    /// Messages of a thread as seen by `viewer`.
    pub fn messages_for<'a>(&'a self, id: u32, viewer: &User) -> Result<Vec<MessageView<'a>>, ThreadError> {
        let thread = self.get(id)?;
        Ok(thread
            .messages
            .iter()
            .map(|m| MessageView {
                message: m,
                is_me: m.sender == viewer.name,
            })
            .collect())
    }

    /// Appends a reply from `author`. A faculty reply answers an open thread.
    pub fn reply(&mut self, id: u32, author: &User, content: &str) -> Result<&Message, ThreadError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ThreadError::EmptyMessage);
        }
        let thread = self
            .threads
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ThreadError::UnknownThread(id))?;

        if author.role == Role::Faculty && thread.status == ThreadStatus::Open {
            thread.status = ThreadStatus::Answered;
            thread.faculty = Some(author.name.clone());
        }
        let next_id = thread.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        thread.messages.push(Message {
            id: next_id,
            sender: author.name.clone(),
            content: content.to_string(),
            timestamp: chrono::Local::now().format("%-I:%M %p").to_string(),
        });
        tracing::info!(thread_id = id, message_id = next_id, "reply posted");
        Ok(&thread.messages[thread.messages.len() - 1])
    }
}
