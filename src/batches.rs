use crate::catalog::Catalog;
use crate::roster::{self, RosterError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMethod {
    Manual,
    Csv,
}

impl UploadMethod {
    pub fn parse(s: &str) -> Option<UploadMethod> {
        match s {
            "manual" => Some(UploadMethod::Manual),
            "csv" => Some(UploadMethod::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStudent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub source_row: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Please upload a valid CSV file")]
    InvalidFileType,
    #[error("Error reading CSV file")]
    ReadFailed(#[source] anyhow::Error),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("batch name is required")]
    MissingName,
    #[error("unknown course: {0}")]
    UnknownCourse(String),
    #[error("no staged student with id {0}")]
    UnknownStudent(String),
}

impl BatchError {
    pub fn code(&self) -> &'static str {
        match self {
            BatchError::InvalidFileType => "invalid_file_type",
            BatchError::ReadFailed(_) => "read_failed",
            BatchError::Roster(e) => e.code(),
            BatchError::MissingName => "bad_params",
            BatchError::UnknownCourse(_) => "unknown_course",
            BatchError::UnknownStudent(_) => "unknown_student",
        }
    }
}

/// State of the "Create Batch" dialog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDraft {
    pub upload_method: UploadMethod,
    pub csv_file: Option<String>,
    pub students: Vec<DraftStudent>,
    /// Source lines skipped by the last staged file for a missing name or email.
    pub dropped_rows: Vec<usize>,
}

impl Default for BatchDraft {
    fn default() -> Self {
        Self {
            upload_method: UploadMethod::Manual,
            csv_file: None,
            students: Vec::new(),
            dropped_rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchDetails {
    pub name: String,
    pub course_id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub id: Uuid,
    pub name: String,
    pub course_id: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub schedule: Option<String>,
    pub students: Vec<DraftStudent>,
    pub created_at: DateTime<Utc>,
}

impl BatchDraft {
    pub fn set_upload_method(&mut self, method: UploadMethod) {
        self.upload_method = method;
    }

    /// Stages a roster file. `read` produces the file text and only runs once
    /// the name passes the suffix check. On any error the previous file and
    /// students stay as they were.
    #[tracing::instrument(name = "Staging roster file", skip(self, read))]
    pub fn stage_csv<F>(&mut self, file_name: &str, read: F) -> Result<String, BatchError>
    where
        F: FnOnce() -> anyhow::Result<String>,
    {
        if !roster::is_csv_file_name(file_name) {
            return Err(BatchError::InvalidFileType);
        }
        let text = read().map_err(BatchError::ReadFailed)?;
        let report = roster::parse_report(&text)?;

        // Ids number the non-blank data rows, dropped ones included.
        let data_rows = data_row_lines(&text);
        self.csv_file = Some(file_name.to_string());
        self.students = report
            .records
            .into_iter()
            .map(|r| DraftStudent {
                id: format!(
                    "csv-{}",
                    data_rows.partition_point(|line| *line < r.source_row)
                ),
                name: r.name,
                email: r.email,
                source_row: r.source_row,
            })
            .collect();
        self.dropped_rows = report.dropped;

        if !self.dropped_rows.is_empty() {
            tracing::warn!(dropped = self.dropped_rows.len(), "roster rows missing name or email");
        }
        tracing::info!(students = self.students.len(), "roster staged");
        Ok(format!("{} students loaded from CSV", self.students.len()))
    }

    pub fn clear_csv(&mut self) {
        self.csv_file = None;
        self.students.clear();
        self.dropped_rows.clear();
    }

    pub fn remove_student(&mut self, id: &str) -> Result<(), BatchError> {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        if self.students.len() == before {
            return Err(BatchError::UnknownStudent(id.to_string()));
        }
        Ok(())
    }

    /// Submits the dialog. Staged students are only attached when the CSV
    /// method is selected. The draft is reset afterwards.
    #[tracing::instrument(name = "Creating batch", skip(self, catalog, details), fields(name = %details.name))]
    pub fn create(
        &mut self,
        catalog: &Catalog,
        details: BatchDetails,
    ) -> Result<(Batch, String), BatchError> {
        let name = details.name.trim();
        if name.is_empty() {
            return Err(BatchError::MissingName);
        }
        if catalog.course(&details.course_id).is_none() {
            return Err(BatchError::UnknownCourse(details.course_id));
        }

        let with_csv = self.upload_method == UploadMethod::Csv && !self.students.is_empty();
        let students = if with_csv {
            std::mem::take(&mut self.students)
        } else {
            Vec::new()
        };
        let message = if with_csv {
            format!("Batch created with {} students!", students.len())
        } else {
            "Batch created successfully!".to_string()
        };
        let batch = Batch {
            id: Uuid::new_v4(),
            name: name.to_string(),
            course_id: details.course_id,
            start_date: details.start_date,
            end_date: details.end_date,
            schedule: details.schedule,
            students,
            created_at: Utc::now(),
        };
        *self = BatchDraft::default();
        tracing::info!(batch_id = %batch.id, students = batch.students.len(), "batch created");
        Ok((batch, message))
    }
}

/// 1-based line numbers of the non-blank lines after the header.
fn data_row_lines(text: &str) -> Vec<usize> {
    text.split('\n')
        .enumerate()
        .filter(|(_, l)| !roster::is_blank_line(l))
        .map(|(i, _)| i + 1)
        .skip(1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    fn staged(text: &'static str) -> BatchDraft {
        let mut draft = BatchDraft::default();
        draft.set_upload_method(UploadMethod::Csv);
        assert_ok!(draft.stage_csv("roster.csv", || Ok(text.to_string())));
        draft
    }

    fn details(name: &str, course_id: &str) -> BatchDetails {
        BatchDetails {
            name: name.to_string(),
            course_id: course_id.to_string(),
            ..BatchDetails::default()
        }
    }

    #[test]
    fn staging_reports_count_and_numbers_ids_by_data_row() {
        let mut draft = BatchDraft::default();
        let msg = assert_ok!(draft.stage_csv("roster.csv", || {
            Ok("name,email\n,skip@x.com\n\nAda,ada@x.com\nBo,bo@x.com\n".to_string())
        }));
        assert_eq!(msg, "2 students loaded from CSV");
        let ids = draft.students.iter().map(|s| s.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["csv-1", "csv-2"]);
        assert_eq!(draft.dropped_rows, vec![2]);
        assert_eq!(draft.csv_file.as_deref(), Some("roster.csv"));
    }

    #[test]
    fn wrong_suffix_is_rejected_before_reading() {
        let mut draft = BatchDraft::default();
        let e = assert_err!(draft.stage_csv("roster.xlsx", || -> anyhow::Result<String> {
            panic!("must not read")
        }));
        assert_eq!(e.code(), "invalid_file_type");
        assert_eq!(e.to_string(), "Please upload a valid CSV file");
    }

    #[test]
    fn failures_leave_previous_roster_in_place() {
        let mut draft = staged("name,email\nAda,ada@x.com\n");

        let e = assert_err!(draft.stage_csv("other.csv", || Ok("id,phone\n1,2\n".to_string())));
        assert_eq!(e.to_string(), "CSV must contain \"name\" and \"email\" columns");
        let e = assert_err!(draft.stage_csv("other.csv", || Ok("name,email\n".to_string())));
        assert_eq!(e.code(), "empty_or_invalid");
        let e = assert_err!(draft.stage_csv("other.csv", || Err(anyhow::anyhow!("gone"))));
        assert_eq!(e.to_string(), "Error reading CSV file");

        assert_eq!(draft.csv_file.as_deref(), Some("roster.csv"));
        assert_eq!(draft.students.len(), 1);
    }

    #[test]
    fn removing_students_by_id() {
        let mut draft = staged("name,email\nAda,ada@x.com\nBo,bo@x.com\n");
        assert_ok!(draft.remove_student("csv-0"));
        assert_eq!(draft.students[0].name, "Bo");
        let e = assert_err!(draft.remove_student("csv-0"));
        assert_eq!(e.code(), "unknown_student");
    }

    #[test]
    fn create_with_csv_attaches_students_and_resets() {
        let catalog = Catalog::demo();
        let mut draft = staged("name,email\nAda,ada@x.com\nBo,bo@x.com\n");
        let (batch, msg) = assert_ok!(draft.create(&catalog, details("DSA Winter", "c1")));
        assert_eq!(msg, "Batch created with 2 students!");
        assert_eq!(batch.students.len(), 2);
        assert_eq!(draft.upload_method, UploadMethod::Manual);
        assert!(draft.students.is_empty());
        assert_eq!(draft.csv_file, None);
    }

    #[test]
    fn manual_method_ignores_staged_students() {
        let catalog = Catalog::demo();
        let mut draft = staged("name,email\nAda,ada@x.com\n");
        draft.set_upload_method(UploadMethod::Manual);
        let (batch, msg) = assert_ok!(draft.create(&catalog, details("Web Spring", "c2")));
        assert_eq!(msg, "Batch created successfully!");
        assert!(batch.students.is_empty());
    }

    #[test]
    fn create_validates_name_and_course() {
        let catalog = Catalog::demo();
        let mut draft = staged("name,email\nAda,ada@x.com\n");
        assert_eq!(
            assert_err!(draft.create(&catalog, details("  ", "c1"))).code(),
            "bad_params"
        );
        assert_eq!(
            assert_err!(draft.create(&catalog, details("X", "c404"))).code(),
            "unknown_course"
        );
        assert_eq!(draft.students.len(), 1);
    }
}
