use serde::Serialize;

const NAME_HEADER: &str = "name";
const EMAIL_HEADER: &str = "email";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRecord {
    pub name: String,
    pub email: String,
    /// 1-based line number in the raw text.
    pub source_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("CSV file is empty or invalid")]
    EmptyOrInvalid,
    #[error("CSV must contain \"name\" and \"email\" columns")]
    MissingRequiredColumns,
}

impl RosterError {
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::EmptyOrInvalid => "empty_or_invalid",
            RosterError::MissingRequiredColumns => "missing_required_columns",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterReport {
    pub records: Vec<RosterRecord>,
    /// Non-blank data lines seen after the header.
    pub rows_total: usize,
    /// Line numbers of data rows dropped for a missing name or email.
    pub dropped: Vec<usize>,
}

/// Parses roster text into name/email records. Rows missing either value are
/// dropped without error; use [`parse_report`] to see which.
pub fn parse(raw_text: &str) -> Result<Vec<RosterRecord>, RosterError> {
    parse_report(raw_text).map(|r| r.records)
}

pub fn parse_report(raw_text: &str) -> Result<RosterReport, RosterError> {
    let lines = raw_text
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !is_blank_line(line))
        .map(|(i, line)| (i + 1, line))
        .collect::<Vec<_>>();
    if lines.len() < 2 {
        return Err(RosterError::EmptyOrInvalid);
    }

    let headers = split_fields(&lines[0].1.to_lowercase());
    let name_col = headers.iter().position(|h| h.contains(NAME_HEADER));
    let email_col = headers.iter().position(|h| h.contains(EMAIL_HEADER));
    let (Some(name_col), Some(email_col)) = (name_col, email_col) else {
        return Err(RosterError::MissingRequiredColumns);
    };

    let mut records = Vec::new();
    let mut dropped = Vec::new();
    for (line_no, line) in lines.iter().skip(1) {
        let values = split_fields(line);
        let name = values.get(name_col).cloned().unwrap_or_default();
        let email = values.get(email_col).cloned().unwrap_or_default();
        if name.is_empty() || email.is_empty() {
            dropped.push(*line_no);
            continue;
        }
        records.push(RosterRecord {
            name,
            email,
            source_row: *line_no,
        });
    }

    Ok(RosterReport {
        records,
        rows_total: lines.len() - 1,
        dropped,
    })
}

/// Suffix test only; the file contents are never sniffed.
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.ends_with(".csv")
}

/// Whitespace plus byte-order marks, which spreadsheet exports leave behind.
fn trim_cell(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

pub fn is_blank_line(line: &str) -> bool {
    trim_cell(line).is_empty()
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|s| trim_cell(s).to_string()).collect()
}
