//! Merge-request batch: one merge request per CSV row.
//!
//! No derived state here; each row goes straight to the creation call. The
//! outcome prefers what the remote said about the merge request over the
//! raw inputs: a structured error message beats the status line, the merge
//! request's own URL beats the input path.

use std::io::Write;

use anyhow::Result;
use csv::StringRecord;

use super::input;
use crate::gitlab::{GitlabApi, MergeRequestBody};

/// One data row of a merge-request batch, bound by column position:
/// `project id, path, source branch, target branch, title`.
#[derive(Debug, Clone)]
pub struct MergeRequestRow {
    pub project_id: String,
    pub path: String,
    pub source: String,
    pub target: String,
    pub title: String,
}

impl MergeRequestRow {
    fn from_record(row: usize, record: &StringRecord) -> Result<Self> {
        Ok(Self {
            project_id: input::column(record, row, 0)?,
            path: input::column(record, row, 1)?,
            source: input::column(record, row, 2)?,
            target: input::column(record, row, 3)?,
            title: input::column(record, row, 4)?,
        })
    }
}

/// Open one merge request per row, streaming one outcome line per row to
/// `out`.
pub fn run<A: GitlabApi, W: Write>(
    api: &A,
    rows: &[StringRecord],
    out: &mut W,
) -> Result<()> {
    for (index, record) in rows.iter().enumerate() {
        let row = MergeRequestRow::from_record(index + 1, record)?;

        let reply =
            api.create_merge_request(&row.project_id, &row.source, &row.target, &row.title)?;

        let status = match &reply.body {
            MergeRequestBody::Error(message) => message.clone(),
            _ => reply.status.clone(),
        };
        let path = match &reply.body {
            MergeRequestBody::Created(merge_request) => merge_request.web_url.clone(),
            _ => row.path.clone(),
        };

        writeln!(out, "{}, {}, {}", row.project_id, path, status)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_request_row_binds_columns_by_position() {
        let record =
            StringRecord::from(vec!["101", "grp/app", "feature/login", "main", "Add login"]);

        let row = MergeRequestRow::from_record(1, &record).unwrap();
        assert_eq!(row.project_id, "101");
        assert_eq!(row.source, "feature/login");
        assert_eq!(row.target, "main");
        assert_eq!(row.title, "Add login");
    }

    #[test]
    fn test_merge_request_row_rejects_short_record() {
        let record = StringRecord::from(vec!["101", "grp/app"]);

        let err = MergeRequestRow::from_record(4, &record).unwrap_err();
        assert!(err.to_string().contains("Row 4"));
        assert!(err.to_string().contains("got 2"));
    }
}
