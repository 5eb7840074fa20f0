//! Tag batch: one repository tag per CSV row.
//!
//! Per row: resolve the source branch's head commit, derive the tag name,
//! POST the tag, report the outcome. A failed branch lookup reports the row
//! and skips the tag creation; the remote's answer to the creation itself
//! is reported verbatim either way.

use std::io::Write;

use anyhow::Result;
use csv::StringRecord;

use super::input;
use crate::gitlab::{GitlabApi, GitlabError};

/// One data row of a tagging batch, bound by column position:
/// `project id, path, tag prefix, source branch, message`.
#[derive(Debug, Clone)]
pub struct TagRow {
    pub project_id: String,
    pub path: String,
    pub prefix: String,
    pub branch: String,
    pub message: String,
}

impl TagRow {
    fn from_record(row: usize, record: &StringRecord) -> Result<Self> {
        Ok(Self {
            project_id: input::column(record, row, 0)?,
            path: input::column(record, row, 1)?,
            prefix: input::column(record, row, 2)?,
            branch: input::column(record, row, 3)?,
            message: input::column(record, row, 4)?,
        })
    }
}

/// Options fixed for one tagging run
#[derive(Debug, Clone)]
pub struct TagOptions {
    /// Use the tag prefix verbatim instead of `prefix-yymmdd-hash`
    pub no_suffix: bool,

    /// Six-digit run date, identical for every row of the run
    pub run_date: String,

    /// Instance base URL used to render the tag's web location
    pub gitlab_url: String,
}

/// Today's run date as `yymmdd`
pub fn run_date() -> String {
    chrono::Local::now().format("%y%m%d").to_string()
}

fn computed_tag(row: &TagRow, options: &TagOptions, hash: &str) -> String {
    if options.no_suffix {
        row.prefix.clone()
    } else {
        format!("{}-{}-{}", row.prefix, options.run_date, hash)
    }
}

/// Create one tag per row, streaming one outcome line per row to `out`.
pub fn run<A: GitlabApi, W: Write>(
    api: &A,
    rows: &[StringRecord],
    options: &TagOptions,
    out: &mut W,
) -> Result<()> {
    for (index, record) in rows.iter().enumerate() {
        let row = TagRow::from_record(index + 1, record)?;

        match api.branch_head(&row.project_id, &row.branch) {
            Ok(hash) => {
                let tag = computed_tag(&row, options, &hash);
                let status = api.create_tag(&row.project_id, &tag, &row.branch, &row.message)?;

                writeln!(
                    out,
                    "{}, {}/{}/-/tags/{}, {} : {}",
                    row.project_id, options.gitlab_url, row.path, tag, row.branch, status
                )?;
            }
            Err(err @ GitlabError::BranchLookup { .. }) => {
                writeln!(out, "{}, {}, {}", row.project_id, row.path, err)?;
            }
            Err(other) => return Err(other.into()),
        }
    }

    Ok(())
}
