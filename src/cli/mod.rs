//! CLI command implementations

pub mod branch;
pub mod group;
pub mod merge_request;
pub mod tag;

use clap::Args;

/// Project selection shared by the project-loop commands.
///
/// At least one of `--project` / `--group` is required; giving both acts on
/// the group's projects first, then the single project, without
/// deduplication.
#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct Targets {
    /// Project id to act on
    #[arg(short, long)]
    pub project: Option<String>,

    /// Group id whose projects are all acted on
    #[arg(short, long)]
    pub group: Option<String>,
}
