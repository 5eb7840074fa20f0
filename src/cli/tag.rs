//! Tag batch command implementation

use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use glbulk::batch::{self, tag::TagOptions};
use glbulk::config::Config;
use glbulk::gitlab::GitlabClient;

/// Create one repository tag per CSV row
pub fn tag_command(config: &Config, file: &Path, no_suffix: bool) -> Result<()> {
    let rows = batch::read_batch_file(file)?;
    debug!("tagging {} rows from {}", rows.len(), file.display());

    let client = GitlabClient::from_config(config);
    let options = TagOptions {
        no_suffix,
        run_date: batch::tag::run_date(),
        gitlab_url: client.base_url().to_string(),
    };

    let stdout = io::stdout();
    batch::tag::run(&client, &rows, &options, &mut stdout.lock())
}
