//! Merge-request batch command implementation

use std::io;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use glbulk::batch;
use glbulk::config::Config;
use glbulk::gitlab::GitlabClient;

/// Open one merge request per CSV row
pub fn merge_request_command(config: &Config, file: &Path) -> Result<()> {
    let rows = batch::read_batch_file(file)?;
    debug!(
        "opening merge requests for {} rows from {}",
        rows.len(),
        file.display()
    );

    let client = GitlabClient::from_config(config);

    let stdout = io::stdout();
    batch::merge_request::run(&client, &rows, &mut stdout.lock())
}
