//! Group discovery commands

use anyhow::Result;

use glbulk::config::Config;
use glbulk::gitlab::GitlabClient;

/// Search groups by name and print one line per match
pub fn find_group_command(config: &Config, search: &str) -> Result<()> {
    let client = GitlabClient::from_config(config);
    let groups = client.search_groups(search)?;

    if groups.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    for group in &groups {
        println!(
            "{:4}, {}, {}, {}",
            group.id, group.full_path, group.name, group.web_url
        );
    }

    Ok(())
}

/// List every project of a group
pub fn list_projects_command(config: &Config, group_id: &str) -> Result<()> {
    let client = GitlabClient::from_config(config);
    let projects = client.list_group_projects(group_id)?;

    for project in &projects {
        println!(
            "{}, {}, {}",
            project.id, project.path_with_namespace, project.http_url_to_repo
        );
    }

    Ok(())
}
