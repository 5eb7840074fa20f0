//! Default-branch and protected-branch commands.
//!
//! These are plain list-and-call loops over the resolved projects: each
//! project's status line is printed and the loop keeps going.

use anyhow::Result;
use tracing::warn;

use glbulk::config::Config;
use glbulk::gitlab::{GitlabClient, GitlabError};

use super::Targets;

/// Set the default branch on every selected project
pub fn set_default_branch_command(
    config: &Config,
    branch: &str,
    targets: &Targets,
) -> Result<()> {
    let client = GitlabClient::from_config(config);
    let projects =
        client.resolve_projects(targets.project.as_deref(), targets.group.as_deref())?;

    for project in &projects {
        let status = client.set_default_branch(project.id, branch)?;
        println!(
            "{}, {}, {}, {}",
            project.id, project.http_url_to_repo, branch, status
        );
    }

    Ok(())
}

/// Show the protected-branch settings of every selected project
pub fn list_protected_command(config: &Config, targets: &Targets) -> Result<()> {
    let client = GitlabClient::from_config(config);
    let projects =
        client.resolve_projects(targets.project.as_deref(), targets.group.as_deref())?;

    for project in &projects {
        let branches = match client.protected_branches(project.id) {
            Ok(branches) => branches,
            Err(err @ GitlabError::Status { .. }) => {
                warn!("skipping project {}: {}", project.id, err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        for branch in &branches {
            for access in &branch.merge_access_levels {
                println!(
                    "{:4}, {}, merge: {} : {}: {}",
                    project.id,
                    project.path_with_namespace,
                    branch.name,
                    access.access_level,
                    access.access_level_description
                );
            }
            for access in &branch.push_access_levels {
                println!(
                    "{:4}, {}, push: {} - {}: {}",
                    project.id,
                    project.path_with_namespace,
                    branch.name,
                    access.access_level,
                    access.access_level_description
                );
            }
        }
    }

    Ok(())
}

/// Apply the configured protection policies to every selected project
pub fn set_protected_command(config: &Config, targets: &Targets) -> Result<()> {
    let client = GitlabClient::from_config(config);
    let projects =
        client.resolve_projects(targets.project.as_deref(), targets.group.as_deref())?;

    for project in &projects {
        for policy in &config.default_protected_branches {
            let status = client.protect_branch(project.id, policy)?;
            println!(
                "{}, {}, {}, {}",
                project.id, project.name, policy.name, status
            );
        }
    }

    Ok(())
}
