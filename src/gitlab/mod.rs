//! Blocking HTTP client for the GitLab REST API (v4).
//!
//! `GitlabClient` holds the instance URL, the private token, and one
//! `ureq` agent, all injected at construction. Remote-reported statuses on
//! mutating calls are data, not errors: they come back as the status line
//! so callers can report them per target and keep going. Transport
//! failures and unreadable bodies are real errors.

mod types;

pub use types::{
    Branch, BranchAccess, Commit, Group, MergeRequest, MergeRequestBody, MergeRequestReply,
    Project, ProtectedBranch,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ProtectedBranchConfig};

/// Header carrying the private token on every request
pub const AUTH_HEADER: &str = "PRIVATE-TOKEN";

/// Errors produced by the GitLab client
#[derive(Debug, Error)]
pub enum GitlabError {
    /// Branch lookup answered with a client or server error; recoverable
    /// for the row that asked.
    #[error("{branch}: {status}")]
    BranchLookup { branch: String, status: String },

    /// The server answered a read with an error status
    #[error("{url} returned {status}")]
    Status { url: String, status: String },

    /// The request never produced an HTTP response
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The response body could not be read or decoded
    #[error("unreadable response from {url}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

impl GitlabError {
    fn transport(url: &str, source: ureq::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

/// The slice of the API the batch runners consume.
///
/// `GitlabClient` is the production implementation; batch tests substitute
/// an in-memory double that records calls.
pub trait GitlabApi {
    /// Short hash of the branch's head commit
    fn branch_head(&self, project_id: &str, branch: &str) -> Result<String, GitlabError>;

    /// Create a tag at `branch`; returns the HTTP status line, success or not
    fn create_tag(
        &self,
        project_id: &str,
        tag: &str,
        branch: &str,
        message: &str,
    ) -> Result<String, GitlabError>;

    /// Open a merge request; returns the status line and the decoded body
    fn create_merge_request(
        &self,
        project_id: &str,
        source: &str,
        target: &str,
        title: &str,
    ) -> Result<MergeRequestReply, GitlabError>;
}

/// Blocking GitLab API client
pub struct GitlabClient {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl GitlabClient {
    /// Create a client for the given instance URL and private token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(60))
            .build();

        let base_url: String = base_url.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            agent,
        }
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.gitlab_url, &config.gitlab_token)
    }

    /// Instance base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }

    /// Search groups by name
    pub fn search_groups(&self, search: &str) -> Result<Vec<Group>, GitlabError> {
        let url = self.api_url("/groups");
        self.get_json(&url, &[("search", search)])
    }

    /// List every project of a group
    pub fn list_group_projects(&self, group_id: &str) -> Result<Vec<Project>, GitlabError> {
        let url = self.api_url(&format!("/groups/{group_id}/projects"));
        self.get_json(&url, &[])
    }

    /// Fetch a single project
    pub fn get_project(&self, project_id: &str) -> Result<Project, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}"));
        self.get_json(&url, &[])
    }

    /// Expand a project and/or group selection into the concrete project
    /// list.
    ///
    /// Group projects come first, then the explicit project; no
    /// deduplication, so a project selected both ways appears twice.
    pub fn resolve_projects(
        &self,
        project_id: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<Vec<Project>, GitlabError> {
        let mut projects = Vec::new();

        if let Some(group_id) = group_id {
            projects.extend(self.list_group_projects(group_id)?);
        }
        if let Some(project_id) = project_id {
            projects.push(self.get_project(project_id)?);
        }

        Ok(projects)
    }

    /// Set a project's default branch; returns the HTTP status line
    pub fn set_default_branch(
        &self,
        project_id: u64,
        branch: &str,
    ) -> Result<String, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}"));
        self.mutate("PUT", &url, &[("default_branch", branch)])
    }

    /// List a project's protected branches
    pub fn protected_branches(
        &self,
        project_id: u64,
    ) -> Result<Vec<ProtectedBranch>, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}/protected_branches"));
        self.get_json(&url, &[])
    }

    /// Protect a branch with the given policy; returns the HTTP status line
    pub fn protect_branch(
        &self,
        project_id: u64,
        policy: &ProtectedBranchConfig,
    ) -> Result<String, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}/protected_branches"));
        let push = policy.push.api_level().to_string();
        let merge = policy.merge.api_level().to_string();

        self.mutate(
            "POST",
            &url,
            &[
                ("name", policy.name.as_str()),
                ("push_access_level", push.as_str()),
                ("merge_access_level", merge.as_str()),
            ],
        )
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GitlabError> {
        debug!("GET {}", url);

        let mut request = self.agent.get(url).set(AUTH_HEADER, &self.token);
        for (name, value) in query {
            request = request.query(name, value);
        }

        let response = request.call().map_err(|err| match err {
            ureq::Error::Status(code, response) => GitlabError::Status {
                url: url.to_string(),
                status: status_line(code, response.status_text()),
            },
            other => GitlabError::transport(url, other),
        })?;

        response.into_json().map_err(|source| GitlabError::Body {
            url: url.to_string(),
            source,
        })
    }

    /// Issue a mutating call and fold any HTTP status, success or error,
    /// into its status line.
    fn mutate(
        &self,
        method: &str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, GitlabError> {
        debug!("{} {}", method, url);

        let mut request = self.agent.request(method, url).set(AUTH_HEADER, &self.token);
        for (name, value) in query {
            request = request.query(name, value);
        }

        match request.call() {
            Ok(response) => Ok(status_line(response.status(), response.status_text())),
            Err(ureq::Error::Status(code, response)) => {
                Ok(status_line(code, response.status_text()))
            }
            Err(other) => Err(GitlabError::transport(url, other)),
        }
    }
}

impl GitlabApi for GitlabClient {
    fn branch_head(&self, project_id: &str, branch: &str) -> Result<String, GitlabError> {
        let url = self.api_url(&format!(
            "/projects/{}/repository/branches/{}",
            project_id,
            encode_path_segment(branch)
        ));
        debug!("GET {}", url);

        match self.agent.get(&url).set(AUTH_HEADER, &self.token).call() {
            Ok(response) => {
                let info: Branch = response.into_json().map_err(|source| GitlabError::Body {
                    url: url.clone(),
                    source,
                })?;
                Ok(info.commit.short_id)
            }
            Err(ureq::Error::Status(code, response)) => Err(GitlabError::BranchLookup {
                branch: branch.to_string(),
                status: status_line(code, response.status_text()),
            }),
            Err(other) => Err(GitlabError::transport(&url, other)),
        }
    }

    fn create_tag(
        &self,
        project_id: &str,
        tag: &str,
        branch: &str,
        message: &str,
    ) -> Result<String, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}/repository/tags"));

        self.mutate(
            "POST",
            &url,
            &[("tag_name", tag), ("ref", branch), ("message", message)],
        )
    }

    fn create_merge_request(
        &self,
        project_id: &str,
        source: &str,
        target: &str,
        title: &str,
    ) -> Result<MergeRequestReply, GitlabError> {
        let url = self.api_url(&format!("/projects/{project_id}/merge_requests"));
        debug!("POST {}", url);

        let request = self
            .agent
            .post(&url)
            .set(AUTH_HEADER, &self.token)
            .query("source_branch", source)
            .query("target_branch", target)
            .query("title", title);

        let (status, body) = match request.call() {
            Ok(response) => read_status_and_body(&url, response)?,
            Err(ureq::Error::Status(_, response)) => read_status_and_body(&url, response)?,
            Err(other) => return Err(GitlabError::transport(&url, other)),
        };

        let body = MergeRequestBody::decode(&body);
        if matches!(body, MergeRequestBody::Unrecognized) {
            warn!(
                "merge request reply from {} ({}) matched neither the merge request nor the error shape",
                url, status
            );
        }

        Ok(MergeRequestReply { status, body })
    }
}

fn read_status_and_body(
    url: &str,
    response: ureq::Response,
) -> Result<(String, String), GitlabError> {
    let status = status_line(response.status(), response.status_text());
    let body = response.into_string().map_err(|source| GitlabError::Body {
        url: url.to_string(),
        source,
    })?;

    Ok((status, body))
}

fn status_line(code: u16, text: &str) -> String {
    format!("{code} {text}")
}

/// Percent-encode a URL path segment (RFC 3986 unreserved set)
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for &b in segment.as_bytes() {
        let is_unreserved =
            matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~');
        if is_unreserved {
            out.push(b as char);
        } else {
            out.push('%');
            out.push_str(&format!("{:02X}", b));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment_passes_unreserved() {
        assert_eq!(encode_path_segment("release-1.2_rc~3"), "release-1.2_rc~3");
    }

    #[test]
    fn test_encode_path_segment_escapes_separators() {
        assert_eq!(encode_path_segment("feature/login"), "feature%2Flogin");
        assert_eq!(encode_path_segment("fix bug"), "fix%20bug");
        assert_eq!(encode_path_segment("héad"), "h%C3%A9ad");
    }

    #[test]
    fn test_api_url_tolerates_trailing_slash() {
        let client = GitlabClient::new("https://gitlab.example.com/", "token");
        assert_eq!(
            client.api_url("/projects/1"),
            "https://gitlab.example.com/api/v4/projects/1"
        );
        assert_eq!(client.base_url(), "https://gitlab.example.com");
    }

    #[test]
    fn test_status_line_format() {
        assert_eq!(status_line(201, "Created"), "201 Created");
        assert_eq!(status_line(404, "Not Found"), "404 Not Found");
    }

    #[test]
    fn test_branch_lookup_error_carries_branch_and_status() {
        let err = GitlabError::BranchLookup {
            branch: "main".to_string(),
            status: "404 Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "main: 404 Not Found");
    }
}
