//! Wire types for the subset of the GitLab REST API this tool consumes.
//!
//! Field names match the JSON payloads (snake_case), so no rename
//! attributes are needed; only consumed fields are modeled.

use serde::Deserialize;

/// A group, as returned by the group search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Group {
    pub id: u64,
    pub web_url: String,
    pub name: String,
    pub full_path: String,
}

/// A project, as returned by the project endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub id: u64,
    pub web_url: String,
    pub name: String,
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub http_url_to_repo: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub path_with_namespace: String,
}

/// A repository branch; only the head commit is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: Commit,
}

/// Head-commit metadata carried by a branch
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
}

/// A protected branch and its access rules
#[derive(Debug, Clone, Deserialize)]
pub struct ProtectedBranch {
    pub name: String,
    #[serde(default)]
    pub push_access_levels: Vec<BranchAccess>,
    #[serde(default)]
    pub merge_access_levels: Vec<BranchAccess>,
}

/// One access rule on a protected branch
#[derive(Debug, Clone, Deserialize)]
pub struct BranchAccess {
    pub access_level: u32,
    #[serde(default)]
    pub access_level_description: String,
}

/// The subset of a created merge request the outcome line consumes
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub iid: u64,
    pub web_url: String,
}

/// Reply to a merge-request creation call: the HTTP status line plus the
/// decoded body.
#[derive(Debug)]
pub struct MergeRequestReply {
    /// HTTP status line, e.g. `201 Created`
    pub status: String,

    pub body: MergeRequestBody,
}

/// Decoded body of a merge-request creation reply.
///
/// The `error` indicator is checked first and wins over the success schema;
/// a body matching neither shape is reported as `Unrecognized` so the
/// caller can fall back to the status line.
#[derive(Debug)]
pub enum MergeRequestBody {
    /// The body carried a structured `error` message
    Error(String),

    /// The body decoded as a merge request
    Created(MergeRequest),

    /// The body matched neither shape
    Unrecognized,
}

impl MergeRequestBody {
    /// Decode a raw reply body
    pub fn decode(body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return MergeRequestBody::Unrecognized;
        };

        if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
            return MergeRequestBody::Error(message.to_string());
        }

        match serde_json::from_value::<MergeRequest>(value) {
            Ok(merge_request) => MergeRequestBody::Created(merge_request),
            Err(_) => MergeRequestBody::Unrecognized,
        }
    }
}
