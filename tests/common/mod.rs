//! Shared test double for the GitLab API surface the batch runners use
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use glbulk::gitlab::{GitlabApi, GitlabError, MergeRequestBody, MergeRequestReply};

/// One recorded tag-creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub project_id: String,
    pub tag: String,
    pub branch: String,
    pub message: String,
}

/// In-memory GitLab double: branch lookups answer from a fixed map (absent
/// pairs fail with `404 Not Found`), mutating calls answer from scripted
/// queues, and every call is recorded.
#[derive(Default)]
pub struct FakeGitlab {
    branches: HashMap<(String, String), String>,
    tag_statuses: RefCell<Vec<String>>,
    mr_replies: RefCell<Vec<MergeRequestReply>>,

    pub branch_calls: RefCell<Vec<(String, String)>>,
    pub tag_calls: RefCell<Vec<CreatedTag>>,
    pub mr_calls: RefCell<usize>,
}

impl FakeGitlab {
    /// Register a resolvable (project, branch) pair
    pub fn with_branch(mut self, project_id: &str, branch: &str, hash: &str) -> Self {
        self.branches.insert(
            (project_id.to_string(), branch.to_string()),
            hash.to_string(),
        );
        self
    }

    /// Queue the status line answered to the next tag creation
    /// (`201 Created` once the queue is empty)
    pub fn push_tag_status(&self, status: &str) {
        self.tag_statuses.borrow_mut().push(status.to_string());
    }

    /// Queue the reply answered to the next merge-request creation
    pub fn push_mr_reply(&self, status: &str, body: MergeRequestBody) {
        self.mr_replies.borrow_mut().push(MergeRequestReply {
            status: status.to_string(),
            body,
        });
    }
}

impl GitlabApi for FakeGitlab {
    fn branch_head(&self, project_id: &str, branch: &str) -> Result<String, GitlabError> {
        self.branch_calls
            .borrow_mut()
            .push((project_id.to_string(), branch.to_string()));

        self.branches
            .get(&(project_id.to_string(), branch.to_string()))
            .cloned()
            .ok_or_else(|| GitlabError::BranchLookup {
                branch: branch.to_string(),
                status: "404 Not Found".to_string(),
            })
    }

    fn create_tag(
        &self,
        project_id: &str,
        tag: &str,
        branch: &str,
        message: &str,
    ) -> Result<String, GitlabError> {
        self.tag_calls.borrow_mut().push(CreatedTag {
            project_id: project_id.to_string(),
            tag: tag.to_string(),
            branch: branch.to_string(),
            message: message.to_string(),
        });

        let mut statuses = self.tag_statuses.borrow_mut();
        if statuses.is_empty() {
            Ok("201 Created".to_string())
        } else {
            Ok(statuses.remove(0))
        }
    }

    fn create_merge_request(
        &self,
        _project_id: &str,
        _source: &str,
        _target: &str,
        _title: &str,
    ) -> Result<MergeRequestReply, GitlabError> {
        *self.mr_calls.borrow_mut() += 1;

        let mut replies = self.mr_replies.borrow_mut();
        if replies.is_empty() {
            Ok(MergeRequestReply {
                status: "201 Created".to_string(),
                body: MergeRequestBody::Unrecognized,
            })
        } else {
            Ok(replies.remove(0))
        }
    }
}
