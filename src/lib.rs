//! glbulk - bulk administration for GitLab groups and projects.
//!
//! glbulk drives a small subset of the GitLab REST API (v4): group and
//! project discovery, default-branch and protected-branch policy
//! management, and CSV-driven batch tagging and merge-request creation.
//!
//! The batch engine is the interesting part: it reads a CSV work list,
//! resolves per-row state from the API (a branch's head commit), issues one
//! mutating call per row, and emits exactly one outcome line per row on
//! stdout - a failed row is reported and the batch keeps going.

pub mod batch;
pub mod config;
pub mod gitlab;
