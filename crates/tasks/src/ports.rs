//! Port traits for the remote collaborators.
//!
//! The orchestration layer talks to GitHub only through these two traits.
//! `github::GithubClient` implements both; tests substitute fakes.
//!
//! Implementations must not retry: every error is returned to the caller as
//! soon as it happens.

use async_trait::async_trait;

use crate::{
    ContentNodeId, CreatedIssue, GatewayError, IssueDraft, IssueQuery, IssueSearch, OrgLogin,
    ProjectId, ProjectItemId, ProjectNumber, RepositoryId, ResolvedProject, SingleSelectUpdate,
};

/// Issue search and creation (GitHub REST).
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Runs an issue search and returns the reported match count together
    /// with the first page of candidate titles.
    async fn search_issues(&self, query: &IssueQuery) -> Result<IssueSearch, GatewayError>;

    /// Creates an issue in `repo` from `draft`.
    async fn create_issue(
        &self,
        repo: &RepositoryId,
        draft: &IssueDraft,
    ) -> Result<CreatedIssue, GatewayError>;
}

/// Project board lookups and mutations (GitHub GraphQL).
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    /// Looks up project `number` of `org`, including its "Status" field.
    ///
    /// Returns `Ok(None)` when the remote reports no such project.
    async fn resolve_project(
        &self,
        org: &OrgLogin,
        number: ProjectNumber,
    ) -> Result<Option<ResolvedProject>, GatewayError>;

    /// Adds the issue identified by `content` to `project`, returning the new item id.
    async fn add_project_item(
        &self,
        project: &ProjectId,
        content: &ContentNodeId,
    ) -> Result<ProjectItemId, GatewayError>;

    /// Sets a single-select field value on a project item.
    async fn set_single_select_value(
        &self,
        update: &SingleSelectUpdate,
    ) -> Result<(), GatewayError>;
}
