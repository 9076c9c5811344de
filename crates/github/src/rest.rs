//! [`IssueTracker`] over the GitHub REST API.

use async_trait::async_trait;
use tasks::{
    ContentNodeId, CreatedIssue, GatewayError, IssueDraft, IssueNumber, IssueQuery, IssueSearch,
    IssueTracker, RepositoryId,
};
use tracing::instrument;

use crate::client::{missing, GithubClient};
use crate::wire::{CreateIssueRequest, CreateIssueResponse, SearchIssuesResponse};

/// Largest page the search endpoint serves.
const SEARCH_PAGE_SIZE: &str = "100";

#[async_trait]
impl IssueTracker for GithubClient {
    #[instrument(skip_all, fields(query = %query))]
    async fn search_issues(&self, query: &IssueQuery) -> Result<IssueSearch, GatewayError> {
        let request = self
            .http
            .get(format!("{}/search/issues", self.rest_url))
            .query(&[("q", query.as_str()), ("per_page", SEARCH_PAGE_SIZE)]);
        let page: SearchIssuesResponse = self.send_json(request).await?;

        Ok(IssueSearch {
            total_count: page.total_count,
            titles: page.items.into_iter().map(|item| item.title).collect(),
        })
    }

    #[instrument(skip_all, fields(repo = %repo, title = %draft.title))]
    async fn create_issue(
        &self,
        repo: &RepositoryId,
        draft: &IssueDraft,
    ) -> Result<CreatedIssue, GatewayError> {
        let payload = CreateIssueRequest {
            title: &draft.title,
            body: &draft.body,
            labels: [draft.label.as_str()],
        };
        let request = self
            .http
            .post(format!(
                "{}/repos/{}/{}/issues",
                self.rest_url,
                repo.owner(),
                repo.name()
            ))
            .json(&payload);
        let created: CreateIssueResponse = self.send_json(request).await?;

        Ok(CreatedIssue {
            content_id: ContentNodeId::new(created.node_id).ok_or_else(|| missing("node_id"))?,
            number: IssueNumber::new(created.number),
            url: created.html_url,
        })
    }
}
