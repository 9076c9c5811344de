//! Duplicate detection against existing repository issues.

use std::sync::Arc;

use tasks::{
    title_marker, DuplicateMatching, GatewayError, IssueQuery, IssueSearch, IssueTracker,
    RepositoryId, TaskId,
};
use tracing::{debug, instrument};

/// Decides whether an issue for a task already exists by searching issue titles.
pub struct DuplicateChecker<T> {
    tracker: Arc<T>,
    repo: RepositoryId,
    matching: DuplicateMatching,
}

impl<T: IssueTracker> DuplicateChecker<T> {
    /// Creates a checker scoped to `repo`.
    pub fn new(tracker: Arc<T>, repo: RepositoryId, matching: DuplicateMatching) -> Self {
        Self {
            tracker,
            repo,
            matching,
        }
    }

    /// Returns `true` if the repository already has an issue for `id`.
    ///
    /// # Errors
    ///
    /// Returns the search error unchanged (rate limiting, authentication).
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn exists(&self, id: &TaskId) -> Result<bool, GatewayError> {
        let query = IssueQuery::title_contains(&self.repo, id);
        let search = self.tracker.search_issues(&query).await?;
        let exists = is_duplicate(self.matching, id, &search);
        debug!(total_count = search.total_count, exists, "searched for existing issue");
        Ok(exists)
    }
}

fn is_duplicate(matching: DuplicateMatching, id: &TaskId, search: &IssueSearch) -> bool {
    match matching {
        DuplicateMatching::RemoteCount => search.total_count > 0,
        DuplicateMatching::ExactTitle => {
            let marker = title_marker(id);
            search.titles.iter().any(|title| title.contains(&marker))
        }
    }
}
