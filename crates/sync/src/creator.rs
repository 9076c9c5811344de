//! Issue creation, honouring dry-run mode.

use std::io::Write;
use std::sync::Arc;

use tasks::{CreatedIssue, IssueDraft, IssueTracker, RepositoryId, SyncError};
use tracing::{info, instrument};

/// What happened when an issue was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    /// The issue exists on GitHub now.
    Created(CreatedIssue),
    /// Dry-run mode: the intent was logged and nothing was sent.
    DryRun,
}

/// Submits new issues to the target repository.
pub struct IssueCreator<T> {
    tracker: Arc<T>,
    repo: RepositoryId,
    dry_run: bool,
}

impl<T: IssueTracker> IssueCreator<T> {
    /// Creates an issue creator for `repo`.
    pub fn new(tracker: Arc<T>, repo: RepositoryId, dry_run: bool) -> Self {
        Self {
            tracker,
            repo,
            dry_run,
        }
    }

    /// Creates the issue described by `draft`, or only reports it in dry-run mode.
    ///
    /// # Errors
    ///
    /// Remote errors are returned as [`SyncError::Gateway`] without retrying.
    #[instrument(skip_all, fields(title = %draft.title, dry_run = self.dry_run))]
    pub async fn create<W: Write>(
        &self,
        draft: &IssueDraft,
        out: &mut W,
    ) -> Result<CreationOutcome, SyncError> {
        if self.dry_run {
            writeln!(out, "[DRY RUN] Would create issue: {}", draft.title)?;
            info!("dry run, issue not created");
            return Ok(CreationOutcome::DryRun);
        }

        let created = self.tracker.create_issue(&self.repo, draft).await?;
        info!(number = %created.number, url = %created.url, "issue created");
        Ok(CreationOutcome::Created(created))
    }
}
