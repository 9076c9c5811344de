//! Project board linking: resolve the board, attach issues, set their status.

use std::io::Write;
use std::sync::Arc;

use tasks::{
    ContentNodeId, OrgLogin, ProjectBoard, ProjectId, ProjectItemId, ProjectNumber,
    ResolvedProject, SingleSelectUpdate, StatusField, SyncError,
};
use tracing::{debug, info, instrument, warn};

/// Wraps the [`ProjectBoard`] port with the project-level rules: a missing
/// project is fatal, a missing status field is only a warning, and status
/// names are matched case-insensitively.
pub struct ProjectLinker<B> {
    board: Arc<B>,
}

impl<B: ProjectBoard> ProjectLinker<B> {
    /// Creates a linker over `board`.
    pub fn new(board: Arc<B>) -> Self {
        Self { board }
    }

    /// Resolves project `number` of `org` together with its "Status" field.
    ///
    /// # Errors
    ///
    /// [`SyncError::ProjectNotFound`] if GitHub reports no such project,
    /// [`SyncError::Gateway`] if the query itself fails.
    #[instrument(skip_all, fields(org = %org, number = %number))]
    pub async fn resolve(
        &self,
        org: &OrgLogin,
        number: ProjectNumber,
    ) -> Result<ResolvedProject, SyncError> {
        let project = self
            .board
            .resolve_project(org, number)
            .await?
            .ok_or_else(|| SyncError::ProjectNotFound {
                org: org.clone(),
                number,
            })?;
        debug!(
            project_id = %project.id,
            has_status_field = project.status_field.is_some(),
            "resolved project"
        );
        Ok(project)
    }

    /// Adds an issue to the project and returns the new item id.
    ///
    /// # Errors
    ///
    /// Remote failures are returned as [`SyncError::Gateway`].
    #[instrument(skip_all, fields(project_id = %project, content_id = %content))]
    pub async fn attach(
        &self,
        project: &ProjectId,
        content: &ContentNodeId,
    ) -> Result<ProjectItemId, SyncError> {
        let item = self.board.add_project_item(project, content).await?;
        debug!(item_id = %item, "added issue to project");
        Ok(item)
    }

    /// Sets the item's status to the option named `desired`.
    ///
    /// Without a status field this only prints a warning. The option lookup
    /// happens before any remote call, so an unknown name never reaches GitHub.
    ///
    /// # Errors
    ///
    /// [`SyncError::StatusOptionNotFound`] listing the project's option names if
    /// `desired` matches none of them; [`SyncError::Gateway`] if the mutation fails.
    #[instrument(skip_all, fields(item_id = %item, desired = %desired))]
    pub async fn set_status<W: Write>(
        &self,
        project: &ProjectId,
        item: &ProjectItemId,
        field: Option<&StatusField>,
        desired: &str,
        out: &mut W,
    ) -> Result<(), SyncError> {
        let Some(field) = field else {
            writeln!(
                out,
                "WARNING: No Status field found on project. Skipping status set."
            )?;
            warn!("project has no status field; status not set");
            return Ok(());
        };

        let option =
            field
                .option_named(desired)
                .ok_or_else(|| SyncError::StatusOptionNotFound {
                    requested: desired.to_owned(),
                    available: field.option_names(),
                })?;

        let update = SingleSelectUpdate {
            project_id: project.clone(),
            item_id: item.clone(),
            field_id: field.id.clone(),
            option_id: option.id.clone(),
        };
        self.board.set_single_select_value(&update).await?;
        info!(status = %option.name, "status set");
        Ok(())
    }

    /// Reports what linking would have done for an issue that was not created
    /// because of dry-run mode.
    ///
    /// # Errors
    ///
    /// Only [`SyncError::Output`], if the report cannot be written.
    pub fn report_dry_run<W: Write>(
        &self,
        project: &ResolvedProject,
        desired: &str,
        out: &mut W,
    ) -> Result<(), SyncError> {
        writeln!(out, "[DRY RUN] Would add issue to project")?;
        if project.status_field.is_some() {
            writeln!(out, "[DRY RUN] Would set Status={desired}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{project_with_status, MockGitHub};
    use tasks::GatewayError;

    fn ids() -> (ProjectId, ProjectItemId) {
        (
            ProjectId::new("PVT_project").unwrap(),
            ProjectItemId::new("PVTI_item").unwrap(),
        )
    }

    #[tokio::test]
    async fn missing_project_is_fatal() {
        let mut github = MockGitHub::new();
        github.expect_resolve_project().returning(|_, _| Ok(None));
        let linker = ProjectLinker::new(Arc::new(github));

        let err = linker
            .resolve(&OrgLogin::new("Community-Chests").unwrap(), ProjectNumber::new(9))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "project #9 not found for organisation 'Community-Chests'"
        );
    }

    #[tokio::test]
    async fn sets_the_matching_option_case_insensitively() {
        let mut github = MockGitHub::new();
        github
            .expect_set_single_select_value()
            .withf(|update| {
                update.field_id.as_str() == "PVTSSF_status"
                    && update.option_id.as_str() == "opt_ready"
                    && update.item_id.as_str() == "PVTI_item"
            })
            .times(1)
            .returning(|_| Ok(()));
        let linker = ProjectLinker::new(Arc::new(github));
        let project = project_with_status();
        let (project_id, item_id) = ids();

        linker
            .set_status(
                &project_id,
                &item_id,
                project.status_field.as_ref(),
                "  READY ",
                &mut std::io::sink(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_status_lists_options_and_skips_the_mutation() {
        let mut github = MockGitHub::new();
        github.expect_set_single_select_value().never();
        let linker = ProjectLinker::new(Arc::new(github));
        let project = project_with_status();
        let (project_id, item_id) = ids();

        let err = linker
            .set_status(
                &project_id,
                &item_id,
                project.status_field.as_ref(),
                "Doing",
                &mut std::io::sink(),
            )
            .await
            .unwrap_err();

        match err {
            SyncError::StatusOptionNotFound {
                requested,
                available,
            } => {
                assert_eq!(requested, "Doing");
                assert_eq!(available, vec!["Backlog", "Ready", "Done"]);
            }
            other => panic!("expected StatusOptionNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_status_field_only_warns() {
        let mut github = MockGitHub::new();
        github.expect_set_single_select_value().never();
        let linker = ProjectLinker::new(Arc::new(github));
        let (project_id, item_id) = ids();
        let mut out = Vec::<u8>::new();

        linker
            .set_status(&project_id, &item_id, None, "Backlog", &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "WARNING: No Status field found on project. Skipping status set.\n"
        );
    }

    #[tokio::test]
    async fn attach_propagates_graphql_errors() {
        let mut github = MockGitHub::new();
        github.expect_add_project_item().returning(|_, _| {
            Err(GatewayError::GraphQl {
                messages: vec!["Resource not accessible by integration".to_owned()],
            })
        });
        let linker = ProjectLinker::new(Arc::new(github));
        let (project_id, _) = ids();

        let err = linker
            .attach(&project_id, &ContentNodeId::new("I_1").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Gateway(GatewayError::GraphQl { .. })));
    }
}
