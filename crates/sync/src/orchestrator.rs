//! The synchronisation run loop.
//!
//! One run walks the task list strictly in order. For each task:
//!
//! ```text
//! Checked ─┬─▶ Skipped
//!          └─▶ Created ─┬─▶ Linked ─▶ StatusSet
//!                       └─▶ LinkSkippedDryRun
//! ```
//!
//! There is no rollback. If a step fails after the issue was created, the
//! issue stays on GitHub and the run aborts with the error.

use std::io::Write;
use std::sync::Arc;

use tasks::{
    load_task_list, IssueDraft, IssueTracker, ProjectBoard, ResolvedProject, RunConfig,
    RunSummary, SyncError, SyncRunId, TaskList, TaskRecord,
};
use tracing::{info, instrument};

use crate::{CreationOutcome, DuplicateChecker, IssueCreator, ProjectLinker};

/// What happened to a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskOutcome {
    Skipped,
    Created,
}

/// Drives the checker, creator, and linker over a task list.
pub struct SyncOrchestrator<G> {
    config: RunConfig,
    checker: DuplicateChecker<G>,
    creator: IssueCreator<G>,
    linker: ProjectLinker<G>,
}

impl<G: IssueTracker + ProjectBoard> SyncOrchestrator<G> {
    /// Builds an orchestrator that talks to GitHub through `gateway`.
    pub fn new(gateway: Arc<G>, config: RunConfig) -> Self {
        Self {
            checker: DuplicateChecker::new(
                Arc::clone(&gateway),
                config.repo.clone(),
                config.duplicate_matching,
            ),
            creator: IssueCreator::new(Arc::clone(&gateway), config.repo.clone(), config.dry_run),
            linker: ProjectLinker::new(gateway),
            config,
        }
    }

    /// Loads the task list named by the configuration and synchronises it.
    ///
    /// # Errors
    ///
    /// [`SyncError::Load`] if the task list cannot be read, otherwise as [`Self::run`].
    pub async fn run_from_file<W: Write>(&self, out: &mut W) -> Result<RunSummary, SyncError> {
        let tasks = load_task_list(&self.config.json_path)?;
        self.run(&tasks, out).await
    }

    /// Synchronises `tasks`, writing progress lines to `out`.
    ///
    /// # Errors
    ///
    /// The first error from any step aborts the run; lines already written
    /// to `out` stay as the only record of progress.
    pub async fn run<W: Write>(
        &self,
        tasks: &TaskList,
        out: &mut W,
    ) -> Result<RunSummary, SyncError> {
        self.run_with_id(SyncRunId::new_random(), tasks, out).await
    }

    #[instrument(skip_all, fields(run_id = %run_id, tasks = tasks.len()))]
    async fn run_with_id<W: Write>(
        &self,
        run_id: SyncRunId,
        tasks: &TaskList,
        out: &mut W,
    ) -> Result<RunSummary, SyncError> {
        let project = self
            .linker
            .resolve(&self.config.org, self.config.project_number)
            .await?;
        self.write_banner(&project, tasks, out)?;

        let mut summary = RunSummary::new(run_id);
        for task in &tasks.tasks {
            match self.sync_task(task, tasks, &project, out).await? {
                TaskOutcome::Skipped => summary.skipped += 1,
                TaskOutcome::Created => summary.created += 1,
            }
        }

        writeln!(out)?;
        writeln!(out, "Done. {summary}")?;
        info!(created = summary.created, skipped = summary.skipped, "run finished");
        Ok(summary)
    }

    fn write_banner<W: Write>(
        &self,
        project: &ResolvedProject,
        tasks: &TaskList,
        out: &mut W,
    ) -> Result<(), SyncError> {
        writeln!(
            out,
            "Project: {} (#{})",
            project.title, self.config.project_number
        )?;
        writeln!(out, "Repo: {}", self.config.repo)?;
        writeln!(out, "Label: {}", tasks.meta.label)?;
        writeln!(out, "Default Status: {}", self.config.default_status)?;
        writeln!(out, "DRY_RUN: {}", self.config.dry_run)?;
        writeln!(out)?;
        Ok(())
    }

    #[instrument(skip_all, fields(task_id = %task.id))]
    async fn sync_task<W: Write>(
        &self,
        task: &TaskRecord,
        tasks: &TaskList,
        project: &ResolvedProject,
        out: &mut W,
    ) -> Result<TaskOutcome, SyncError> {
        if self.checker.exists(&task.id).await? {
            writeln!(out, "SKIP (exists): {} {}", task.id, task.text)?;
            info!("issue already exists, skipped");
            return Ok(TaskOutcome::Skipped);
        }

        let draft = IssueDraft::for_task(task, &tasks.meta, &self.config.json_path);
        let issue = match self.creator.create(&draft, out).await? {
            CreationOutcome::Created(issue) => issue,
            CreationOutcome::DryRun => {
                self.linker
                    .report_dry_run(project, &self.config.default_status, out)?;
                return Ok(TaskOutcome::Created);
            }
        };

        let item = self.linker.attach(&project.id, &issue.content_id).await?;
        self.linker
            .set_status(
                &project.id,
                &item,
                project.status_field.as_ref(),
                &self.config.default_status,
                out,
            )
            .await?;

        writeln!(out, "CREATED: #{} {}", issue.number, issue.url)?;
        if !self.config.inter_task_delay.is_zero() {
            tokio::time::sleep(self.config.inter_task_delay).await;
        }
        Ok(TaskOutcome::Created)
    }
}
