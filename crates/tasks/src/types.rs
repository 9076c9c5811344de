//! Shared value types for the issue-sync domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! several fields and participate in the synchronisation logic: the loaded task
//! list, the project's status field, the run configuration, and the run summary.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    ContentNodeId, FieldId, IssueNumber, OptionId, OrgLogin, ProjectId, ProjectItemId,
    ProjectNumber, RepositoryId, SyncRunId, TaskId,
};

// ---------------------------------------------------------------------------
// Task list
// ---------------------------------------------------------------------------

/// One task from the task list, flattened out of its section.
///
/// Records are created by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Sequential identifier, e.g. `SM-001`.
    pub id: TaskId,
    /// Name of the section the task was listed under.
    pub section_name: String,
    /// Free-form task text; becomes the issue title suffix and body.
    pub text: String,
}

/// Document-level metadata with defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMeta {
    /// Prefix for generated task identifiers.
    pub id_prefix: String,
    /// Label attached to every created issue.
    pub label: String,
    /// Attribution rendered into each issue body.
    pub source: String,
}

impl TaskMeta {
    /// Identifier prefix used when the document does not name one.
    pub const DEFAULT_ID_PREFIX: &'static str = "SM";
    /// Issue label used when the document does not name one.
    pub const DEFAULT_LABEL: &'static str = "Social Media Tasks";
    /// Source attribution used when the document does not name one.
    pub const DEFAULT_SOURCE: &'static str = "Unknown source";
}

impl Default for TaskMeta {
    fn default() -> Self {
        Self {
            id_prefix: Self::DEFAULT_ID_PREFIX.to_owned(),
            label: Self::DEFAULT_LABEL.to_owned(),
            source: Self::DEFAULT_SOURCE.to_owned(),
        }
    }
}

/// The loader's output: metadata plus tasks in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskList {
    /// Document metadata.
    pub meta: TaskMeta,
    /// Tasks in section-then-task order.
    pub tasks: Vec<TaskRecord>,
}

impl TaskList {
    /// Number of tasks in the list.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the document contained no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// The issue GitHub reported back after a successful creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Node id used to attach the issue to a project.
    pub content_id: ContentNodeId,
    /// Repository-scoped issue number.
    pub number: IssueNumber,
    /// Browser URL of the issue.
    pub url: String,
}

/// Result of an issue search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IssueSearch {
    /// Total number of matches reported by the search index.
    pub total_count: u64,
    /// Titles of the first page of matching issues.
    pub titles: Vec<String>,
}

/// How the duplicate checker interprets a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateMatching {
    /// Any reported match counts as a duplicate.
    ///
    /// Trusts the search index, so `SM-1` may match an issue titled `[SM-10] ...`.
    #[default]
    RemoteCount,
    /// Only a candidate title containing the bracketed identifier (`[SM-1]`)
    /// counts as a duplicate.
    ExactTitle,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// One option of a single-select project field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    /// Opaque option id.
    pub id: OptionId,
    /// Display name, e.g. `"Backlog"`.
    pub name: String,
}

/// The project's "Status" single-select field and its configured options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusField {
    /// Opaque field id.
    pub id: FieldId,
    /// Field name as configured on the project.
    pub name: String,
    /// Options in the order the project lists them.
    pub options: Vec<StatusOption>,
}

impl StatusField {
    /// Finds the option whose name matches `name`, ignoring case and
    /// surrounding whitespace on both sides.
    pub fn option_named(&self, name: &str) -> Option<&StatusOption> {
        let wanted = name.trim().to_lowercase();
        self.options
            .iter()
            .find(|option| option.name.trim().to_lowercase() == wanted)
    }

    /// Names of every configured option, in project order.
    pub fn option_names(&self) -> Vec<String> {
        self.options.iter().map(|o| o.name.clone()).collect()
    }
}

/// A project board resolved by organisation and number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProject {
    /// Opaque project node id.
    pub id: ProjectId,
    /// Display title of the project.
    pub title: String,
    /// The "Status" field, if the project has one.
    pub status_field: Option<StatusField>,
}

/// Everything needed to set a single-select value on a project item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSelectUpdate {
    /// Project the item belongs to.
    pub project_id: ProjectId,
    /// Item whose field is updated.
    pub item_id: ProjectItemId,
    /// Single-select field to update.
    pub field_id: FieldId,
    /// Option to select.
    pub option_id: OptionId,
}

// ---------------------------------------------------------------------------
// Run configuration and outcome
// ---------------------------------------------------------------------------

/// Configuration for one synchronisation run.
///
/// Built once by the composition root and passed explicitly to the
/// orchestrator; nothing in the domain reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Organisation that owns the repository and the project.
    pub org: OrgLogin,
    /// Target repository (`owner/repo`).
    pub repo: RepositoryId,
    /// Number of the target project board.
    pub project_number: ProjectNumber,
    /// Status option to set on every created item.
    pub default_status: String,
    /// When set, nothing is created, attached, or updated remotely.
    pub dry_run: bool,
    /// Path of the task list, rendered into each issue body.
    pub json_path: PathBuf,
    /// Pause after each live issue creation.
    pub inter_task_delay: Duration,
    /// How search results are interpreted.
    pub duplicate_matching: DuplicateMatching,
}

impl RunConfig {
    /// Default pause between live creations.
    pub const DEFAULT_INTER_TASK_DELAY: Duration = Duration::from_millis(400);

    /// Default status option name.
    pub const DEFAULT_STATUS: &'static str = "Backlog";
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run correlation id.
    pub run_id: SyncRunId,
    /// Issues created (or that would have been created, in dry-run mode).
    pub created: usize,
    /// Tasks skipped because an issue already exists.
    pub skipped: usize,
}

impl RunSummary {
    /// An empty summary for the given run.
    pub fn new(run_id: SyncRunId) -> Self {
        Self {
            run_id,
            created: 0,
            skipped: 0,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Created: {}, Skipped (duplicates): {}",
            self.created, self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn status_field() -> StatusField {
        StatusField {
            id: FieldId::new("PVTSSF_status").unwrap(),
            name: "Status".to_owned(),
            options: vec![
                StatusOption {
                    id: OptionId::new("opt_backlog").unwrap(),
                    name: "Backlog".to_owned(),
                },
                StatusOption {
                    id: OptionId::new("opt_ready").unwrap(),
                    name: " Ready ".to_owned(),
                },
            ],
        }
    }

    #[rstest]
    #[case("Backlog", "opt_backlog")]
    #[case("backlog", "opt_backlog")]
    #[case("  BACKLOG\t", "opt_backlog")]
    #[case("ready", "opt_ready")]
    fn option_lookup_ignores_case_and_whitespace(
        status_field: StatusField,
        #[case] requested: &str,
        #[case] expected: &str,
    ) {
        let option = status_field.option_named(requested).unwrap();
        assert_eq!(option.id.as_str(), expected);
    }

    #[rstest]
    fn option_lookup_misses_unknown_names(status_field: StatusField) {
        assert!(status_field.option_named("Done").is_none());
        assert_eq!(status_field.option_names(), vec!["Backlog", " Ready "]);
    }

    #[test]
    fn summary_renders_counts() {
        let mut summary = RunSummary::new(SyncRunId::new_random());
        summary.created = 2;
        assert_eq!(summary.to_string(), "Created: 2, Skipped (duplicates): 0");
    }
}
