//! Core domain for issue-sync.
//!
//! This crate contains every domain concept used when synchronising a task list
//! into GitHub Issues and a Projects (v2) board: newtype identifiers, the loaded
//! task list, issue rendering, run configuration, and the port traits the
//! GitHub adapter implements.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no async runtime or
//! HTTP dependencies. It defines *what* is needed; the `github` crate defines
//! *how* to supply it and the `sync` crate sequences the calls.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TaskId`, `ProjectId`, etc.) |
//! | [`types`] | Task list, status field, run configuration and summary |
//! | [`loader`] | Reading and flattening the JSON task list |
//! | [`issue`] | Issue title/body rendering and search queries |
//! | [`ports`] | `IssueTracker` and `ProjectBoard` traits |
//! | [`errors`] | Load, gateway, and run-level error types |

pub mod errors;
pub mod identifiers;
pub mod issue;
pub mod loader;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{GatewayError, LoadError, SyncError};
pub use identifiers::{
    ContentNodeId, FieldId, IssueNumber, OptionId, OrgLogin, ProjectId, ProjectItemId,
    ProjectNumber, RepositoryId, SyncRunId, TaskId,
};
pub use issue::{title_for, title_marker, IssueDraft, IssueQuery};
pub use loader::{load_task_list, parse_task_list};
pub use ports::{IssueTracker, ProjectBoard};
pub use types::{
    CreatedIssue, DuplicateMatching, IssueSearch, ResolvedProject, RunConfig, RunSummary,
    SingleSelectUpdate, StatusField, StatusOption, TaskList, TaskMeta, TaskRecord,
};
