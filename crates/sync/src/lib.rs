//! Issue-sync orchestration layer.
//!
//! This crate provides the four run-time components of a synchronisation run:
//! the [`DuplicateChecker`], the [`IssueCreator`], the [`ProjectLinker`], and
//! the [`SyncOrchestrator`] that drives them over a loaded task list.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Components sequence calls between the domain in the
//! [`tasks`] crate and the port traits ([`tasks::IssueTracker`],
//! [`tasks::ProjectBoard`]). They contain no HTTP details.
//!
//! ## Execution Model
//!
//! Strictly sequential: one task at a time, one remote call at a time. The only
//! pause is a fixed delay after each live issue creation. Nothing is retried.

mod checker;
mod creator;
mod linker;
mod orchestrator;

#[cfg(test)]
mod test_support;

pub use checker::DuplicateChecker;
pub use creator::{CreationOutcome, IssueCreator};
pub use linker::ProjectLinker;
pub use orchestrator::SyncOrchestrator;
