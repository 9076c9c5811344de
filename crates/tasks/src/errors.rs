//! Error types for the issue-sync domain.
//!
//! [`LoadError`] covers reading the task list. [`GatewayError`] is what the
//! port traits in [`crate::ports`] return; adapters translate their transport
//! errors into it so the orchestration layer never sees HTTP client types.
//! [`SyncError`] is the run-level error: every variant aborts the run.
//!
//! None of these errors is retried. A run that fails partway leaves whatever
//! was already created on GitHub in place.

use std::path::PathBuf;

use thiserror::Error;

use crate::{OrgLogin, ProjectNumber};

// ---------------------------------------------------------------------------
// Task list loading
// ---------------------------------------------------------------------------

/// Failure to read or parse the task list file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read (missing, unreadable).
    #[error("failed to read task list '{}'", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or does not have the task-list shape.
    #[error("task list '{}' is not valid: {source}", path.display())]
    Parse {
        /// Path (or label) of the document that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Remote collaborator errors
// ---------------------------------------------------------------------------

/// Errors surfaced by [`crate::IssueTracker`] and [`crate::ProjectBoard`]
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The remote answered with a non-success HTTP status.
    ///
    /// Covers validation failures (`422`), auth failures (`401`/`403`), and
    /// rate limiting alike; the body is kept verbatim.
    #[error("GitHub returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// A GraphQL response carried an `errors` array.
    #[error("GraphQL request failed: {}", messages.join("; "))]
    GraphQl {
        /// Messages from each reported error.
        messages: Vec<String>,
    },

    /// The request never produced a response (connection, DNS, timeout).
    #[error("request to GitHub failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// A response arrived but did not have the expected shape.
    #[error("unexpected response from GitHub: {message}")]
    Decode {
        /// Description of the decoding problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a synchronisation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The task list could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A remote call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The organisation has no project with the configured number, or the
    /// token cannot see it.
    #[error("project #{number} not found for organisation '{org}'")]
    ProjectNotFound {
        /// Organisation that was queried.
        org: OrgLogin,
        /// Project number that was queried.
        number: ProjectNumber,
    },

    /// The requested status is not one of the project's options.
    #[error("status value '{requested}' not found; available: {available:?}")]
    StatusOptionNotFound {
        /// Status name that was asked for.
        requested: String,
        /// Option names the project actually has.
        available: Vec<String>,
    },

    /// The run configuration is unusable.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// Progress output could not be written.
    #[error("failed to write progress output")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_lists_available_options() {
        let err = SyncError::StatusOptionNotFound {
            requested: "Doing".to_owned(),
            available: vec!["Backlog".to_owned(), "Ready".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            r#"status value 'Doing' not found; available: ["Backlog", "Ready"]"#
        );
    }

    #[test]
    fn graphql_error_joins_messages() {
        let err = GatewayError::GraphQl {
            messages: vec!["first".to_owned(), "second".to_owned()],
        };
        assert_eq!(err.to_string(), "GraphQL request failed: first; second");
    }
}
