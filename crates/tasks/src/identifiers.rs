//! Newtype domain identifiers.
//!
//! Every concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging (for example)
//! a [`ProjectId`] with a [`ProjectItemId`] even though GitHub hands both out as
//! opaque node-id strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Macro for u64-wrapped newtypes (GitHub-assigned integers).
// Generates: struct (Copy), new(), as_u64(), Display.
// ---------------------------------------------------------------------------
macro_rules! u64_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new identifier from a raw integer.
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying integer value.
            pub fn as_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub-integer-backed
// ---------------------------------------------------------------------------

u64_id! {
    /// The repository-scoped number GitHub assigns to a created issue (`#42`).
    IssueNumber
}

u64_id! {
    /// The organisation-scoped number of a Projects (v2) board, as seen in
    /// `https://github.com/orgs/{org}/projects/{number}`.
    ProjectNumber
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single synchronisation run (one invocation of the binary).
///
/// Generated fresh for every run and attached to the root tracing span so all
/// activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRunId(Uuid);

impl SyncRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SyncRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: String-backed (task list / configuration)
// ---------------------------------------------------------------------------

string_id! {
    /// Stable identifier of a task within the task list (e.g. `"SM-001"`).
    ///
    /// Derived purely from document order; never from remote state.
    TaskId
}

impl TaskId {
    /// Builds the identifier for the `counter`-th task (1-based) under `prefix`.
    ///
    /// The counter is zero-padded to three digits and widens beyond 999.
    pub fn sequential(prefix: &str, counter: usize) -> Self {
        Self(format!("{prefix}-{counter:03}"))
    }
}

string_id! {
    /// A GitHub organisation login (e.g. `"Community-Chests"`).
    OrgLogin
}

string_id! {
    /// Identifies a GitHub repository in `"owner/repo"` format.
    RepositoryId
}

impl RepositoryId {
    /// Joins an owner and repository name into an `"owner/repo"` identifier.
    ///
    /// Returns `None` if `name` is empty.
    pub fn from_parts(owner: &OrgLogin, name: &str) -> Option<Self> {
        if name.is_empty() {
            None
        } else {
            Some(Self(format!("{owner}/{name}")))
        }
    }

    /// The owner half of the identifier.
    pub fn owner(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(owner, _)| owner)
    }

    /// The repository-name half of the identifier.
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(_, name)| name)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub GraphQL node ids (opaque strings)
// ---------------------------------------------------------------------------

string_id! {
    /// Opaque node id of a Projects (v2) board.
    ProjectId
}

string_id! {
    /// Opaque node id of an item on a project board.
    ProjectItemId
}

string_id! {
    /// Opaque node id of an issue, used as the `contentId` when adding it to a project.
    ContentNodeId
}

string_id! {
    /// Opaque node id of a project field.
    FieldId
}

string_id! {
    /// Opaque id of one option of a single-select project field.
    OptionId
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SM", 1, "SM-001")]
    #[case("SM", 42, "SM-042")]
    #[case("OPS", 999, "OPS-999")]
    #[case("SM", 1000, "SM-1000")]
    fn sequential_task_ids_are_zero_padded(
        #[case] prefix: &str,
        #[case] counter: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(TaskId::sequential(prefix, counter).as_str(), expected);
    }

    #[test]
    fn string_ids_reject_empty_values() {
        assert!(TaskId::new("").is_none());
        assert!(ProjectId::new("").is_none());
        assert_eq!(OptionId::new("opt_1").map(|o| o.to_string()), Some("opt_1".to_owned()));
    }

    #[test]
    fn run_ids_are_fresh_hyphenated_uuids() {
        let first = SyncRunId::new_random();
        let second = SyncRunId::new_random();

        assert_ne!(first, second);
        assert_eq!(first.to_string().len(), 36);
        assert_eq!(first.to_string().matches('-').count(), 4);
    }

    #[test]
    fn repository_id_splits_into_owner_and_name() {
        let owner = OrgLogin::new("Community-Chests").unwrap();
        let repo = RepositoryId::from_parts(&owner, "Tasks").unwrap();

        assert_eq!(repo.as_str(), "Community-Chests/Tasks");
        assert_eq!(repo.owner(), "Community-Chests");
        assert_eq!(repo.name(), "Tasks");
        assert!(RepositoryId::from_parts(&owner, "").is_none());
    }
}
