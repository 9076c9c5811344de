//! Rendering tasks into GitHub issues and search queries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{RepositoryId, TaskId, TaskMeta, TaskRecord};

/// The title, body, and label of an issue about to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    /// `[{task_id}] {task_text}`.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Single label applied to the issue.
    pub label: String,
}

impl IssueDraft {
    /// Renders the issue for `task`.
    ///
    /// `json_path` is the task list the issue was generated from; it is quoted
    /// in the body's notes section.
    pub fn for_task(task: &TaskRecord, meta: &TaskMeta, json_path: &Path) -> Self {
        Self {
            title: title_for(&task.id, &task.text),
            body: format!(
                "**Task ID:** {id}\n\
                 **Section:** {section}\n\
                 **Source:** {source}\n\
                 \n\
                 ### What this is\n\
                 {text}\n\
                 \n\
                 ### Notes\n\
                 - Auto-generated from `{path}`\n\
                 - Add details, links, and acceptance criteria as needed.\n",
                id = task.id,
                section = task.section_name,
                source = meta.source,
                text = task.text,
                path = json_path.display(),
            ),
            label: meta.label.clone(),
        }
    }
}

/// Issue title for a task: the bracketed identifier followed by the task text.
pub fn title_for(id: &TaskId, text: &str) -> String {
    format!("[{id}] {text}")
}

/// The bracketed form of an identifier as it appears at the start of a title.
pub fn title_marker(id: &TaskId) -> String {
    format!("[{id}]")
}

/// A GitHub issue-search query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueQuery(String);

impl IssueQuery {
    /// Searches `repo`'s issues for titles containing `id`.
    pub fn title_contains(repo: &RepositoryId, id: &TaskId) -> Self {
        Self(format!(r#"repo:{repo} is:issue "{id}" in:title"#))
    }

    /// Returns the query as a string slice (unencoded).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrgLogin;

    fn task() -> TaskRecord {
        TaskRecord {
            id: TaskId::new("SM-004").unwrap(),
            section_name: "Content".to_owned(),
            text: "Write caption".to_owned(),
        }
    }

    #[test]
    fn draft_renders_title_body_and_label() {
        let meta = TaskMeta {
            id_prefix: "SM".to_owned(),
            label: "Social Media Tasks".to_owned(),
            source: "Launch plan".to_owned(),
        };

        let draft = IssueDraft::for_task(&task(), &meta, Path::new("data/tasks.json"));

        assert_eq!(draft.title, "[SM-004] Write caption");
        assert_eq!(draft.label, "Social Media Tasks");
        assert_eq!(
            draft.body,
            "**Task ID:** SM-004\n\
             **Section:** Content\n\
             **Source:** Launch plan\n\
             \n\
             ### What this is\n\
             Write caption\n\
             \n\
             ### Notes\n\
             - Auto-generated from `data/tasks.json`\n\
             - Add details, links, and acceptance criteria as needed.\n"
        );
    }

    #[test]
    fn query_scopes_to_repository_titles() {
        let org = OrgLogin::new("Community-Chests").unwrap();
        let repo = RepositoryId::from_parts(&org, "Tasks").unwrap();

        let query = IssueQuery::title_contains(&repo, &task().id);

        assert_eq!(
            query.as_str(),
            r#"repo:Community-Chests/Tasks is:issue "SM-004" in:title"#
        );
    }
}
