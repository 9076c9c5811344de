//! Task list loading.
//!
//! The task list is a JSON document of the shape
//!
//! ```json
//! {
//!   "meta": { "id_prefix": "SM", "label": "Social Media Tasks", "source": "Q3 plan" },
//!   "sections": [ { "name": "Content", "tasks": ["Write caption", "Schedule post"] } ]
//! }
//! ```
//!
//! Sections are flattened in document order and every task is given a
//! sequential [`TaskId`] (`SM-001`, `SM-002`, ...). The numbering depends only on
//! the document, so loading an unchanged file always yields the same ids.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{LoadError, TaskId, TaskList, TaskMeta, TaskRecord};

#[derive(Debug, Default, Deserialize)]
struct TaskDocument {
    #[serde(default)]
    meta: MetaDocument,
    #[serde(default)]
    sections: Vec<SectionDocument>,
}

#[derive(Debug, Default, Deserialize)]
struct MetaDocument {
    #[serde(default)]
    id_prefix: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SectionDocument {
    name: String,
    #[serde(default)]
    tasks: Vec<String>,
}

impl From<MetaDocument> for TaskMeta {
    fn from(doc: MetaDocument) -> Self {
        let defaults = TaskMeta::default();
        Self {
            id_prefix: doc.id_prefix.unwrap_or(defaults.id_prefix),
            label: doc.label.unwrap_or(defaults.label),
            source: doc.source.unwrap_or(defaults.source),
        }
    }
}

/// Reads and flattens the task list at `path`.
///
/// # Errors
///
/// [`LoadError::Read`] if the file cannot be read, [`LoadError::Parse`] if it is
/// not a valid task-list document.
pub fn load_task_list(path: &Path) -> Result<TaskList, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_task_list(&raw, path)
}

/// Parses a task-list document already held in memory.
///
/// `origin` is only used to label errors.
///
/// # Errors
///
/// [`LoadError::Parse`] if `raw` is not a valid task-list document.
pub fn parse_task_list(raw: &str, origin: &Path) -> Result<TaskList, LoadError> {
    let document: TaskDocument =
        serde_json::from_str(raw).map_err(|source| LoadError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
    Ok(flatten(document))
}

fn flatten(document: TaskDocument) -> TaskList {
    let meta = TaskMeta::from(document.meta);

    let tasks: Vec<TaskRecord> = document
        .sections
        .into_iter()
        .flat_map(|section| {
            let name = section.name;
            section
                .tasks
                .into_iter()
                .map(move |text| (name.clone(), text))
        })
        .enumerate()
        .map(|(index, (section_name, text))| TaskRecord {
            id: TaskId::sequential(&meta.id_prefix, index + 1),
            section_name,
            text,
        })
        .collect();

    debug!(prefix = %meta.id_prefix, count = tasks.len(), "flattened task list");
    TaskList { meta, tasks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    fn parse(raw: &str) -> TaskList {
        parse_task_list(raw, Path::new("inline.json")).unwrap()
    }

    fn ids(list: &TaskList) -> Vec<&str> {
        list.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn numbers_tasks_across_sections_in_document_order() {
        let list = parse(
            r#"{
                "meta": {"id_prefix": "SM", "label": "Social", "source": "Plan"},
                "sections": [
                    {"name": "Content", "tasks": ["Write caption", "Schedule post"]},
                    {"name": "Empty", "tasks": []},
                    {"name": "Outreach", "tasks": ["DM partners"]}
                ]
            }"#,
        );

        assert_eq!(ids(&list), vec!["SM-001", "SM-002", "SM-003"]);
        assert_eq!(list.tasks[1].section_name, "Content");
        assert_eq!(list.tasks[1].text, "Schedule post");
        assert_eq!(list.tasks[2].section_name, "Outreach");
        assert_eq!(list.meta.label, "Social");
        assert_eq!(list.meta.source, "Plan");
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(120)]
    fn produces_one_record_per_task(#[case] per_section: usize) {
        let tasks: Vec<String> = (0..per_section).map(|i| format!("task {i}")).collect();
        let doc = serde_json::json!({
            "meta": {"id_prefix": "OPS"},
            "sections": [
                {"name": "a", "tasks": tasks},
                {"name": "b", "tasks": tasks},
            ]
        });

        let list = parse(&doc.to_string());

        let total = per_section * 2;
        assert_eq!(list.len(), total);
        assert_eq!(list.tasks[0].id.as_str(), "OPS-001");
        assert_eq!(
            list.tasks[total - 1].id.as_str(),
            format!("OPS-{total:03}")
        );
    }

    #[test]
    fn missing_meta_and_sections_default_to_empty() {
        let list = parse("{}");

        assert!(list.is_empty());
        assert_eq!(list.meta, TaskMeta::default());
    }

    #[test]
    fn missing_meta_fields_take_defaults() {
        let list = parse(r#"{"meta": {"label": "Ops"}, "sections": [{"name": "x"}, {"name": "y", "tasks": ["one"]}]}"#);

        assert_eq!(ids(&list), vec!["SM-001"]);
        assert_eq!(list.meta.label, "Ops");
        assert_eq!(list.meta.source, TaskMeta::DEFAULT_SOURCE);
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::wrong_shape(r#"{"sections": "nope"}"#)]
    #[case::unnamed_section(r#"{"sections": [{"tasks": ["a"]}]}"#)]
    fn invalid_documents_are_parse_errors(#[case] raw: &str) {
        let err = parse_task_list(raw, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_task_list(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn reloading_the_same_file_is_deterministic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sections": [{{"name": "A", "tasks": ["x", "y"]}}, {{"name": "B", "tasks": ["z"]}}]}}"#
        )
        .unwrap();

        let first = load_task_list(file.path()).unwrap();
        let second = load_task_list(file.path()).unwrap();

        assert_eq!(first, second);
        assert_eq!(ids(&first), vec!["SM-001", "SM-002", "SM-003"]);
    }
}
