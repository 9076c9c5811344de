//! Request and response bodies exchanged with GitHub.
//!
//! Only the fields the adapter reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// REST
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssuesResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchIssueItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchIssueItem {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateIssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub labels: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateIssueResponse {
    pub node_id: String,
    pub number: u64,
    pub html_url: String,
}

// ---------------------------------------------------------------------------
// GraphQL envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// `data` stays untyped until `errors` has been checked: a failed mutation
/// comes back as HTTP 200 with partial data such as `{"addProjectV2ItemById": null}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorEntry {
    pub message: String,
}

// ---------------------------------------------------------------------------
// GraphQL payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectQueryData {
    pub organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationNode {
    #[serde(rename = "projectV2")]
    pub project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectNode {
    pub id: String,
    pub title: String,
    pub fields: FieldConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldConnection {
    #[serde(default)]
    pub nodes: Vec<Option<FieldNode>>,
}

/// A project field. Fields that are neither single-select nor expose the
/// common interface arrive as `{}`, hence every member is optional.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<FieldOptionNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FieldOptionNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddItemData {
    #[serde(rename = "addProjectV2ItemById")]
    pub add_item: AddItemPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddItemPayload {
    pub item: ItemNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemNode {
    pub id: String,
}
