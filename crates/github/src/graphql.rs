//! [`ProjectBoard`] over the GitHub GraphQL API (Projects v2).

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::json;
use tasks::{
    ContentNodeId, FieldId, GatewayError, OptionId, OrgLogin, ProjectBoard, ProjectId,
    ProjectItemId, ProjectNumber, ResolvedProject, SingleSelectUpdate, StatusField, StatusOption,
};
use tracing::{debug, instrument};

use crate::client::{missing, GithubClient};
use crate::wire::{
    AddItemData, FieldNode, GraphQlRequest, GraphQlResponse, ProjectNode, ProjectQueryData,
};

/// Name of the single-select field the linker drives (matched case-insensitively).
const STATUS_FIELD_NAME: &str = "status";

const PROJECT_QUERY: &str = r#"
query($org: String!, $num: Int!) {
  organization(login: $org) {
    projectV2(number: $num) {
      id
      title
      fields(first: 50) {
        nodes {
          ... on ProjectV2SingleSelectField {
            id
            name
            options { id name }
          }
          ... on ProjectV2FieldCommon {
            id
            name
          }
        }
      }
    }
  }
}
"#;

const ADD_ITEM_MUTATION: &str = r#"
mutation($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item { id }
  }
}
"#;

const SET_SINGLE_SELECT_MUTATION: &str = r#"
mutation($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
  updateProjectV2ItemFieldValue(input: {
    projectId: $projectId,
    itemId: $itemId,
    fieldId: $fieldId,
    value: { singleSelectOptionId: $optionId }
  }) { projectV2Item { id } }
}
"#;

impl GithubClient {
    /// Posts a GraphQL document and returns its `data`.
    ///
    /// A non-empty `errors` array fails the call even when `data` is present.
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GatewayError> {
        let request = self
            .http
            .post(&self.graphql_url)
            .json(&GraphQlRequest { query, variables });
        let response: GraphQlResponse = self.send_json(request).await?;

        if !response.errors.is_empty() {
            return Err(GatewayError::GraphQl {
                messages: response.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        let data = response
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| missing("data"))?;
        serde_json::from_value(data).map_err(|err| GatewayError::Decode {
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl ProjectBoard for GithubClient {
    #[instrument(skip_all, fields(org = %org, number = %number))]
    async fn resolve_project(
        &self,
        org: &OrgLogin,
        number: ProjectNumber,
    ) -> Result<Option<ResolvedProject>, GatewayError> {
        let data: ProjectQueryData = self
            .graphql(
                PROJECT_QUERY,
                json!({ "org": org.as_str(), "num": number.as_u64() }),
            )
            .await?;

        data.organization
            .and_then(|org| org.project_v2)
            .map(resolved_project)
            .transpose()
    }

    #[instrument(skip_all, fields(project_id = %project, content_id = %content))]
    async fn add_project_item(
        &self,
        project: &ProjectId,
        content: &ContentNodeId,
    ) -> Result<ProjectItemId, GatewayError> {
        let data: AddItemData = self
            .graphql(
                ADD_ITEM_MUTATION,
                json!({ "projectId": project.as_str(), "contentId": content.as_str() }),
            )
            .await?;

        ProjectItemId::new(data.add_item.item.id).ok_or_else(|| missing("item.id"))
    }

    #[instrument(skip_all, fields(item_id = %update.item_id, option_id = %update.option_id))]
    async fn set_single_select_value(
        &self,
        update: &SingleSelectUpdate,
    ) -> Result<(), GatewayError> {
        let _: IgnoredAny = self
            .graphql(
                SET_SINGLE_SELECT_MUTATION,
                json!({
                    "projectId": update.project_id.as_str(),
                    "itemId": update.item_id.as_str(),
                    "fieldId": update.field_id.as_str(),
                    "optionId": update.option_id.as_str(),
                }),
            )
            .await?;
        Ok(())
    }
}

fn resolved_project(node: ProjectNode) -> Result<ResolvedProject, GatewayError> {
    let status_field = node
        .fields
        .nodes
        .into_iter()
        .flatten()
        .find(is_status_field)
        .map(to_status_field)
        .transpose()?;
    debug!(title = %node.title, has_status_field = status_field.is_some(), "decoded project");

    Ok(ResolvedProject {
        id: ProjectId::new(node.id).ok_or_else(|| missing("projectV2.id"))?,
        title: node.title,
        status_field,
    })
}

fn is_status_field(field: &FieldNode) -> bool {
    field.options.is_some()
        && field
            .name
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == STATUS_FIELD_NAME)
}

fn to_status_field(field: FieldNode) -> Result<StatusField, GatewayError> {
    let options = field
        .options
        .unwrap_or_default()
        .into_iter()
        .map(|option| {
            Ok(StatusOption {
                id: OptionId::new(option.id).ok_or_else(|| missing("options.id"))?,
                name: option.name,
            })
        })
        .collect::<Result<Vec<_>, GatewayError>>()?;

    Ok(StatusField {
        id: field
            .id
            .and_then(FieldId::new)
            .ok_or_else(|| missing("field.id"))?,
        name: field.name.unwrap_or_default(),
        options,
    })
}
