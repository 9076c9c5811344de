//! Test doubles for the port traits.
//!
//! [`MockGitHub`] is a `mockall` mock for call-count assertions on a single
//! component. [`FakeGitHub`] is an in-memory stand-in that behaves like a small
//! GitHub repository and project, recording every call it receives.

use std::sync::Mutex;

use async_trait::async_trait;
use tasks::{
    ContentNodeId, CreatedIssue, FieldId, GatewayError, IssueDraft, IssueNumber, IssueQuery,
    IssueSearch, IssueTracker, OptionId, OrgLogin, ProjectBoard, ProjectId, ProjectItemId,
    ProjectNumber, RepositoryId, ResolvedProject, SingleSelectUpdate, StatusField, StatusOption,
};

mockall::mock! {
    pub GitHub {}

    #[async_trait]
    impl IssueTracker for GitHub {
        async fn search_issues(&self, query: &IssueQuery) -> Result<IssueSearch, GatewayError>;
        async fn create_issue(
            &self,
            repo: &RepositoryId,
            draft: &IssueDraft,
        ) -> Result<CreatedIssue, GatewayError>;
    }

    #[async_trait]
    impl ProjectBoard for GitHub {
        async fn resolve_project(
            &self,
            org: &OrgLogin,
            number: ProjectNumber,
        ) -> Result<Option<ResolvedProject>, GatewayError>;
        async fn add_project_item(
            &self,
            project: &ProjectId,
            content: &ContentNodeId,
        ) -> Result<ProjectItemId, GatewayError>;
        async fn set_single_select_value(
            &self,
            update: &SingleSelectUpdate,
        ) -> Result<(), GatewayError>;
    }
}

pub fn org() -> OrgLogin {
    OrgLogin::new("Community-Chests").unwrap()
}

pub fn repo() -> RepositoryId {
    RepositoryId::from_parts(&org(), "Tasks").unwrap()
}

pub fn status_field() -> StatusField {
    let option = |id: &str, name: &str| StatusOption {
        id: OptionId::new(id).unwrap(),
        name: name.to_owned(),
    };
    StatusField {
        id: FieldId::new("PVTSSF_status").unwrap(),
        name: "Status".to_owned(),
        options: vec![
            option("opt_backlog", "Backlog"),
            option("opt_ready", "Ready"),
            option("opt_done", "Done"),
        ],
    }
}

pub fn project_with_status() -> ResolvedProject {
    ResolvedProject {
        id: ProjectId::new("PVT_project").unwrap(),
        title: "Community Tasks".to_owned(),
        status_field: Some(status_field()),
    }
}

/// A remote call observed by [`FakeGitHub`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Resolve,
    Search(String),
    Create(String),
    AddItem(String),
    SetStatus(String),
}

#[derive(Debug, Default)]
struct FakeState {
    titles: Vec<String>,
    calls: Vec<Call>,
}

/// In-memory repository and project.
///
/// Search mimics the remote index's loose matching: any existing title that
/// contains the quoted identifier counts, so `SM-1` also finds `[SM-10] ...`.
#[derive(Debug)]
pub struct FakeGitHub {
    project: Option<ResolvedProject>,
    state: Mutex<FakeState>,
}

impl FakeGitHub {
    pub fn new(project: Option<ResolvedProject>) -> Self {
        Self {
            project,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_existing_titles(self, titles: &[&str]) -> Self {
        self.state.lock().unwrap().titles = titles.iter().map(|t| (*t).to_owned()).collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }
}

fn quoted_term(query: &str) -> &str {
    query.split('"').nth(1).unwrap_or_default()
}

#[async_trait]
impl IssueTracker for FakeGitHub {
    async fn search_issues(&self, query: &IssueQuery) -> Result<IssueSearch, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Search(query.as_str().to_owned()));
        let term = quoted_term(query.as_str());
        let titles: Vec<String> = state
            .titles
            .iter()
            .filter(|t| t.contains(term))
            .cloned()
            .collect();
        Ok(IssueSearch {
            total_count: titles.len() as u64,
            titles,
        })
    }

    async fn create_issue(
        &self,
        repo: &RepositoryId,
        draft: &IssueDraft,
    ) -> Result<CreatedIssue, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(draft.title.clone()));
        state.titles.push(draft.title.clone());
        let number = state.titles.len() as u64;
        Ok(CreatedIssue {
            content_id: ContentNodeId::new(format!("I_{number}")).unwrap(),
            number: IssueNumber::new(number),
            url: format!("https://github.com/{repo}/issues/{number}"),
        })
    }
}

#[async_trait]
impl ProjectBoard for FakeGitHub {
    async fn resolve_project(
        &self,
        _org: &OrgLogin,
        _number: ProjectNumber,
    ) -> Result<Option<ResolvedProject>, GatewayError> {
        self.state.lock().unwrap().calls.push(Call::Resolve);
        Ok(self.project.clone())
    }

    async fn add_project_item(
        &self,
        _project: &ProjectId,
        content: &ContentNodeId,
    ) -> Result<ProjectItemId, GatewayError> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::AddItem(content.to_string()));
        Ok(ProjectItemId::new(format!("PVTI_{content}")).unwrap())
    }

    async fn set_single_select_value(
        &self,
        update: &SingleSelectUpdate,
    ) -> Result<(), GatewayError> {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(Call::SetStatus(update.option_id.to_string()));
        Ok(())
    }
}
