//! Command-line and environment configuration.
//!
//! Every setting can come from a flag or an environment variable; flags win.
//! This is the only place in the workspace that reads the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use github::{ApiToken, GithubConfig};
use tasks::{DuplicateMatching, OrgLogin, ProjectNumber, RepositoryId, RunConfig, SyncError};

use crate::logging::LogFormat;

/// Synchronise a JSON task list into GitHub Issues and a Projects (v2) board.
#[derive(Debug, Parser)]
#[command(name = "issue-sync", version, about)]
pub struct Cli {
    /// Organisation that owns the repository and the project.
    #[arg(long, env = "GITHUB_ORG", default_value = "Community-Chests")]
    pub org: String,

    /// Repository that receives the issues.
    #[arg(long, env = "GITHUB_REPO", default_value = "Tasks")]
    pub repo: String,

    /// Project number, as in https://github.com/orgs/{org}/projects/{number}.
    #[arg(long, env = "PROJECT_NUMBER", default_value_t = 1)]
    pub project_number: u64,

    /// Task list to synchronise.
    #[arg(long, env = "TASKS_JSON", default_value = "data/social_media_tasks.json")]
    pub json_path: PathBuf,

    /// Status option to set on created items (matched case-insensitively).
    #[arg(long = "status", env = "PROJECT_STATUS", default_value = RunConfig::DEFAULT_STATUS)]
    pub default_status: String,

    /// Only report what would be created (`1`, `true`, `yes` enable it).
    #[arg(
        long,
        env = "DRY_RUN",
        default_value = "true",
        value_parser = parse_flag,
        action = ArgAction::Set
    )]
    pub dry_run: bool,

    /// GitHub token with `repo` and `project` scopes.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = GithubConfig::DEFAULT_REST_URL)]
    pub api_url: String,

    /// GraphQL endpoint [default: {api-url}/graphql].
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    pub graphql_url: Option<String>,

    /// Pause after each created issue, in milliseconds.
    #[arg(
        long,
        env = "SYNC_DELAY_MS",
        default_value_t = RunConfig::DEFAULT_INTER_TASK_DELAY.as_millis() as u64
    )]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds.
    #[arg(long, default_value_t = GithubConfig::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Treat a search hit as a duplicate only if a title contains `[{task-id}]`.
    #[arg(
        long,
        env = "EXACT_MATCH",
        default_value = "false",
        value_parser = parse_flag,
        action = ArgAction::Set
    )]
    pub exact_match: bool,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Boolean-like strings: `1`, `true`, `yes` (any case) are true, anything else false.
fn parse_flag(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    ))
}

fn config_error(message: impl Into<String>) -> SyncError {
    SyncError::Configuration {
        message: message.into(),
    }
}

impl Cli {
    /// GitHub connection settings.
    ///
    /// # Errors
    ///
    /// [`SyncError::Configuration`] if no token was supplied.
    pub fn github_config(&self) -> Result<GithubConfig, SyncError> {
        let token = self
            .token
            .clone()
            .and_then(ApiToken::new)
            .ok_or_else(|| config_error("Missing GITHUB_TOKEN env var. Set it before running."))?;

        let mut config = GithubConfig::new(token);
        config.rest_url = self.api_url.trim_end_matches('/').to_owned();
        config.graphql_url = self
            .graphql_url
            .clone()
            .unwrap_or_else(|| format!("{}/graphql", config.rest_url));
        config.timeout = Duration::from_secs(self.timeout_secs);
        Ok(config)
    }

    /// Settings for the synchronisation run itself.
    ///
    /// # Errors
    ///
    /// [`SyncError::Configuration`] if the organisation, repository, or status is empty.
    pub fn run_config(&self) -> Result<RunConfig, SyncError> {
        let org = OrgLogin::new(self.org.trim())
            .ok_or_else(|| config_error("organisation must not be empty"))?;
        let repo = RepositoryId::from_parts(&org, self.repo.trim())
            .ok_or_else(|| config_error("repository must not be empty"))?;
        if self.default_status.trim().is_empty() {
            return Err(config_error("status must not be empty"));
        }

        Ok(RunConfig {
            org,
            repo,
            project_number: ProjectNumber::new(self.project_number),
            default_status: self.default_status.clone(),
            dry_run: self.dry_run,
            json_path: self.json_path.clone(),
            inter_task_delay: Duration::from_millis(self.delay_ms),
            duplicate_matching: if self.exact_match {
                DuplicateMatching::ExactTitle
            } else {
                DuplicateMatching::RemoteCount
            },
        })
    }
}
