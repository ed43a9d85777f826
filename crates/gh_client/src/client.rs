use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use common::config::GithubConfig;
use http::{header, Request, StatusCode};
use normalizer::payloads::{ProfilePayload, RepoPayload};
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::GithubApiError;
use crate::exec::HttpExec;
use crate::metrics;

/// Read access to the upstream GitHub REST API. One attempt per call,
/// classification into [`GithubApiError`] at the point of failure.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Fetches the profile. `Ok(None)` means the upstream answered
    /// 2xx with an absent payload; downstream decides whether absence
    /// is terminal.
    async fn get_profile(&self, username: &str) -> Result<Option<ProfilePayload>, GithubApiError>;

    /// Fetches the repository list. An absent or empty upstream body
    /// yields an empty vec, never an absent value.
    async fn list_repos(&self, username: &str) -> Result<Vec<RepoPayload>, GithubApiError>;
}

pub struct RestGithubClient {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_path: String,
    repos_path: String,
    user_agent: String,
}

impl RestGithubClient {
    pub fn new(exec: Arc<dyn HttpExec>, config: &GithubConfig) -> Result<Self> {
        Ok(Self {
            exec,
            base: Url::parse(&config.base_url)?,
            user_path: config.user_path.clone(),
            repos_path: config.repos_path.clone(),
            user_agent: config.user_agent.clone(),
        })
    }

    fn endpoint(&self, template: &str, username: &str) -> Result<Url, GithubApiError> {
        let path = template.replace("{username}", username);
        self.base
            .join(&path)
            .map_err(|err| GithubApiError::unavailable(format!("invalid endpoint '{path}': {err}")))
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn get_value(&self, url: Url, username: &str) -> Result<Value, GithubApiError> {
        let endpoint = url.path().trim_start_matches('/').to_string();
        debug!(endpoint = %endpoint, username, "dispatching github request");

        let uri: http::Uri = url
            .as_str()
            .parse()
            .map_err(|err| GithubApiError::unavailable(format!("invalid uri: {err}")))?;
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::USER_AGENT, self.user_agent.clone())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .body(Vec::new())
            .map_err(|err| GithubApiError::unavailable(err.to_string()))?;

        let response = self
            .exec
            .execute(request)
            .await
            .map_err(|err| GithubApiError::unavailable(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(endpoint = %endpoint, username, "github returned 404");
            return Err(GithubApiError::not_found(username));
        }
        if !status.is_success() {
            warn!(endpoint = %endpoint, username, status = %status, "github returned error response");
            return Err(GithubApiError::unavailable(format!(
                "unexpected status {status} for {endpoint}"
            )));
        }

        let body = response.into_body();
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|err| {
            GithubApiError::unavailable(format!("malformed response body for {endpoint}: {err}"))
        })
    }

    async fn get_measured(
        &self,
        op: &'static str,
        url: Url,
        username: &str,
    ) -> Result<Value, GithubApiError> {
        let start = Instant::now();
        let result = self.get_value(url, username).await;
        let outcome = if result.is_ok() { "success" } else { "error" };
        metrics::UPSTREAM_REQUESTS_TOTAL
            .with_label_values(&[op, outcome])
            .inc();
        metrics::UPSTREAM_LATENCY_SECONDS
            .with_label_values(&[op])
            .observe(start.elapsed().as_secs_f64());
        result
    }
}

#[async_trait]
impl GithubClient for RestGithubClient {
    async fn get_profile(&self, username: &str) -> Result<Option<ProfilePayload>, GithubApiError> {
        let url = self.endpoint(&self.user_path, username)?;
        let value = self.get_measured("profile", url, username).await?;
        match value {
            Value::Null => Ok(None),
            other => serde_json::from_value(other)
                .map(Some)
                .map_err(|err| {
                    GithubApiError::unavailable(format!("malformed profile payload: {err}"))
                }),
        }
    }

    async fn list_repos(&self, username: &str) -> Result<Vec<RepoPayload>, GithubApiError> {
        let url = self.endpoint(&self.repos_path, username)?;
        let value = self.get_measured("repos", url, username).await?;
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(_) => serde_json::from_value(value).map_err(|err| {
                GithubApiError::unavailable(format!("malformed repo payload: {err}"))
            }),
            _ => Err(GithubApiError::unavailable("expected array response")),
        }
    }
}
