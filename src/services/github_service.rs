use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::GithubConfig;

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("github returned status {0}")]
    UpstreamStatus(StatusCode),
    #[error("github request failed: {0}")]
    Transport(reqwest::Error),
    #[error("invalid github response body: {0}")]
    Decode(reqwest::Error),
}

/// Thin proxy over the GitHub repositories API. The response body is passed
/// through verbatim; callers map errors to client-facing statuses.
pub struct GithubService {
    http: reqwest::Client,
    config: GithubConfig,
}

impl GithubService {
    pub fn new(http: reqwest::Client, config: GithubConfig) -> Self {
        Self { http, config }
    }

    /// Up to 5 of the user's repositories, sorted by creation order.
    pub async fn user_repos(&self, username: &str) -> Result<Value, GithubError> {
        let url = format!(
            "{}/users/{}/repos",
            self.config.api_base.trim_end_matches('/'),
            username
        );

        let mut query: Vec<(&str, String)> = vec![
            ("per_page", "5".to_string()),
            ("sort", "created:asc".to_string()),
        ];
        if !self.config.client_id.is_empty() {
            query.push(("client_id", self.config.client_id.clone()));
            query.push(("client_secret", self.config.client_secret.clone()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .header(USER_AGENT, "profile-api")
            .send()
            .await
            .map_err(GithubError::Transport)?;

        if response.status() != StatusCode::OK {
            return Err(GithubError::UpstreamStatus(response.status()));
        }

        response.json::<Value>().await.map_err(GithubError::Decode)
    }
}
