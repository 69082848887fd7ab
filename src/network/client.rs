//! HTTP client wrapper - one method per API endpoint
//!
//! Every call fails with [`ApiError::App`] when the server sent a `{ "message" }`
//! body and with [`ApiError::Unknown`] otherwise. Nothing is retried.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ApiError;
use crate::media::AvatarFile;
use crate::models::{
    AuthSession, CreateUserRequest, Exercise, HistoryDay, HttpMethod, RegisterHistoryRequest,
    SignInRequest, UpdateProfileRequest, User,
};

/// Configured API client: fixed base URL, timeout, optional bearer token
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_url, config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gymtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Base URL joined with percent-encoded path segments
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Unknown(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Unknown(format!("Invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request to `segments` with the session token attached
    pub fn request(&self, method: HttpMethod, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments)?;
        tracing::debug!(method = method.as_str(), %url, "Building request");
        let builder = match method {
            HttpMethod::GET => self.http.get(url),
            HttpMethod::POST => self.http.post(url),
            HttpMethod::PUT => self.http.put(url),
            HttpMethod::PATCH => self.http.patch(url),
        };
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send and turn non-2xx answers into [`ApiError`]
    pub async fn execute(builder: RequestBuilder) -> Result<Response, ApiError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_response_body(status.as_u16(), &body))
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = Self::execute(builder).await?;
        Ok(resp.json::<T>().await?)
    }

    // ========================
    // Auth
    // ========================

    pub async fn sign_in(&self, request: &SignInRequest) -> Result<AuthSession, ApiError> {
        Self::json(self.request(HttpMethod::POST, &["sessions"])?.json(request)).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<(), ApiError> {
        Self::execute(self.request(HttpMethod::POST, &["users"])?.json(request)).await?;
        Ok(())
    }

    // ========================
    // Exercises
    // ========================

    pub async fn groups(&self) -> Result<Vec<String>, ApiError> {
        Self::json(self.request(HttpMethod::GET, &["groups"])?).await
    }

    pub async fn exercises_by_group(&self, group: &str) -> Result<Vec<Exercise>, ApiError> {
        Self::json(self.request(HttpMethod::GET, &["exercises", "bygroup", group])?).await
    }

    pub async fn exercise(&self, exercise_id: &str) -> Result<Exercise, ApiError> {
        Self::json(self.request(HttpMethod::GET, &["exercises", exercise_id])?).await
    }

    // ========================
    // History
    // ========================

    pub async fn register_history(&self, exercise_id: &str) -> Result<(), ApiError> {
        let body = RegisterHistoryRequest {
            exercise_id: exercise_id.to_string(),
        };
        Self::execute(self.request(HttpMethod::POST, &["history"])?.json(&body)).await?;
        Ok(())
    }

    pub async fn history(&self) -> Result<Vec<HistoryDay>, ApiError> {
        Self::json(self.request(HttpMethod::GET, &["history"])?).await
    }

    // ========================
    // Profile
    // ========================

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<(), ApiError> {
        Self::execute(self.request(HttpMethod::PUT, &["users"])?.json(request)).await?;
        Ok(())
    }

    /// `PATCH /users/avatar` as multipart field `avatar`
    pub async fn upload_avatar(&self, avatar: &AvatarFile) -> Result<User, ApiError> {
        let bytes = tokio::fs::read(&avatar.path).await.map_err(|e| {
            ApiError::Unknown(format!("Could not read {}: {}", avatar.path.display(), e))
        })?;
        let part = Part::bytes(bytes)
            .file_name(avatar.file_name.clone())
            .mime_str(&avatar.mime)?;
        let form = Form::new().part("avatar", part);

        Self::json(self.request(HttpMethod::PATCH, &["users", "avatar"])?.multipart(form)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_group_segment() {
        let client = ApiClient::with_base_url("http://localhost:3333/", Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://localhost:3333");
        let url = client.url(&["exercises", "bygroup", "antebraço"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3333/exercises/bygroup/antebra%C3%A7o"
        );
    }

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::with_base_url("https://gym.example.com/api", Duration::from_secs(5));
        let url = client.url(&["groups"]).unwrap();
        assert_eq!(url.as_str(), "https://gym.example.com/api/groups");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ApiClient::with_base_url("not a url", Duration::from_secs(5));
        assert!(matches!(client.url(&["groups"]), Err(ApiError::Unknown(_))));
    }
}
