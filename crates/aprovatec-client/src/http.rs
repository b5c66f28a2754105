//! HTTP implementation of the backend traits.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use aprovatec_core::model::{SemesterPayload, StoredSemester};
use aprovatec_core::traits::{
    AuthBackend, GradesBackend, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    SavedSemester,
};

use crate::config::AprovatecConfig;
use crate::error::{ApiError, DEFAULT_ERROR_MESSAGE};
use crate::session::Session;

/// Client for the grades backend.
///
/// Holds a copy of the session token taken at construction; build a new
/// client after logging in.
pub struct ApiClient {
    base_url: String,
    timeout_secs: u64,
    token: Option<String>,
    client: reqwest::Client,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: &AprovatecConfig, session: &Session) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            token: session.token().map(str::to_string),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn require_token(&self) -> Result<(), ApiError> {
        match self.token.as_deref() {
            Some(t) if !t.is_empty() => Ok(()),
            _ => Err(ApiError::NotAuthenticated),
        }
    }

    /// Send one request and return the decoded JSON body.
    ///
    /// A body whose content type is not JSON, or that fails to parse, is read
    /// as an empty object.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout_secs)
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        let data = if is_json {
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Default::default()))
        } else {
            Value::Object(Default::default())
        };

        tracing::debug!(%method, path, status = status.as_u16(), "backend response");

        if !status.is_success() {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_ERROR_MESSAGE)
                .to_string();
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized(message));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }

    fn decode<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuthBackend for ApiClient {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> anyhow::Result<LoginResponse> {
        let data = self.send(Method::POST, "/auth/login", Some(request)).await?;
        Ok(Self::decode(data)?)
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> anyhow::Result<RegisterResponse> {
        let data = self
            .send(Method::POST, "/auth/register", Some(request))
            .await?;
        Ok(Self::decode(data)?)
    }
}

#[async_trait]
impl GradesBackend for ApiClient {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self))]
    async fn list_semesters(&self) -> anyhow::Result<Vec<StoredSemester>> {
        self.require_token()?;
        let data = self.send::<()>(Method::GET, "/grades", None).await?;
        Ok(Self::decode(data)?)
    }

    #[instrument(skip(self, payload), fields(year = payload.year, term = %payload.term))]
    async fn create_semester(&self, payload: &SemesterPayload) -> anyhow::Result<SavedSemester> {
        self.require_token()?;
        let data = self.send(Method::POST, "/grades", Some(payload)).await?;
        Ok(Self::decode(data)?)
    }

    #[instrument(skip(self, payload), fields(year = payload.year, term = %payload.term))]
    async fn update_semester(
        &self,
        id: &str,
        payload: &SemesterPayload,
    ) -> anyhow::Result<SavedSemester> {
        self.require_token()?;
        let data = self
            .send(Method::PUT, &format!("/grades/{id}"), Some(payload))
            .await?;
        Ok(Self::decode(data)?)
    }

    #[instrument(skip(self))]
    async fn delete_semester(&self, id: &str) -> anyhow::Result<()> {
        self.require_token()?;
        self.send::<()>(Method::DELETE, &format!("/grades/{id}"), None)
            .await?;
        Ok(())
    }
}
