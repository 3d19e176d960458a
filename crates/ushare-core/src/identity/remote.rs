//! GoTrue-compatible identity client (`/auth/v1/*`).

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::http::{self, HttpResponse, Method};
use super::{IdentityProvider, SignUpOutcome, SignUpRequest};
use crate::config::IdentityConfig;
use crate::model::{Account, AuthSession};

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

/// Sign-up answers with a session when auto-confirm is on, or with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(RemoteUser),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl From<RemoteUser> for Account {
    fn from(user: RemoteUser) -> Self {
        let email = user.email.unwrap_or_default();
        let handle = user
            .user_metadata
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        Account {
            id: user.id,
            handle,
            email,
        }
    }
}

impl From<TokenResponse> for AuthSession {
    fn from(token: TokenResponse) -> Self {
        AuthSession {
            access_token: token.access_token,
            user: token.user.into(),
        }
    }
}

/// Client for a remote identity service.
#[derive(Debug, Clone)]
pub struct RemoteIdentity {
    base_url: String,
    api_key: String,
}

impl RemoteIdentity {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(cfg: &IdentityConfig) -> Self {
        Self::new(cfg.effective_base_url(), cfg.effective_api_key())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn headers(&self, bearer: Option<&str>) -> Vec<String> {
        let mut headers = vec![
            format!("apikey: {}", self.api_key),
            "Content-Type: application/json".to_string(),
            "Accept: application/json".to_string(),
        ];
        headers.push(format!(
            "Authorization: Bearer {}",
            bearer.unwrap_or(self.api_key.as_str())
        ));
        headers
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let url = self.endpoint(path);
        let headers = self.headers(bearer);
        let body = body.map(|b| serde_json::to_vec(&b)).transpose()?;
        tracing::debug!(?method, %url, "identity request");
        let response =
            tokio::task::spawn_blocking(move || http::send(method, &url, &headers, body.as_deref()))
                .await??;
        tracing::debug!(status = response.status, "identity response");
        Ok(response)
    }
}

/// Turns a non-2xx response into an error carrying the service's message.
fn ensure_success(response: HttpResponse, action: &str) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let body: ErrorBody = serde_json::from_slice(&response.body).unwrap_or_default();
    let message = body
        .error_description
        .or(body.msg)
        .or(body.message)
        .or(body.error)
        .unwrap_or_else(|| "no details".to_string());
    anyhow::bail!("{action} failed (HTTP {}): {message}", response.status)
}

#[async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": { "username": request.handle },
        });
        let response = self.call(Method::Post, "signup", None, Some(body)).await?;
        let response = ensure_success(response, "sign up")?;
        let parsed: SignUpResponse =
            serde_json::from_slice(&response.body).context("unexpected sign-up response")?;
        Ok(match parsed {
            SignUpResponse::Session(token) => SignUpOutcome::SignedIn(token.into()),
            SignUpResponse::User(user) => SignUpOutcome::ConfirmationRequired(user.into()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let body = json!({ "email": email, "password": password });
        let response = self
            .call(Method::Post, "token?grant_type=password", None, Some(body))
            .await?;
        let response = ensure_success(response, "sign in")?;
        let token: TokenResponse =
            serde_json::from_slice(&response.body).context("unexpected sign-in response")?;
        Ok(token.into())
    }

    async fn sign_out(&self, session: &AuthSession) -> Result<()> {
        let response = self
            .call(Method::Post, "logout", Some(session.access_token.as_str()), None)
            .await?;
        ensure_success(response, "sign out")?;
        Ok(())
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<Account>> {
        let response = self
            .call(Method::Get, "user", Some(access_token), None)
            .await?;
        if matches!(response.status, 401 | 403) {
            return Ok(None);
        }
        let response = ensure_success(response, "fetch user")?;
        let user: RemoteUser =
            serde_json::from_slice(&response.body).context("unexpected user response")?;
        Ok(Some(user.into()))
    }
}
