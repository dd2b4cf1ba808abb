//! Typed calls for the backend's user routes.
//!
//! Signin stores the returned session; logout clears it. All calls go
//! through `ApiClient`, so they get the same retries and notifications.

use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiResult};
use crate::credentials::{Credentials, User};
use crate::http::ApiRequest;
use crate::transport::Transport;

pub const SIGNUP_PATH: &str = "/api/v1/user/signup";
pub const SIGNIN_PATH: &str = "/api/v1/user/signin";
pub const ME_PATH: &str = "/api/v1/user/me";

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by signup and signin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: User,
}

/// User-route helpers bound to a client.
pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Register an account. A token in the response signs the user in.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<AuthResponse> {
        let response: AuthResponse = self.client.post_json(SIGNUP_PATH, request).await?;
        self.remember(&response)?;
        Ok(response)
    }

    /// Sign in and store the session.
    pub async fn signin(&self, request: &SigninRequest) -> ApiResult<AuthResponse> {
        let response: AuthResponse = self.client.post_json(SIGNIN_PATH, request).await?;
        self.remember(&response)?;
        Ok(response)
    }

    /// Fetch the signed-in user; requires a stored token.
    pub async fn me(&self) -> ApiResult<User> {
        let response: MeResponse = self.client.send_json(&ApiRequest::get(ME_PATH)).await?;
        Ok(response.user)
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.client.store().clear()?;
        Ok(())
    }

    fn remember(&self, response: &AuthResponse) -> ApiResult<()> {
        let Some(token) = response.token.clone() else {
            return Ok(());
        };
        tracing::info!(
            email = response.user.as_ref().map(|u| u.email.as_str()).unwrap_or("unknown"),
            "Session stored"
        );
        self.client
            .store()
            .set(Credentials {
                token,
                user: response.user.clone(),
            })?;
        Ok(())
    }
}
