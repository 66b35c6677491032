//! Typed auth endpoints: login, registration, the current-user record, and
//! role selection.

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::models::user::{RoleSelection, User};

use super::ApiClient;

const LOGIN_ENDPOINT: &str = "/auth/login";
const REGISTER_ENDPOINT: &str = "/auth/register";
const ME_ENDPOINT: &str = "/auth/me";
const ROLE_ENDPOINT: &str = "/users/me/role";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

impl From<RoleSelection> for RoleUpdateRequest {
    fn from(selection: RoleSelection) -> Self {
        Self {
            role: selection.wire_value().to_string(),
        }
    }
}

impl ApiClient {
    /// Exchanges credentials for a bearer token. The token is written to the
    /// session store as a side effect, so every subsequent request on this
    /// client (and any other client sharing the store) is authenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ClientError> {
        let token: TokenResponse = self
            .post_json(LOGIN_ENDPOINT, &LoginRequest { email, password })
            .await?;
        self.session().set_access_token(&token.access_token);
        Ok(token)
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<User, ClientError> {
        self.post_json(REGISTER_ENDPOINT, req).await
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.get(ME_ENDPOINT).await
    }

    /// Issues the role-update request. The wire value comes from the fixed
    /// selection mapping (employer is `RECRUITER` server-side).
    pub async fn update_role(&self, selection: RoleSelection) -> Result<User, ClientError> {
        self.patch_json(ROLE_ENDPOINT, &RoleUpdateRequest::from(selection))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employer_selection_serializes_as_recruiter() {
        let req = RoleUpdateRequest::from(RoleSelection::Employer);
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"role": "RECRUITER"}));
    }

    #[test]
    fn test_candidate_selection_serializes_as_candidate() {
        let req = RoleUpdateRequest::from(RoleSelection::Candidate);
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"role": "CANDIDATE"}));
    }

    #[test]
    fn test_token_response_deserializes() {
        let json = r#"{"access_token": "tok-123", "token_type": "bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok-123");
        assert_eq!(token.token_type, "bearer");
    }

    #[test]
    fn test_login_request_shape() {
        let req = LoginRequest {
            email: "dev@example.com",
            password: "hunter2",
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "dev@example.com", "password": "hunter2"})
        );
    }
}
