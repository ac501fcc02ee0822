//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UsersClient` holds a `base_url` and an optional bearer token provider,
//! and carries no mutable state between calls. Each CRUD operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. The caller executes the actual
//! HTTP round-trip, keeping the core deterministic and free of I/O
//! dependencies.
//!
//! When a token provider is configured it is invoked once per `build_*`
//! call, never cached, so rotating tokens are picked up on the next request.

use std::fmt;
use std::sync::Arc;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{User, UserPayload};

/// Callback producing a fresh bearer token for one outbound request.
pub type TokenProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Synchronous, stateless client for the users API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Clone)]
pub struct UsersClient {
    base_url: String,
    token_provider: Option<TokenProvider>,
}

impl fmt::Debug for UsersClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsersClient")
            .field("base_url", &self.base_url)
            .field("token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_provider: None,
        }
    }

    /// Attach a token provider consulted before every request. The provider
    /// is called fresh per request and its value is sent as
    /// `authorization: Bearer <token>`.
    pub fn with_token_provider(mut self, provider: TokenProvider) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Headers common to every request: the bearer credential, if configured.
    fn auth_headers(&self) -> Vec<(String, String)> {
        match &self.token_provider {
            Some(provider) => vec![(
                "authorization".to_string(),
                format!("Bearer {}", provider()),
            )],
            None => Vec::new(),
        }
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = self.auth_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        headers
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users/{id}", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &UserPayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/users", self.base_url),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_user(&self, id: u64, input: &UserPayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/users/{id}", self.base_url),
            headers: self.json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/users/{id}", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_update_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)?;
        Ok(())
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn client() -> UsersClient {
        UsersClient::new("http://localhost:3000")
    }

    #[test]
    fn build_list_users_produces_correct_request() {
        let req = client().build_list_users();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_user_produces_correct_request() {
        let req = client().build_get_user(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/users/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_user_produces_correct_request() {
        let input = UserPayload {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
        };
        let req = client().build_create_user(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/users");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["email"], "alice@x.com");
    }

    #[test]
    fn build_update_user_produces_correct_request() {
        let input = UserPayload {
            name: "Updated".to_string(),
            email: "updated@x.com".to_string(),
        };
        let req = client().build_update_user(3, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/users/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Updated");
    }

    #[test]
    fn build_delete_user_produces_correct_request() {
        let req = client().build_delete_user(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/users/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn token_provider_attaches_bearer_header() {
        let c = client().with_token_provider(Arc::new(|| "secret".to_string()));
        let req = c.build_get_user(1);
        assert_eq!(
            req.headers,
            vec![("authorization".to_string(), "Bearer secret".to_string())]
        );
    }

    #[test]
    fn token_provider_is_invoked_fresh_per_request() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let c = client().with_token_provider(Arc::new(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            format!("token-{n}")
        }));

        let first = c.build_list_users();
        let second = c.build_list_users();
        assert_eq!(first.headers[0].1, "Bearer token-0");
        assert_eq!(second.headers[0].1, "Bearer token-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn token_provider_headers_precede_content_type_on_writes() {
        let input = UserPayload {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
        };
        let c = client().with_token_provider(Arc::new(|| "t".to_string()));
        let req = c.build_create_user(&input).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("authorization".to_string(), "Bearer t".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn no_token_provider_means_no_authorization_header() {
        let req = client().build_delete_user(1);
        assert!(req.headers.is_empty());
    }

    #[test]
    fn parse_list_users_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{"id":1,"name":"Test","email":"test@x.com"}]"#.to_string(),
        };
        let users = client().parse_list_users(response).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Test");
    }

    #[test]
    fn parse_get_user_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = client().parse_get_user(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_user_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"id":1,"name":"New","email":"new@x.com"}"#.to_string(),
        };
        let user = client().parse_create_user(response).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "New");
    }

    #[test]
    fn parse_create_user_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_create_user(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_user_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"id":1,"name":"Updated","email":"updated@x.com"}"#.to_string(),
        };
        let user = client().parse_update_user(response).unwrap();
        assert_eq!(user.name, "Updated");
        assert_eq!(user.email, "updated@x.com");
    }

    #[test]
    fn parse_delete_user_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(client().parse_delete_user(response).is_ok());
    }

    #[test]
    fn parse_delete_user_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        };
        let err = client().parse_delete_user(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = UsersClient::new("http://localhost:3000/");
        let req = client.build_list_users();
        assert_eq!(req.path, "http://localhost:3000/users");
    }

    #[test]
    fn parse_list_users_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = client().parse_list_users(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
