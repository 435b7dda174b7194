// src/remote/client.rs
//
// REST transport for the hosted database/auth service
//
// ARCHITECTURE:
// - One shared client per process (wrapped in Arc by the caller)
// - Every request carries the public api key
// - Authorization uses the signed-in session token when present,
//   the api key otherwise
// - Non-2xx responses become RemoteError with the service's own message
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE: no domain types, no caching
// - Updates and deletes without a row filter are refused

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::error::{AppError, AppResult, RemoteError};
use crate::remote::query::Query;

const REST_PREFIX: &str = "rest/v1";
const AUTH_PREFIX: &str = "auth/v1";

/// Error body shapes used by the REST and auth surfaces
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    code: Option<serde_json::Value>,
    error_code: Option<String>,
}

pub struct RestClient {
    base_url: String,
    api_key: String,
    http_client: Client,
    access_token: RwLock<Option<String>>,
}

impl RestClient {
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http_client,
            access_token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token of the signed-in user; `None` falls back to the api key
    pub fn set_access_token(&self, token: Option<String>) {
        match self.access_token.write() {
            Ok(mut slot) => *slot = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    pub fn access_token(&self) -> Option<String> {
        match self.access_token.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }

    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, path)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, AUTH_PREFIX, path)
    }

    /// Request with the service headers applied
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self.access_token().unwrap_or_else(|| self.api_key.clone());

        self.http_client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
            .header(header::ACCEPT, "application/json")
    }

    /// Send and turn non-success statuses into RemoteError
    pub(crate) async fn execute(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = parse_error_body(status.as_u16(), &body);
        log::debug!("Remote call failed ({}): {}", status, error.message);
        Err(AppError::Remote(error))
    }

    // ========================================================================
    // TABLE OPERATIONS
    // ========================================================================

    /// Read rows from a table
    pub async fn select<T>(&self, table: &str, query: &Query) -> AppResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        log::debug!("GET {} {:?}", table, query.params());

        let request = self
            .request(Method::GET, &self.rest_url(table))
            .query(query.params());

        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }

    /// Read zero or one row. More than one row is an error.
    pub async fn select_maybe_single<T>(&self, table: &str, query: &Query) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.select(table, query).await?;
        expect_at_most_one(rows)
    }

    /// Insert one row and return its stored representation
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", table);

        let request = self
            .request(Method::POST, &self.rest_url(table))
            .header("Prefer", "return=representation")
            .json(body);

        let response = self.execute(request).await?;
        let rows: Vec<T> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| {
            AppError::Remote(RemoteError::new(
                500,
                format!("Insert into {} returned no row", table),
            ))
        })
    }

    /// Insert many rows, discarding the representation
    pub async fn insert_many<B>(&self, table: &str, rows: &[B]) -> AppResult<()>
    where
        B: Serialize,
    {
        if rows.is_empty() {
            return Ok(());
        }
        log::debug!("POST {} ({} rows)", table, rows.len());

        let request = self
            .request(Method::POST, &self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(rows);

        self.execute(request).await?;
        Ok(())
    }

    pub async fn update<B>(&self, table: &str, query: &Query, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized,
    {
        require_filter("update", table, query)?;
        log::debug!("PATCH {} {:?}", table, query.params());

        let request = self
            .request(Method::PATCH, &self.rest_url(table))
            .query(query.params())
            .header("Prefer", "return=minimal")
            .json(body);

        self.execute(request).await?;
        Ok(())
    }

    pub async fn delete(&self, table: &str, query: &Query) -> AppResult<()> {
        require_filter("delete", table, query)?;
        log::debug!("DELETE {} {:?}", table, query.params());

        let request = self
            .request(Method::DELETE, &self.rest_url(table))
            .query(query.params());

        self.execute(request).await?;
        Ok(())
    }

    /// Call a stored procedure
    pub async fn rpc<A, T>(&self, function: &str, args: &A) -> AppResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("RPC {}", function);

        let request = self
            .request(Method::POST, &self.rest_url(&format!("rpc/{}", function)))
            .json(args);

        let response = self.execute(request).await?;
        Ok(response.json().await?)
    }
}

fn require_filter(operation: &str, table: &str, query: &Query) -> AppResult<()> {
    if query.has_filters() {
        Ok(())
    } else {
        Err(AppError::Other(format!(
            "Refusing to {} every row of {}",
            operation, table
        )))
    }
}

/// Zero or one row, mirroring the service's single-object semantics
pub(crate) fn expect_at_most_one<T>(rows: Vec<T>) -> AppResult<Option<T>> {
    if rows.len() > 1 {
        return Err(AppError::Remote(
            RemoteError::new(
                406,
                format!(
                    "JSON object requested, multiple ({}) rows returned",
                    rows.len()
                ),
            )
            .with_code("PGRST116"),
        ));
    }
    Ok(rows.into_iter().next())
}

/// Build a RemoteError from a response body, falling back to the raw text
pub(crate) fn parse_error_body(status: u16, body: &str) -> RemoteError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let message = parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error.clone())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("Remote service returned status {}", status)
            } else {
                trimmed.to_string()
            }
        });

    let code = parsed
        .error_code
        .or_else(|| {
            parsed.code.map(|c| match c {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        })
        .or(parsed.error);

    let error = RemoteError::new(status, message);
    match code {
        Some(code) => error.with_code(code),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RemoteConfig {
        RemoteConfig {
            url: "https://demo.supabase.co/".to_string(),
            api_key: "anon-key".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = RestClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), "https://demo.supabase.co");
        assert!(!client.has_session());
    }

    #[test]
    fn test_urls() {
        let client = RestClient::new(&config()).unwrap();
        assert_eq!(
            client.rest_url("content"),
            "https://demo.supabase.co/rest/v1/content"
        );
        assert_eq!(
            client.auth_url("token?grant_type=password"),
            "https://demo.supabase.co/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn test_session_token_replaces_api_key_bearer() {
        let client = RestClient::new(&config()).unwrap();

        let anonymous = client
            .request(Method::GET, &client.rest_url("content"))
            .build()
            .unwrap();
        assert_eq!(
            anonymous.headers()[header::AUTHORIZATION],
            "Bearer anon-key"
        );
        assert_eq!(anonymous.headers()["apikey"], "anon-key");

        client.set_access_token(Some("jwt".to_string()));
        let signed_in = client
            .request(Method::GET, &client.rest_url("content"))
            .build()
            .unwrap();
        assert_eq!(signed_in.headers()[header::AUTHORIZATION], "Bearer jwt");

        client.set_access_token(None);
        assert!(!client.has_session());
    }

    #[test]
    fn test_parses_rest_error_body() {
        let error = parse_error_body(
            409,
            r#"{"code":"23505","message":"duplicate key value violates unique constraint","details":null}"#,
        );
        assert_eq!(error.status, 409);
        assert_eq!(error.code.as_deref(), Some("23505"));
        assert_eq!(error.message, "duplicate key value violates unique constraint");
    }

    #[test]
    fn test_parses_auth_error_body() {
        let error = parse_error_body(
            400,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(error.message, "Invalid login credentials");
        assert_eq!(error.code.as_deref(), Some("invalid_grant"));

        let error = parse_error_body(422, r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#);
        assert_eq!(error.message, "User already registered");
        assert_eq!(error.code.as_deref(), Some("user_already_exists"));
    }

    #[test]
    fn test_falls_back_to_raw_body() {
        assert_eq!(parse_error_body(502, "Bad Gateway").message, "Bad Gateway");
        assert_eq!(
            parse_error_body(503, "").message,
            "Remote service returned status 503"
        );
    }

    #[test]
    fn test_expect_at_most_one() {
        assert_eq!(expect_at_most_one(Vec::<u8>::new()).unwrap(), None);
        assert_eq!(expect_at_most_one(vec![1u8]).unwrap(), Some(1));

        match expect_at_most_one(vec![1u8, 2u8]) {
            Err(AppError::Remote(error)) => assert_eq!(error.code.as_deref(), Some("PGRST116")),
            other => panic!("expected remote error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unfiltered_delete_is_refused() {
        let client = RestClient::new(&config()).unwrap();
        let result = client.delete("content", &Query::new()).await;
        assert!(matches!(result, Err(AppError::Other(_))));
    }
}
