//! JSON-RPC transport shared by every sysPass API call, plus the checks used
//! to decide whether a response is a success.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use reqwest::{header, Url};
use serde_json::{Map, Value};

use crate::core::error::SyspassError;
use crate::core::models::{ApiResult, RpcRequest};

/// Client for a single sysPass API endpoint (usually `https://host/api.php`).
pub struct SyspassClient {
    /// URL endpoint
    pub endpoint: Url,
    /// HTTP client
    client: reqwest::Client,
    /// API authorization token, sent as `authToken` with every call.
    auth_token: String,
    /// Password bound to the token, needed to decrypt or modify accounts.
    token_pass: Option<String>,
    /// Next JSON-RPC request id.
    request_id: AtomicU64,
}

impl SyspassClient {
    /// Configure HTTP client with user-agent, headers and TLS verification.
    pub fn new_with_params(
        endpoint: Url,
        auth_token: String,
        token_pass: Option<String>,
        timeout: u64,
        verify_tls: bool,
    ) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"),);
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .default_headers(headers)
                .timeout(Duration::from_secs(timeout))
                .danger_accept_invalid_certs(!verify_tls)
                .build()?,
            endpoint,
            auth_token,
            token_pass,
            request_id: AtomicU64::new(1),
        })
    }

    /// Returns the id for the next request and advances the counter.
    pub fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// The `tokenPass` parameter (`null` when not configured).
    pub(crate) fn token_pass(&self) -> Value {
        self.token_pass
            .as_ref()
            .map_or(Value::Null, |p| Value::String(p.clone()))
    }

    /// Sends a JSON-RPC call and returns the whole decoded response.
    ///
    /// `params` must be a JSON object (or null); `authToken` is added to it.
    /// The response is not checked for success, see [check_count] and
    /// friends.
    ///
    /// # Errors
    ///
    /// Returns an error if the server returns a non-200 response (e.g. if it
    /// is unreachable or times out) or if the returned data is not json.
    pub(crate) async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let mut params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        params.insert(
            "authToken".to_owned(),
            Value::String(self.auth_token.clone()),
        );

        // The id is consumed even if the call fails.
        let id = self.next_request_id();
        let body = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: Value::Object(params),
            id,
        };
        debug!("sending {} request with id {}", method, id);

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&body)
            .send()
            .await?;
        response.error_for_status_ref()?;

        debug!("status: {}", response.status());
        let content = response.text().await?;

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("JSON from sysPass API was malformed: {}", &content))?;
        Ok(value)
    }
}

/// Decodes the `result` object of a response.
///
/// A response carrying an `error` key, or lacking a `result` object, is a
/// failure.
pub(crate) fn api_result(method: &str, response: &Value) -> Result<ApiResult, SyspassError> {
    if response.get("error").is_some() {
        return Err(SyspassError::rpc(method, response.clone()));
    }
    response
        .get("result")
        .filter(|r| r.is_object())
        .and_then(|r| serde_json::from_value::<ApiResult>(r.clone()).ok())
        .ok_or_else(|| SyspassError::rpc(method, response.clone()))
}

/// Succeeds when `result.count > 0` (views).
pub(crate) fn check_count(method: &str, response: &Value) -> Result<ApiResult, SyspassError> {
    let result = api_result(method, response)?;
    match result.count {
        Some(count) if count > 0 => Ok(result),
        _ => Err(SyspassError::rpc(method, response.clone())),
    }
}

/// Succeeds when `result.itemId > 0` (creations).
pub(crate) fn check_item_id(method: &str, response: Value) -> Result<Value, SyspassError> {
    let result = api_result(method, &response)?;
    match result.item_id {
        Some(id) if id > 0 => Ok(take_result(response)),
        _ => Err(SyspassError::rpc(method, response)),
    }
}

/// Succeeds when `result.resultCode == 0` (deletions).
pub(crate) fn check_result_code(method: &str, response: Value) -> Result<Value, SyspassError> {
    let result = api_result(method, &response)?;
    match result.result_code {
        Some(0) => Ok(take_result(response)),
        _ => Err(SyspassError::rpc(method, response)),
    }
}

/// Returns every entry of a search response. No match is not an error.
pub(crate) fn search_entries(method: &str, response: &Value) -> Result<Vec<Value>, SyspassError> {
    let result = api_result(method, response)?;
    match (result.count, result.result) {
        (Some(count), Value::Array(entries)) if count > 0 => Ok(entries),
        _ => Ok(Vec::new()),
    }
}

/// Finds the entry whose `name` is `text` in a search response.
///
/// sysPass searches are substring matches, so the exact entry has to be
/// picked out of the results.
pub(crate) fn find_by_name(
    method: &str,
    response: &Value,
    text: &str,
    ignore_case: bool,
) -> Result<Option<Value>, SyspassError> {
    let found = search_entries(method, response)?
        .into_iter()
        .find(|entry| match entry.get("name").and_then(Value::as_str) {
            Some(name) if ignore_case => name.to_uppercase() == text.to_uppercase(),
            Some(name) => name == text,
            None => false,
        });
    if found.is_none() {
        debug!("{}: no entry named {:?}", method, text);
    }
    Ok(found)
}

/// Moves the `result` object out of a response.
fn take_result(mut response: Value) -> Value {
    response
        .get_mut("result")
        .map(Value::take)
        .unwrap_or(Value::Null)
}
