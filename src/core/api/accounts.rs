//! Interact with sysPass accounts.
//!
//! An account is a password entry: a name, a login, the encrypted password and
//! the category/client it belongs to.

use anyhow::{anyhow, Result};
use log::debug;
use serde_json::{json, Value};

use super::rpc::{self, SyspassClient};
use crate::core::models::NewAccount;

/// Options for the account search query.
#[derive(Debug, Default)]
pub struct AccountSearchRequest {
    /// Keyword; sysPass matches it against account names.
    pub text: String,
    /// Maximum number of results.
    pub count: Option<u32>,
    /// Filter to a category
    pub category_id: Option<i64>,
    /// Filter to a client
    pub client_id: Option<i64>,
}

impl AccountSearchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn params(&self) -> Value {
        json!({
            "text": self.text,
            "count": self.count,
            "categoryId": self.category_id,
            "clientId": self.client_id,
        })
    }
}

impl SyspassClient {
    /// Find the account whose name is exactly `params.text`.
    ///
    /// Returns `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the response carries an `error`.
    pub async fn account_search(&self, params: &AccountSearchRequest) -> Result<Option<Value>> {
        debug!("building account search for: {:?}", params);
        let method = "account/search";
        let response = self.call(method, params.params()).await?;
        Ok(rpc::find_by_name(method, &response, &params.text, false)?)
    }

    /// Get every account matching `params.text`, without name filtering.
    pub async fn account_search_all(&self, params: &AccountSearchRequest) -> Result<Vec<Value>> {
        debug!("building account search (all matches) for: {:?}", params);
        let method = "account/search";
        let response = self.call(method, params.params()).await?;
        Ok(rpc::search_entries(method, &response)?)
    }

    /// Get the decrypted password of account `id`.
    ///
    /// Requires the token password to be configured.
    pub async fn account_view_pass(&self, id: i64) -> Result<String> {
        let method = "account/viewPass";
        let response = self
            .call(method, json!({"id": id, "tokenPass": self.token_pass()}))
            .await?;
        let result = rpc::check_count(method, &response)?;
        result
            .result
            .get("password")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| anyhow!("{} returned no password for account {}", method, id))
    }

    /// Create an account.
    ///
    /// Returns the API `result` object; its `itemId` is the new account's id.
    pub async fn account_create(&self, account: &NewAccount) -> Result<Value> {
        debug!("building account create for: {:?}", account);
        let method = "account/create";
        let mut params = serde_json::to_value(account)?;
        params["tokenPass"] = self.token_pass();
        let response = self.call(method, params).await?;
        Ok(rpc::check_item_id(method, response)?)
    }

    /// Delete account `id`.
    pub async fn account_delete(&self, id: i64) -> Result<Value> {
        let method = "account/delete";
        let response = self
            .call(method, json!({"id": id, "tokenPass": self.token_pass()}))
            .await?;
        Ok(rpc::check_result_code(method, response)?)
    }

    /// Get the details of account `id` (without its password).
    pub async fn account_view(&self, id: i64) -> Result<Value> {
        let method = "account/view";
        let response = self.call(method, json!({ "id": id })).await?;
        Ok(rpc::check_count(method, &response)?.result)
    }
}
