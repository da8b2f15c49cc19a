// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Serialization to/from the sysPass JSON-RPC API.

use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u64,
}

/// The `result` object sysPass wraps around every successful answer.
///
/// Which field signals success depends on the method: searches and views set
/// `count`, creations set `itemId` and deletions set `resultCode`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    /// Identifier of the item touched by the call (creations only).
    pub item_id: Option<i64>,
    /// Number of entries in `result` (searches and views).
    pub count: Option<i64>,
    /// Zero on success.
    pub result_code: Option<i64>,
    pub result_message: Option<String>,
    /// Method-specific payload: a list for searches, an object otherwise.
    #[serde(default)]
    pub result: Value,
}

/// Parameters of a new account.
///
/// Optional fields are sent as `null`, which sysPass treats as unset.
#[derive(Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub category_id: i64,
    pub client_id: i64,
    pub user_group_id: Option<i64>,
    #[serde(rename = "pass")]
    pub password: String,
    pub login: String,
    pub url: Option<String>,
    #[serde(rename = "tagsId")]
    pub tag_ids: Vec<i64>,
    pub notes: Option<String>,
    pub private: Option<bool>,
    pub private_group: Option<bool>,
    /// Unix timestamp (seconds).
    pub expire_date: Option<i64>,
    pub parent_id: Option<i64>,
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("name", &self.name)
            .field("category_id", &self.category_id)
            .field("client_id", &self.client_id)
            .field("user_group_id", &self.user_group_id)
            .field("password", &"********")
            .field("login", &self.login)
            .field("url", &self.url)
            .field("tag_ids", &self.tag_ids)
            .field("notes", &self.notes)
            .field("private", &self.private)
            .field("private_group", &self.private_group)
            .field("expire_date", &self.expire_date)
            .field("parent_id", &self.parent_id)
            .finish()
    }
}

/// Extracts the `id` of an entry returned by a search.
///
/// # Errors
///
/// Returns an error if the entry has no integer id (sysPass sometimes sends
/// ids as strings, which are accepted).
pub fn entry_id(entry: &Value) -> Result<i64> {
    let id = match entry.get("id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| anyhow!("Entry returned by sysPass has no usable id: {}", entry))
}
