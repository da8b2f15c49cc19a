//! Interact with sysPass user groups.

use anyhow::Result;
use serde_json::{json, Value};

use super::rpc::{self, SyspassClient};

impl SyspassClient {
    /// Find the user group named `text`, ignoring case.
    pub async fn user_group_search(&self, text: &str, count: Option<u32>) -> Result<Option<Value>> {
        let method = "userGroup/search";
        let response = self
            .call(method, json!({"text": text, "count": count}))
            .await?;
        Ok(rpc::find_by_name(method, &response, text, true)?)
    }

    pub async fn user_group_create(&self, name: &str, description: Option<&str>) -> Result<Value> {
        let method = "userGroup/create";
        let response = self
            .call(method, json!({"name": name, "description": description}))
            .await?;
        Ok(rpc::check_item_id(method, response)?)
    }

    pub async fn user_group_delete(&self, id: i64) -> Result<Value> {
        let method = "userGroup/delete";
        let response = self.call(method, json!({ "id": id })).await?;
        Ok(rpc::check_result_code(method, response)?)
    }
}
