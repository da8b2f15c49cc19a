//! Interact with sysPass tags.

use anyhow::Result;
use serde_json::{json, Value};

use super::rpc::{self, SyspassClient};

impl SyspassClient {
    /// Find the tag named `text`, ignoring case.
    pub async fn tag_search(&self, text: &str, count: Option<u32>) -> Result<Option<Value>> {
        let method = "tag/search";
        let response = self
            .call(method, json!({"text": text, "count": count}))
            .await?;
        Ok(rpc::find_by_name(method, &response, text, true)?)
    }

    pub async fn tag_create(&self, name: &str) -> Result<Value> {
        let method = "tag/create";
        let response = self.call(method, json!({ "name": name })).await?;
        Ok(rpc::check_item_id(method, response)?)
    }

    pub async fn tag_delete(&self, id: i64) -> Result<Value> {
        let method = "tag/delete";
        let response = self.call(method, json!({ "id": id })).await?;
        Ok(rpc::check_result_code(method, response)?)
    }
}
