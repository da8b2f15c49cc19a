//! Interact with sysPass categories.

use anyhow::Result;
use serde_json::{json, Value};

use super::rpc::{self, SyspassClient};

impl SyspassClient {
    /// Find the category named exactly `text` (case-sensitive).
    pub async fn category_search(&self, text: &str, count: Option<u32>) -> Result<Option<Value>> {
        let method = "category/search";
        let response = self
            .call(method, json!({"text": text, "count": count}))
            .await?;
        Ok(rpc::find_by_name(method, &response, text, false)?)
    }

    /// Create a category.
    pub async fn category_create(&self, name: &str, description: Option<&str>) -> Result<Value> {
        let method = "category/create";
        let response = self
            .call(method, json!({"name": name, "description": description}))
            .await?;
        Ok(rpc::check_item_id(method, response)?)
    }

    /// Delete category `id`.
    pub async fn category_delete(&self, id: i64) -> Result<Value> {
        let method = "category/delete";
        let response = self.call(method, json!({ "id": id })).await?;
        Ok(rpc::check_result_code(method, response)?)
    }
}
