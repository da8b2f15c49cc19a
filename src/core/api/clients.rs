//! Interact with sysPass clients (the customers accounts belong to).

use anyhow::Result;
use serde_json::{json, Value};

use super::rpc::{self, SyspassClient};

impl SyspassClient {
    /// Find the client named `text`, ignoring case.
    pub async fn client_search(&self, text: &str, count: Option<u32>) -> Result<Option<Value>> {
        let method = "client/search";
        let response = self
            .call(method, json!({"text": text, "count": count}))
            .await?;
        Ok(rpc::find_by_name(method, &response, text, true)?)
    }

    /// Create a client. A global client is visible to every user.
    pub async fn client_create(
        &self,
        name: &str,
        description: Option<&str>,
        global: bool,
    ) -> Result<Value> {
        let method = "client/create";
        let response = self
            .call(
                method,
                json!({"name": name, "description": description, "global": global}),
            )
            .await?;
        Ok(rpc::check_item_id(method, response)?)
    }

    /// Delete client `id`.
    pub async fn client_delete(&self, id: i64) -> Result<Value> {
        let method = "client/delete";
        let response = self.call(method, json!({ "id": id })).await?;
        Ok(rpc::check_result_code(method, response)?)
    }
}
