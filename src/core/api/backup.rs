//! Trigger a server-side backup.

use anyhow::Result;
use serde_json::Value;

use super::rpc::SyspassClient;
use crate::core::error::SyspassError;

impl SyspassClient {
    /// Ask sysPass to back up its database and configuration.
    ///
    /// Succeeds whenever the response has a `result`, whatever it contains.
    pub async fn backup(&self) -> Result<Value> {
        let method = "backup";
        let mut response = self.call(method, Value::Null).await?;
        match response.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(SyspassError::rpc(method, response).into()),
        }
    }
}
