// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::Result;
use serde_json::Value;
use strum_macros::{AsRefStr, EnumIter, EnumString};

use super::api::accounts::AccountSearchRequest;
use super::api::SyspassClient;
use super::error::SyspassError;
use super::lookup::{self, LookupRequest};
use super::password::{self, PasswordPolicy};
use crate::app_config::CompleteAppConfig;

/// Entities sharing the search/create/delete subcommands.
#[derive(AsRefStr, EnumString, EnumIter, Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    #[strum(serialize = "category")]
    Category,
    #[strum(serialize = "client")]
    Client,
    #[strum(serialize = "tag")]
    Tag,
    #[strum(serialize = "user-group")]
    UserGroup,
}

impl EntityKind {
    pub fn about(&self) -> &'static str {
        match self {
            EntityKind::Category => "Manage categories",
            EntityKind::Client => "Manage clients (customers)",
            EntityKind::Tag => "Manage tags",
            EntityKind::UserGroup => "Manage user groups",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Client => "client",
            EntityKind::Tag => "tag",
            EntityKind::UserGroup => "user group",
        }
    }
}

/// Run a lookup and print the password, if any.
pub async fn lookup(client: &SyspassClient, request: &LookupRequest) -> Result<()> {
    if let Some(password) = lookup::lookup(client, request).await? {
        println!("{}", password);
    }
    Ok(())
}

/// Print the account named `text`, or every match with `all`.
pub async fn search_accounts(
    client: &SyspassClient,
    params: &AccountSearchRequest,
    all: bool,
) -> Result<()> {
    if all {
        let accounts = client.account_search_all(params).await?;
        return print_json(&Value::Array(accounts));
    }
    let account = client
        .account_search(params)
        .await?
        .ok_or_else(|| SyspassError::NotFound {
            kind: "account",
            name: params.text.clone(),
        })?;
    print_json(&account)
}

/// Print the entity of kind `kind` named `text`.
///
/// # Errors
///
/// Returns an error if nothing is named `text`, so scripts can rely on the
/// exit status.
pub async fn search(
    client: &SyspassClient,
    kind: EntityKind,
    text: &str,
    count: Option<u32>,
) -> Result<()> {
    let found = match kind {
        EntityKind::Category => client.category_search(text, count).await?,
        EntityKind::Client => client.client_search(text, count).await?,
        EntityKind::Tag => client.tag_search(text, count).await?,
        EntityKind::UserGroup => client.user_group_search(text, count).await?,
    };
    let entry = found.ok_or_else(|| SyspassError::NotFound {
        kind: kind.label(),
        name: text.to_owned(),
    })?;
    print_json(&entry)
}

/// Delete entity `id` of kind `kind` and print the API result.
pub async fn delete(client: &SyspassClient, kind: EntityKind, id: i64) -> Result<()> {
    let result = match kind {
        EntityKind::Category => client.category_delete(id).await?,
        EntityKind::Client => client.client_delete(id).await?,
        EntityKind::Tag => client.tag_delete(id).await?,
        EntityKind::UserGroup => client.user_group_delete(id).await?,
    };
    print_json(&result)
}

/// Generate a password locally and print it.
pub fn generate_password(policy: &PasswordPolicy) -> Result<()> {
    println!("{}", password::generate(policy)?);
    Ok(())
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Show the configuration file, without secrets
pub fn print_config(config: config::Config) -> Result<()> {
    let app_config: CompleteAppConfig = config.try_into()?;
    println!("{}", toml::to_string(&app_config.redacted())?);

    Ok(())
}
