// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Get-or-create (or delete) an account by name.
//!
//! This is what automation tools call: the account is searched by its exact
//! name, then its password is returned, or the account is created with a
//! generated password, or it is deleted.

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use log::{debug, info};
use serde_json::Value;
use strum_macros::{AsRefStr, EnumString, EnumVariantNames};

use super::api::accounts::AccountSearchRequest;
use super::api::SyspassClient;
use super::error::SyspassError;
use super::models::{entry_id, NewAccount};
use super::password::{self, PasswordPolicy};

/// Desired state of the account.
#[derive(AsRefStr, EnumVariantNames, EnumString, Clone, Copy, Debug, PartialEq)]
pub enum State {
    #[strum(serialize = "present")]
    Present,
    #[strum(serialize = "absent")]
    Absent,
}

impl Default for State {
    fn default() -> Self {
        State::Present
    }
}

/// Everything needed to find an account, or to create it when missing.
///
/// Fields other than `name` and `state` are only used for creation: an
/// existing account is never compared against them or modified.
#[derive(Clone, Debug, Default)]
pub struct LookupRequest {
    /// Account name; must be unique in sysPass.
    pub name: String,
    pub state: State,
    pub login: Option<String>,
    /// Category name (case-sensitive)
    pub category: Option<String>,
    /// Client name (case-insensitive)
    pub customer: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    /// Only visible to its owner.
    pub private: bool,
    /// Only visible to its owner's group.
    pub private_group: bool,
    pub expire_date: Option<NaiveDate>,
    /// Tag names (case-insensitive)
    pub tags: Vec<String>,
    /// User group name (case-insensitive)
    pub user_group: Option<String>,
    /// How to generate the password of a new account.
    pub password: PasswordPolicy,
}

impl LookupRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Run a lookup.
///
/// Returns the account's password when `state` is present (creating the
/// account first if it doesn't exist), or `None` once an absent account is
/// gone.
///
/// # Errors
///
/// Returns an error if any API call fails, if an entity named in the request
/// doesn't exist, or if a field required for creation is missing.
pub async fn lookup(client: &SyspassClient, request: &LookupRequest) -> Result<Option<String>> {
    let existing = client
        .account_search(&AccountSearchRequest::new(request.name.as_str()))
        .await?;

    match request.state {
        State::Absent => {
            if let Some(account) = existing {
                let id = entry_id(&account)?;
                info!("Deleting account {:?} (id {})", request.name, id);
                client.account_delete(id).await?;
            } else {
                debug!("Account {:?} is already absent", request.name);
            }
            Ok(None)
        }
        State::Present => match existing {
            Some(account) => {
                let id = entry_id(&account)?;
                debug!("Account {:?} exists with id {}", request.name, id);
                Ok(Some(client.account_view_pass(id).await?))
            }
            None => Ok(Some(create_account(client, request).await?)),
        },
    }
}

async fn create_account(client: &SyspassClient, request: &LookupRequest) -> Result<String> {
    let login = required(&request.login, "login")?;
    let category = required(&request.category, "category")?;
    let customer = required(&request.customer, "customer")?;

    let category_id = resolve(
        client.category_search(category, None).await?,
        "category",
        category,
    )?;
    let client_id = resolve(
        client.client_search(customer, None).await?,
        "client",
        customer,
    )?;
    let mut tag_ids = Vec::with_capacity(request.tags.len());
    for tag in &request.tags {
        tag_ids.push(resolve(client.tag_search(tag, None).await?, "tag", tag)?);
    }
    let user_group_id = match &request.user_group {
        Some(group) => Some(resolve(
            client.user_group_search(group, None).await?,
            "user group",
            group,
        )?),
        None => None,
    };

    let expire_date = request.expire_date.map(expire_timestamp).transpose()?;

    let password = password::generate(&request.password)?;
    let account = NewAccount {
        name: request.name.clone(),
        category_id,
        client_id,
        user_group_id,
        password: password.clone(),
        login: login.to_owned(),
        url: request.url.clone(),
        tag_ids,
        notes: request.notes.clone(),
        private: request.private.then(|| true),
        private_group: request.private_group.then(|| true),
        expire_date,
        parent_id: None,
    };
    let created = client.account_create(&account).await?;
    info!(
        "Created account {:?} (id {})",
        request.name,
        created.get("itemId").unwrap_or(&Value::Null)
    );

    Ok(password)
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    field
        .as_deref()
        .ok_or_else(|| SyspassError::MissingField(name).into())
}

fn resolve(found: Option<Value>, kind: &'static str, name: &str) -> Result<i64> {
    let entry = found.ok_or_else(|| SyspassError::NotFound {
        kind,
        name: name.to_owned(),
    })?;
    entry_id(&entry)
}

/// Midnight UTC of `date`, as a Unix timestamp.
fn expire_timestamp(date: NaiveDate) -> Result<i64> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid expire date {}", date))?;
    Ok(Utc.from_utc_datetime(&midnight).timestamp())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    use super::*;
    use crate::core::api::rpc::tests::test_client;

    fn not_found() -> Value {
        json!({"result": {"count": 0, "result": []}})
    }

    fn found(id: i64, name: &str) -> Value {
        json!({"result": {"count": 1, "result": [{"id": id, "name": name}]}})
    }

    fn new_account_request() -> LookupRequest {
        LookupRequest {
            login: Some("root".to_owned()),
            category: Some("MySQL".to_owned()),
            customer: Some("Customer 1".to_owned()),
            ..LookupRequest::new("Server 1 test account")
        }
    }

    #[test]
    fn test_state_from_str() {
        assert_eq!(State::from_str("absent").unwrap(), State::Absent);
        assert_eq!(State::default().as_ref(), "present");
        State::from_str("gone").expect_err("Unknown state");
    }

    #[test]
    fn test_expire_timestamp() {
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(expire_timestamp(date).unwrap(), 1_609_459_200);
    }

    #[tokio::test]
    async fn test_lookup_existing_account() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST).path("/api.php").json_body_partial(
                r#"{"method": "account/search", "params": {"text": "Server 1 test account"}}"#,
            );
            then.status(200).json_body(found(12, "Server 1 test account"));
        });
        let view_pass = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/viewPass", "params": {"id": 12}}"#);
            then.status(200).json_body(json!({"result": {
                "count": 1,
                "result": {"password": "existing-password"},
            }}));
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/create"}"#);
            then.status(200).json_body(json!({"result": {"itemId": 99}}));
        });

        let client = test_client(&server, 10);
        let password = lookup(&client, &new_account_request()).await.unwrap();

        search.assert();
        view_pass.assert();
        assert_eq!(create.hits(), 0);
        assert_eq!(password.as_deref(), Some("existing-password"));
    }

    #[tokio::test]
    async fn test_lookup_creates_missing_account() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });
        let category = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "category/search", "params": {"text": "MySQL"}}"#);
            then.status(200).json_body(found(3, "MySQL"));
        });
        let customer = server.mock(|when, then| {
            when.method(POST).path("/api.php").json_body_partial(
                r#"{"method": "client/search", "params": {"text": "Customer 1"}}"#,
            );
            then.status(200).json_body(found(4, "CUSTOMER 1"));
        });
        let tag = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "tag/search", "params": {"text": "prod"}}"#);
            then.status(200).json_body(found(6, "prod"));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/api.php").json_body_partial(
                r#"{
                    "method": "account/create",
                    "params": {
                        "name": "Server 1 test account",
                        "categoryId": 3,
                        "clientId": 4,
                        "login": "root",
                        "url": "https://exemp.le",
                        "tagsId": [6],
                        "private": true,
                        "expireDate": 1609459200,
                        "tokenPass": "TEST-PASS"
                    }
                }"#,
            );
            then.status(200).json_body(json!({"result": {
                "itemId": 21,
                "resultMessage": "Account created",
            }}));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            url: Some("https://exemp.le".to_owned()),
            private: true,
            tags: vec!["prod".to_owned()],
            expire_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            password: PasswordPolicy {
                length: 32,
                chars: vec!["digits".to_owned()],
            },
            ..new_account_request()
        };
        let password = lookup(&client, &request).await.unwrap().unwrap();

        search.assert();
        category.assert();
        customer.assert();
        tag.assert();
        create.assert();
        assert_eq!(password.len(), 32);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_lookup_missing_category() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });
        let category = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "category/search"}"#);
            then.status(200).json_body(found(3, "MySQL Replicas"));
        });

        let client = test_client(&server, 10);
        let e = lookup(&client, &new_account_request())
            .await
            .expect_err("Category doesn't exist");

        search.assert();
        category.assert();
        assert_eq!(
            e.to_string(),
            r#"No category named "MySQL" exists in sysPass"#
        );
    }

    /// Mocks the account, category and client searches of a new account.
    fn mock_new_account_searches(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "category/search"}"#);
            then.status(200).json_body(found(3, "MySQL"));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "client/search"}"#);
            then.status(200).json_body(found(4, "Customer 1"));
        });
    }

    #[tokio::test]
    async fn test_lookup_creates_account_for_user_group() {
        let server = MockServer::start();
        mock_new_account_searches(&server);
        let user_group = server.mock(|when, then| {
            when.method(POST).path("/api.php").json_body_partial(
                r#"{"method": "userGroup/search", "params": {"text": "dba"}}"#,
            );
            then.status(200).json_body(found(8, "DBA"));
        });
        let create = server.mock(|when, then| {
            when.method(POST).path("/api.php").json_body_partial(
                r#"{
                    "method": "account/create",
                    "params": {
                        "userGroupId": 8,
                        "privateGroup": true,
                        "private": null
                    }
                }"#,
            );
            then.status(200).json_body(json!({"result": {"itemId": 22}}));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            user_group: Some("dba".to_owned()),
            private_group: true,
            ..new_account_request()
        };
        let password = lookup(&client, &request).await.unwrap();

        user_group.assert();
        create.assert();
        assert_eq!(password.map(|p| p.len()), Some(20));
    }

    #[tokio::test]
    async fn test_lookup_missing_user_group() {
        let server = MockServer::start();
        mock_new_account_searches(&server);
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "userGroup/search"}"#);
            then.status(200).json_body(not_found());
        });
        let create = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/create"}"#);
            then.status(200).json_body(json!({"result": {"itemId": 22}}));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            user_group: Some("dba".to_owned()),
            ..new_account_request()
        };
        let e = lookup(&client, &request)
            .await
            .expect_err("User group doesn't exist");

        assert_eq!(create.hits(), 0);
        assert_eq!(
            e.to_string(),
            r#"No user group named "dba" exists in sysPass"#
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_tag() {
        let server = MockServer::start();
        mock_new_account_searches(&server);
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "tag/search"}"#);
            then.status(200).json_body(found(6, "production"));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            tags: vec!["prod".to_owned()],
            ..new_account_request()
        };
        let e = lookup(&client, &request).await.expect_err("Tag doesn't exist");

        assert_eq!(e.to_string(), r#"No tag named "prod" exists in sysPass"#);
    }

    #[tokio::test]
    async fn test_lookup_missing_client() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "category/search"}"#);
            then.status(200).json_body(found(3, "MySQL"));
        });
        server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "client/search"}"#);
            then.status(200).json_body(not_found());
        });

        let client = test_client(&server, 10);
        let e = lookup(&client, &new_account_request())
            .await
            .expect_err("Client doesn't exist");

        assert_eq!(
            e.to_string(),
            r#"No client named "Customer 1" exists in sysPass"#
        );
    }

    #[tokio::test]
    async fn test_lookup_missing_login() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            login: None,
            ..new_account_request()
        };
        let e = lookup(&client, &request).await.expect_err("No login");

        search.assert();
        match e.downcast_ref::<SyspassError>() {
            Some(SyspassError::MissingField(field)) => assert_eq!(*field, "login"),
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_absent_deletes_account() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(found(12, "Server 1 test account"));
        });
        let delete = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/delete", "params": {"id": 12}}"#);
            then.status(200)
                .json_body(json!({"result": {"resultCode": 0, "resultMessage": "Account removed"}}));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            state: State::Absent,
            ..LookupRequest::new("Server 1 test account")
        };
        let password = lookup(&client, &request).await.unwrap();

        search.assert();
        delete.assert();
        assert!(password.is_none());
    }

    #[tokio::test]
    async fn test_lookup_absent_already_gone() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/search"}"#);
            then.status(200).json_body(not_found());
        });
        let delete = server.mock(|when, then| {
            when.method(POST)
                .path("/api.php")
                .json_body_partial(r#"{"method": "account/delete"}"#);
            then.status(200).json_body(json!({"result": {"resultCode": 0}}));
        });

        let client = test_client(&server, 10);
        let request = LookupRequest {
            state: State::Absent,
            ..LookupRequest::new("Server 1 test account")
        };
        let password = lookup(&client, &request).await.unwrap();

        search.assert();
        assert_eq!(delete.hits(), 0);
        assert!(password.is_none());
    }
}
