// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::api::SyspassClient;
use crate::core::password::PasswordPolicy;

/// Placeholder shown instead of secrets by the `config` subcommand.
pub const REDACTED: &str = "********";

/// Used only for `config` subcommand to show all config.
/// When talking to sysPass, the ApiConfig below is used; password generation
/// only needs PasswordConfig.
#[derive(Debug, Deserialize, Serialize)]
pub struct CompleteAppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub password: PasswordSettings,
}

impl CompleteAppConfig {
    /// Copy of the config that is safe to print.
    pub fn redacted(self) -> Self {
        Self {
            api: ApiSettings {
                token: REDACTED.to_owned(),
                token_pass: self.api.token_pass.map(|_| REDACTED.to_owned()),
                ..self.api
            },
            password: self.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub api: ApiSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct PasswordConfig {
    #[serde(default)]
    pub password: PasswordSettings,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    /// JSON-RPC endpoint, e.g. https://syspass.example.com/api.php
    pub url: Url,
    /// Found in Users & Accesses -> API Authorizations
    pub token: String,
    /// Password of the API authorization, required to view, create or delete
    /// accounts.
    pub token_pass: Option<String>,
    /// Request timeout, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

fn default_timeout() -> u64 {
    30
}

fn default_verify_tls() -> bool {
    true
}

impl ApiSettings {
    pub fn client(&self) -> Result<SyspassClient> {
        SyspassClient::new_with_params(
            self.url.clone(),
            self.token.clone(),
            self.token_pass.clone(),
            self.timeout,
            self.verify_tls,
        )
    }
}

/// Defaults for generated passwords; command-line flags take precedence.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PasswordSettings {
    pub length: Option<usize>,
    pub chars: Option<Vec<String>>,
}

impl PasswordSettings {
    pub fn policy(&self) -> PasswordPolicy {
        let default = PasswordPolicy::default();
        PasswordPolicy {
            length: self.length.unwrap_or(default.length),
            chars: self.chars.clone().unwrap_or(default.chars),
        }
    }
}
