// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Errors raised while talking to the sysPass API.

use serde_json::Value;
use thiserror::Error;

/// Failures that are specific to sysPass (as opposed to transport or JSON
/// errors, which are propagated as-is).
#[derive(Error, Debug)]
pub enum SyspassError {
    /// The API answered, but the response didn't carry the success signal
    /// expected for the method (`count`, `itemId`, `resultCode`) or it
    /// contained an `error` key. The raw response is kept untouched.
    #[error("{method} failed: {response}")]
    Rpc { method: String, response: Value },

    #[error("No {kind} named {name:?} exists in sysPass")]
    NotFound { kind: &'static str, name: String },

    #[error("Missing required field {0:?} to create an account")]
    MissingField(&'static str),

    #[error("Cannot generate password: {0}")]
    Password(String),
}

impl SyspassError {
    pub fn rpc(method: &str, response: Value) -> Self {
        SyspassError::Rpc {
            method: method.to_owned(),
            response,
        }
    }
}
