//! sysPass API client, lookup workflow and password generation.
//!
//! [api] maps one function to each JSON-RPC method, [lookup] composes them
//! into the get-or-create/delete workflow and [password] generates passwords
//! for new accounts.

pub mod api;
pub mod commands;
pub mod error;
pub mod lookup;
pub mod models;
pub mod password;
