// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! sysPass API calls, one submodule per kind of entity.

pub mod accounts;
pub mod backup;
pub mod categories;
pub mod clients;
pub mod rpc;
pub mod tags;
pub mod user_groups;

pub use rpc::SyspassClient;
