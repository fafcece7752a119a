//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;

pub mod runtime_config;
pub mod server;
mod static_files;

pub use crate::runtime_config::{config_from_args, gen_config, service_from_args};
pub use crate::server::webserver;
