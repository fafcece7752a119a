//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;

pub mod datasources;
pub mod map_service;
#[cfg(test)]
mod map_service_test;
pub mod metadata;
pub mod sequencer;
#[cfg(test)]
mod sequencer_test;
