//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod classify;
pub mod config;
pub mod error;
pub mod feature;
pub mod geom;
pub mod layer;
pub mod legend;
pub mod style;

pub use self::config::{parse_config, read_config, ApplicationCfg, Config};
