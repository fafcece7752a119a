//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
    /// Generate configuration template with runtime information
    fn gen_runtime_config(&self) -> String {
        Self::gen_config()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub map: MapCfg,
    #[serde(rename = "basemap")]
    pub basemaps: Vec<BaseLayerCfg>,
    pub datasource: DatasourcesCfg,
    #[serde(default)]
    pub style: StyleCfg,
    pub webserver: WebserverCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MapCfg {
    /// Initial center as (lat, lon)
    pub center: (f64, f64),
    pub zoom: u8,
    /// Name of the base layer shown at startup
    pub basemap: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BaseLayerCfg {
    pub name: String,
    /// Tile URL template with {s}, {z}, {x} and {y} placeholders
    pub url: String,
    pub attribution: String,
    /// Subdomains substituted for {s} (Default: abc)
    pub subdomains: Option<String>,
    pub maxzoom: Option<u8>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatasourcesCfg {
    pub seismic: DatasourceCfg,
    pub tectonic: DatasourceCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatasourceCfg {
    // HTTP(S)
    pub url: Option<String>,
    // Local GeoJSON file
    pub path: Option<String>,
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct StyleCfg {
    #[serde(default)]
    pub tectonic: PathStyleCfg,
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct PathStyleCfg {
    pub color: Option<String>,
    pub weight: Option<f64>,
    pub opacity: Option<f64>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebserverCfg {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub threads: Option<u8>,
    // Cache-Control headers set by web server
    // https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Cache-Control#Expiration
    pub cache_control_max_age: Option<u32>,
    #[serde(rename = "static", default)]
    pub static_: Vec<WebserverStaticCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebserverStaticCfg {
    pub path: String,
    pub dir: String,
}

pub const DEFAULT_CONFIG: &'static str = r##"
[map]
center = [41.8781, -87.6298]
zoom = 7
basemap = "Street"

[[basemap]]
name = "Street"
url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
attribution = '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'

[[basemap]]
name = "Topography"
url = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png"
attribution = 'Map data: &copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors, <a href="http://viewfinderpanoramas.org">SRTM</a> | Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> (<a href="https://creativecommons.org/licenses/by-sa/3.0/">CC-BY-SA</a>)'

[datasource.seismic]
url = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"

[datasource.tectonic]
url = "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json"

[style.tectonic]
color = "#ff7800"
weight = 2.0
opacity = 0.7

[webserver]
bind = "127.0.0.1"
port = 6767
"##;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
