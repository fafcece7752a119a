//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::ArgMatches;
use futures_util::future::BoxFuture;
use quakemap_core::core::config::{ApplicationCfg, DatasourceCfg};
use quakemap_core::core::error::{DecodeError, FetchError};
use quakemap_core::core::feature::FeatureCollection;
use quakemap_core::core::Config;

/// Asynchronous provider of a GeoJSON feature collection.
///
/// Each call to `fetch` issues exactly one request. There is no retry and no timeout.
pub trait FeatureSource {
    /// URL or path for log and error messages
    fn origin(&self) -> &str;
    fn fetch(&self) -> BoxFuture<'_, Result<FeatureCollection, FetchError>>;
}

/// Decode a response body into a typed collection
pub fn decode_collection(origin: &str, body: &str) -> Result<FeatureCollection, FetchError> {
    FeatureCollection::from_geojson(body).map_err(|err| match err {
        DecodeError::Collection(message) => FetchError::Decode {
            origin: origin.to_string(),
            message,
        },
        DecodeError::Feature { index, message } => FetchError::InvalidFeature {
            origin: origin.to_string(),
            index,
            message,
        },
    })
}

/// GeoJSON from an HTTP(S) endpoint
#[derive(Clone, Debug)]
pub struct HttpSource {
    pub url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> HttpSource {
        HttpSource {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl FeatureSource for HttpSource {
    fn origin(&self) -> &str {
        &self.url
    }
    fn fetch(&self) -> BoxFuture<'_, Result<FeatureCollection, FetchError>> {
        Box::pin(async move {
            debug!("GET {}", self.url);
            let request_error = |e: reqwest::Error| FetchError::Request {
                url: self.url.clone(),
                message: e.to_string(),
            };
            let resp = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(request_error)?;
            if !resp.status().is_success() {
                return Err(FetchError::Status {
                    url: self.url.clone(),
                    status: resp.status().as_u16(),
                });
            }
            let body = resp.text().await.map_err(request_error)?;
            decode_collection(&self.url, &body)
        })
    }
}

/// GeoJSON from a local file
#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: String,
}

impl FileSource {
    pub fn new(path: &str) -> FileSource {
        FileSource {
            path: path.to_string(),
        }
    }
}

impl FeatureSource for FileSource {
    fn origin(&self) -> &str {
        &self.path
    }
    fn fetch(&self) -> BoxFuture<'_, Result<FeatureCollection, FetchError>> {
        Box::pin(async move {
            debug!("Reading {}", self.path);
            let body = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| FetchError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            decode_collection(&self.path, &body)
        })
    }
}

#[derive(Clone, Debug)]
pub enum Datasource {
    Http(HttpSource),
    File(FileSource),
}

impl Datasource {
    /// Datasource from a command line value: URLs with http(s) scheme, file paths otherwise
    pub fn from_location(location: &str) -> Datasource {
        if location.starts_with("http://") || location.starts_with("https://") {
            Datasource::Http(HttpSource::new(location))
        } else {
            Datasource::File(FileSource::new(location))
        }
    }
}

impl FeatureSource for Datasource {
    fn origin(&self) -> &str {
        match self {
            &Datasource::Http(ref ds) => ds.origin(),
            &Datasource::File(ref ds) => ds.origin(),
        }
    }
    fn fetch(&self) -> BoxFuture<'_, Result<FeatureCollection, FetchError>> {
        match self {
            &Datasource::Http(ref ds) => ds.fetch(),
            &Datasource::File(ref ds) => ds.fetch(),
        }
    }
}

impl<'a> Config<'a, DatasourceCfg> for Datasource {
    fn from_config(ds_cfg: &DatasourceCfg) -> Result<Self, String> {
        match (&ds_cfg.url, &ds_cfg.path) {
            (Some(url), None) => Ok(Datasource::Http(HttpSource::new(url))),
            (None, Some(path)) => Ok(Datasource::File(FileSource::new(path))),
            (Some(_), Some(_)) => Err("Datasource with both `url` and `path`".to_string()),
            (None, None) => Err("Datasource requires `url` or `path`".to_string()),
        }
    }
    fn gen_config() -> String {
        let toml = r#"
[datasource.seismic]
# USGS summary feed (or `path` to a local GeoJSON file)
url = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"

[datasource.tectonic]
url = "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json"
#path = "PB2002_boundaries.json"
"#;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        match self {
            &Datasource::Http(ref ds) => format!("url = \"{}\"\n", ds.url),
            &Datasource::File(ref ds) => format!("path = \"{}\"\n", ds.path),
        }
    }
}

/// Seismic event and plate boundary inputs
#[derive(Clone, Debug)]
pub struct Datasources {
    pub seismic: Datasource,
    pub tectonic: Datasource,
}

impl<'a> Config<'a, ApplicationCfg> for Datasources {
    fn from_config(app_cfg: &ApplicationCfg) -> Result<Self, String> {
        let seismic = Datasource::from_config(&app_cfg.datasource.seismic)
            .map_err(|e| format!("datasource.seismic: {}", e))?;
        let tectonic = Datasource::from_config(&app_cfg.datasource.tectonic)
            .map_err(|e| format!("datasource.tectonic: {}", e))?;
        Ok(Datasources { seismic, tectonic })
    }
    fn gen_config() -> String {
        Datasource::gen_config()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            "\n[datasource.seismic]\n{}\n[datasource.tectonic]\n{}",
            self.seismic.gen_runtime_config(),
            self.tectonic.gen_runtime_config()
        )
    }
}

impl Datasources {
    /// Override configured datasources with `--seismic` and `--tectonic` arguments
    pub fn override_from_args(&mut self, args: &ArgMatches) {
        if let Some(location) = args.value_of("seismic") {
            info!("Seismic events from {}", location);
            self.seismic = Datasource::from_location(location);
        }
        if let Some(location) = args.value_of("tectonic") {
            info!("Plate boundaries from {}", location);
            self.tectonic = Datasource::from_location(location);
        }
    }
}
