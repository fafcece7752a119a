//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::datasources::{Datasource, FeatureSource, FileSource};
use crate::map_service::MapService;
use crate::sequencer::{Dataset, Stage};
use quakemap_core::core::config::DEFAULT_CONFIG;
use quakemap_core::core::legend::ControlPosition;
use quakemap_core::core::{parse_config, read_config, ApplicationCfg, Config};

fn map_service() -> MapService {
    let config: ApplicationCfg = read_config("src/test/example.toml").unwrap();
    MapService::from_config(&config).unwrap()
}

#[test]
fn test_from_config() {
    let service = map_service();
    assert_eq!(service.zoom, 5);
    assert_eq!(service.center.lat, 41.8781);
    assert_eq!(service.center.lng, -87.6298);
    assert_eq!(service.default_basemap.name, "Topography");
    assert_eq!(service.default_basemap.maxzoom, Some(17));
    assert_eq!(service.basemaps.len(), 2);
    assert_eq!(service.plate_style.weight, 3.0);
    assert_eq!(service.datasources.seismic.origin(), "src/test/earthquakes.geojson");
    match service.datasources.tectonic {
        Datasource::File(ref ds) => assert_eq!(ds.path, "src/test/plates.geojson"),
        _ => panic!("file datasource expected"),
    }
}

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    assert_eq!(service.default_basemap.name, "Street");
    match service.datasources.seismic {
        Datasource::Http(ref ds) => assert!(ds.url.ends_with("all_week.geojson")),
        _ => panic!("http datasource expected"),
    }
}

#[test]
fn test_config_errors() {
    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    config.map.basemap = "Satellite".to_string();
    assert_eq!(
        MapService::from_config(&config).err(),
        Some("Default basemap `Satellite` not found".to_string())
    );

    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    config.datasource.tectonic.url = None;
    assert_eq!(
        MapService::from_config(&config).err(),
        Some("datasource.tectonic: Datasource requires `url` or `path`".to_string())
    );
}

#[test]
fn test_gen_config() {
    let mut toml = MapService::gen_config();
    println!("{}", toml);
    assert_eq!(Some("# quakemap configuration"), toml.lines().next());
    toml.push_str("\n[webserver]\n");
    let config: ApplicationCfg = parse_config(toml, "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    assert_eq!(service.basemaps.len(), 1);
    assert_eq!(service.plate_style.color, "#ff7800");
}

#[test]
fn test_runtime_config() {
    let service = map_service();
    let mut toml = service.gen_runtime_config();
    println!("{}", toml);
    toml.push_str("\n[webserver]\n");
    let config: ApplicationCfg = parse_config(toml, "").unwrap();
    assert_eq!(config.map.zoom, 5);
    assert_eq!(config.basemaps.len(), 2);
    assert_eq!(config.basemaps[1].maxzoom, Some(17));
    assert_eq!(
        config.datasource.tectonic.path,
        Some("src/test/plates.geojson".to_string())
    );
    assert_eq!(config.style.tectonic.weight, Some(3.0));
}

#[test]
fn test_new_map() {
    let service = map_service();
    let map = service.new_map();
    assert_eq!(map.view().basemap, "Topography");
    assert_eq!(map.view().zoom, 5);
    let control = map.layer_control().unwrap();
    assert_eq!(control.position, ControlPosition::TopRight);
    assert_eq!(control.basemaps, vec!["Topography", "Street"]);
    assert!(map.children().is_empty());
}

#[tokio::test]
async fn test_file_session() {
    let service = map_service();
    let session = service.run_session().await;
    assert!(session.is_complete());
    assert_eq!(session.failure, None);
    assert_eq!(session.map.children().len(), 3);
    let quakes = session.map.overlay("Earthquakes").unwrap();
    let popups: Vec<&str> = quakes.markers().map(|m| m.popup.as_str()).collect();
    assert_eq!(
        popups[1],
        "Magnitude: <strong>3</strong><br>Depth: <strong>45</strong><br>Location: 25 km N of Anchorage, Alaska"
    );
    let plates = session.map.overlay("Tectonic Plates").unwrap();
    assert!(plates.paths().all(|p| p.style.weight == 3.0));
}

#[tokio::test]
async fn test_missing_file_session() {
    let mut service = map_service();
    service.datasources.seismic = Datasource::File(FileSource::new("src/test/missing.geojson"));
    let session = service.run_session().await;
    assert_eq!(session.stage, Stage::Failed(Dataset::Seismic));
    assert!(session
        .failure
        .unwrap()
        .starts_with("reading src/test/missing.geojson failed"));
    assert!(session.map.children().is_empty());
    assert!(session.map.layer_control().is_some());
}

#[tokio::test]
async fn test_malformed_file_session() {
    let mut service = map_service();
    service.datasources.seismic =
        Datasource::File(FileSource::new("src/test/earthquakes_malformed.geojson"));
    let session = service.run_session().await;
    assert_eq!(session.stage, Stage::Failed(Dataset::Seismic));
    assert_eq!(
        session.failure,
        Some("layer `Earthquakes`: malformed feature #1: missing property `mag`".to_string())
    );
}

#[tokio::test]
async fn test_map_json() {
    let service = map_service();
    let session = service.run_session().await;
    let json = session.get_map_json().unwrap();
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
    assert_eq!(json["center"], json!([41.8781, -87.6298]));
    assert_eq!(json["basemap"], "Topography");
    assert_eq!(json["stage"], "tectonic_ready");
    assert_eq!(json["layer_control"]["position"], "topright");
    assert_eq!(json["basemaps"][0]["maxZoom"], 17);
    assert_eq!(json["children"][0]["type"], "overlay");
    assert_eq!(json["children"][0]["name"], "Earthquakes");
    let marker = &json["children"][0]["elements"][2];
    assert_eq!(marker["kind"], "circle");
    assert_eq!(marker["location"], json!({"lat": 38.3, "lng": 142.37}));
    assert_eq!(marker["style"]["fillColor"], "#ea2c2c");
    assert_eq!(marker["style"]["radius"], 28.5);
    assert_eq!(json["children"][1]["type"], "legend");
    assert_eq!(json["children"][1]["position"], "bottomright");
    assert!(json["children"][1]["html"]
        .as_str()
        .unwrap()
        .contains("90+"));
    assert_eq!(json["children"][2]["elements"][0]["kind"], "path");
    assert_eq!(
        json["children"][2]["elements"][0]["geometry"]["type"],
        "LineString"
    );
}

#[test]
fn test_legend_json() {
    let service = map_service();
    let json = service.get_legend_json().unwrap();
    assert_eq!(json["entries"].as_array().unwrap().len(), 6);
    assert_eq!(json["entries"][5]["label"], "90+");
    assert_eq!(json["html"], service.get_legend_html());

    let json = service.get_basemaps_json().unwrap();
    assert_eq!(json["default"], "Topography");
    assert_eq!(json["basemaps"][1]["subdomains"], "abc");
}

#[tokio::test]
#[ignore]
async fn test_usgs_feed() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    let collection = service.datasources.seismic.fetch().await.unwrap();
    assert!(!collection.is_empty());
    let session = service.run_session().await;
    assert_eq!(session.stage, Stage::TectonicReady);
}
