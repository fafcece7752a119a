//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::datasources::{decode_collection, FeatureSource};
use crate::sequencer::{AcquisitionSequencer, Dataset, Stage, SEISMIC_LAYER, TECTONIC_LAYER};
use futures_util::future::BoxFuture;
use quakemap_core::core::error::{AcquisitionError, FeatureError, FetchError, LayerError};
use quakemap_core::core::feature::FeatureCollection;
use quakemap_core::core::geom::LatLng;
use quakemap_core::core::layer::TileLayer;
use quakemap_core::core::style::PathStyle;
use quakemap_core::service::map::{MapChild, MapController};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned response with fetch counter. Requests are recorded in a shared log.
struct MockSource<'a> {
    name: &'static str,
    response: Result<&'static str, u16>,
    calls: AtomicUsize,
    log: &'a Mutex<Vec<String>>,
}

impl<'a> MockSource<'a> {
    fn new(name: &'static str, response: Result<&'static str, u16>, log: &'a Mutex<Vec<String>>) -> Self {
        MockSource {
            name,
            response,
            calls: AtomicUsize::new(0),
            log,
        }
    }
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<'a> FeatureSource for MockSource<'a> {
    fn origin(&self) -> &str {
        self.name
    }
    fn fetch(&self) -> BoxFuture<'_, Result<FeatureCollection, FetchError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("fetch {}", self.name));
        Box::pin(async move {
            match self.response {
                Ok(body) => decode_collection(self.name, body),
                Err(status) => Err(FetchError::Status {
                    url: self.name.to_string(),
                    status,
                }),
            }
        })
    }
}

const QUAKES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"mag":0,"place":"The Geysers, CA"},"geometry":{"type":"Point","coordinates":[-122.8,38.8,-5]}},
  {"type":"Feature","properties":{"mag":3,"place":"Anchorage, Alaska"},"geometry":{"type":"Point","coordinates":[-149.9,61.4,45]}},
  {"type":"Feature","properties":{"mag":6,"place":"Honshu, Japan"},"geometry":{"type":"Point","coordinates":[142.4,38.3,95]}}
]}"#;

const QUAKES_MISSING_MAG: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"mag":2.5,"place":"Ridgecrest, CA"},"geometry":{"type":"Point","coordinates":[-117.6,35.5,8]}},
  {"type":"Feature","properties":{"place":"Central Alaska"},"geometry":{"type":"Point","coordinates":[-150.2,63.1,12]}}
]}"#;

const QUAKES_QUOTED_MAG: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"mag":2.5,"place":"Ridgecrest, CA"},"geometry":{"type":"Point","coordinates":[-117.6,35.5,8]}},
  {"type":"Feature","properties":{"mag":"4.1","place":"Central Alaska"},"geometry":{"type":"Point","coordinates":[-150.2,63.1,12]}}
]}"#;

const PLATES: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"PlateName":"Africa"},"geometry":{"type":"LineString","coordinates":[[-0.4,-54.8],[0.4,-54.4]]}},
  {"type":"Feature","properties":{"Name":"NA-PA"},"geometry":{"type":"LineString","coordinates":[[-124.5,40.3],[-125.1,40.4]]}}
]}"#;

fn new_map() -> MapController {
    let street = TileLayer::new(
        "Street",
        "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        "OSM",
    );
    let mut map = MapController::initialize(LatLng::new(41.8781, -87.6298), 7, street);
    map.attach_layer_control();
    map
}

fn child_kinds(map: &MapController) -> Vec<String> {
    map.children()
        .iter()
        .map(|child| match child {
            MapChild::Overlay(layer) => layer.name.clone(),
            MapChild::Legend(_) => "legend".to_string(),
        })
        .collect()
}

#[tokio::test]
async fn test_full_acquisition() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Ok(QUAKES), &log);
    let tectonic = MockSource::new("tectonic", Ok(PLATES), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    let stage = sequencer.run(&mut map).await;
    assert_eq!(stage, Stage::TectonicReady);
    assert!(stage.is_terminal());
    assert_eq!(
        sequencer.history(),
        &[
            Stage::Idle,
            Stage::SeismicPending,
            Stage::SeismicReady,
            Stage::TectonicPending,
            Stage::TectonicReady
        ]
    );
    assert!(sequencer.failure().is_none());
    assert_eq!(seismic.calls(), 1);
    assert_eq!(tectonic.calls(), 1);
    assert_eq!(*log.lock().unwrap(), vec!["fetch seismic", "fetch tectonic"]);

    assert_eq!(child_kinds(&map), vec![SEISMIC_LAYER, "legend", TECTONIC_LAYER]);
    assert_eq!(map.view().overlays, vec![SEISMIC_LAYER, TECTONIC_LAYER]);
    assert_eq!(map.legends().len(), 1);

    let quakes = map.overlay(SEISMIC_LAYER).unwrap();
    let colors: Vec<&str> = quakes.markers().map(|m| m.style.fill_color.as_str()).collect();
    assert_eq!(colors, vec!["#98ee00", "#eecc00", "#ea2c2c"]);
    let radii: Vec<f64> = quakes.markers().map(|m| m.style.radius).collect();
    assert_eq!(radii, vec![1.0, 14.25, 28.5]);

    let plates = map.overlay(TECTONIC_LAYER).unwrap();
    let popups: Vec<&str> = plates.paths().map(|p| p.popup.as_str()).collect();
    assert_eq!(
        popups,
        vec!["<strong>Plate:</strong> Africa", "<strong>Plate:</strong> Unknown"]
    );
}

#[tokio::test]
async fn test_seismic_fetch_failure() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Err(503), &log);
    let tectonic = MockSource::new("tectonic", Ok(PLATES), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    let stage = sequencer.run(&mut map).await;
    assert_eq!(stage, Stage::Failed(Dataset::Seismic));
    assert_eq!(
        sequencer.history(),
        &[Stage::Idle, Stage::SeismicPending, Stage::Failed(Dataset::Seismic)]
    );
    assert_eq!(tectonic.calls(), 0);
    assert!(map.children().is_empty());
    assert!(map.legends().is_empty());
    assert_eq!(map.basemaps().len(), 1);
    match sequencer.failure() {
        Some(AcquisitionError::Fetch(FetchError::Status { status, .. })) => {
            assert_eq!(*status, 503)
        }
        other => panic!("unexpected failure {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_seismic_feature() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Ok(QUAKES_MISSING_MAG), &log);
    let tectonic = MockSource::new("tectonic", Ok(PLATES), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    assert_eq!(sequencer.run(&mut map).await, Stage::Failed(Dataset::Seismic));
    assert_eq!(tectonic.calls(), 0);
    assert!(map.children().is_empty());
    match sequencer.failure() {
        Some(AcquisitionError::Layer(LayerError::MalformedFeature { layer, index, .. })) => {
            assert_eq!(layer, SEISMIC_LAYER);
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected failure {:?}", other),
    }
}

#[tokio::test]
async fn test_wrongly_typed_seismic_feature() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Ok(QUAKES_QUOTED_MAG), &log);
    let tectonic = MockSource::new("tectonic", Ok(PLATES), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    assert_eq!(sequencer.run(&mut map).await, Stage::Failed(Dataset::Seismic));
    assert_eq!(tectonic.calls(), 0);
    assert!(map.children().is_empty());
    match sequencer.failure() {
        Some(AcquisitionError::Layer(LayerError::MalformedFeature {
            layer,
            index,
            source: FeatureError::Invalid(message),
        })) => {
            assert_eq!(layer, SEISMIC_LAYER);
            assert_eq!(*index, 1);
            assert!(message.contains("invalid type"), "{}", message);
        }
        other => panic!("unexpected failure {:?}", other),
    }
}

#[tokio::test]
async fn test_tectonic_failure() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Ok(QUAKES), &log);
    let tectonic = MockSource::new("tectonic", Ok("<html>Not found</html>"), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    let stage = sequencer.run(&mut map).await;
    assert_eq!(stage, Stage::Failed(Dataset::Tectonic));
    assert_eq!(
        sequencer.history(),
        &[
            Stage::Idle,
            Stage::SeismicPending,
            Stage::SeismicReady,
            Stage::TectonicPending,
            Stage::Failed(Dataset::Tectonic)
        ]
    );
    assert_eq!(child_kinds(&map), vec![SEISMIC_LAYER, "legend"]);
    assert!(map.overlay(TECTONIC_LAYER).is_none());
    match sequencer.failure() {
        Some(AcquisitionError::Fetch(FetchError::Decode { origin, .. })) => {
            assert_eq!(origin, "tectonic")
        }
        other => panic!("unexpected failure {:?}", other),
    }
}

#[tokio::test]
async fn test_run_once() {
    let log = Mutex::new(Vec::new());
    let seismic = MockSource::new("seismic", Ok(QUAKES), &log);
    let tectonic = MockSource::new("tectonic", Ok(PLATES), &log);
    let mut map = new_map();
    let mut sequencer = AcquisitionSequencer::new(&seismic, &tectonic, PathStyle::default());

    sequencer.run(&mut map).await;
    assert_eq!(sequencer.run(&mut map).await, Stage::TectonicReady);
    assert_eq!(seismic.calls(), 1);
    assert_eq!(map.children().len(), 3);
}

#[test]
fn test_stage_display() {
    assert_eq!(Stage::SeismicPending.to_string(), "seismic pending");
    assert_eq!(
        Stage::Failed(Dataset::Tectonic).to_string(),
        "failed (tectonic)"
    );
    assert_eq!(
        serde_json::to_string(&Stage::Failed(Dataset::Seismic)).unwrap(),
        r#"{"failed":"seismic"}"#
    );
    assert_eq!(
        serde_json::to_string(&Stage::TectonicReady).unwrap(),
        r#""tectonic_ready""#
    );
    assert!(!Stage::SeismicReady.is_terminal());
}
