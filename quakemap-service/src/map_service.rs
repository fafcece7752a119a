//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::datasources::Datasources;
use crate::sequencer::{AcquisitionSequencer, Stage};
use quakemap_core::core::geom::LatLng;
use quakemap_core::core::layer::TileLayer;
use quakemap_core::core::style::PathStyle;
use quakemap_core::core::{ApplicationCfg, Config};
use quakemap_core::service::map::MapController;

/// Earthquake map service
#[derive(Clone, Debug)]
pub struct MapService {
    pub center: LatLng,
    pub zoom: u8,
    /// Base layer shown at startup
    pub default_basemap: TileLayer,
    pub basemaps: Vec<TileLayer>,
    pub datasources: Datasources,
    pub plate_style: PathStyle,
}

/// Result of one acquisition run
#[derive(Debug)]
pub struct MapSession {
    pub map: MapController,
    pub stage: Stage,
    pub history: Vec<Stage>,
    pub failure: Option<String>,
}

impl MapSession {
    /// Both overlays and the legend attached
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::TectonicReady
    }
}

impl MapService {
    /// Map with base layers and layer control, without data overlays
    pub fn new_map(&self) -> MapController {
        let mut map =
            MapController::initialize(self.center, self.zoom, self.default_basemap.clone());
        map.register_base_layers(self.basemaps.clone());
        map.attach_layer_control();
        map
    }
    /// Fetch datasources in order and compose a new map
    pub async fn run_session(&self) -> MapSession {
        let mut map = self.new_map();
        let mut sequencer = AcquisitionSequencer::new(
            &self.datasources.seismic,
            &self.datasources.tectonic,
            self.plate_style.clone(),
        );
        let stage = sequencer.run(&mut map).await;
        MapSession {
            stage,
            history: sequencer.history().to_vec(),
            failure: sequencer.failure().map(|e| e.to_string()),
            map,
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for MapService {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let basemaps = config
            .basemaps
            .iter()
            .map(TileLayer::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        let default_basemap = basemaps
            .iter()
            .find(|l| l.name == config.map.basemap)
            .cloned()
            .ok_or(format!("Default basemap `{}` not found", config.map.basemap))?;
        let datasources = Datasources::from_config(config)?;
        let plate_style = PathStyle::from_config(&config.style.tectonic)?;
        Ok(MapService {
            center: LatLng::from(config.map.center),
            zoom: config.map.zoom,
            default_basemap,
            basemaps,
            datasources,
            plate_style,
        })
    }
    fn gen_config() -> String {
        let toml = r#"# quakemap configuration

[map]
# Initial center (lat, lon)
center = [41.8781, -87.6298]
zoom = 7
basemap = "Street"
"#;
        let mut config = toml.to_string();
        config.push_str(&TileLayer::gen_config());
        config.push_str(&Datasources::gen_config());
        config.push_str(&PathStyle::gen_config());
        config
    }
    fn gen_runtime_config(&self) -> String {
        let mut config = format!(
            "# quakemap configuration\n\n[map]\ncenter = [{:?}, {:?}]\nzoom = {}\nbasemap = \"{}\"\n",
            self.center.lat, self.center.lng, self.zoom, self.default_basemap.name
        );
        for basemap in &self.basemaps {
            config.push_str(&basemap.gen_runtime_config());
        }
        config.push_str(&self.datasources.gen_runtime_config());
        config.push_str(&self.plate_style.gen_runtime_config());
        config
    }
}
