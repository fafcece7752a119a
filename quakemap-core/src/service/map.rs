//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::LatLng;
use crate::core::layer::{OverlayLayer, TileLayer};
use crate::core::legend::{ControlPosition, Legend};

/// Viewport and layer selection of one map session
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct MapViewState {
    pub center: LatLng,
    pub zoom: u8,
    /// Active base layer
    pub basemap: String,
    /// Attached overlays by name
    pub overlays: Vec<String>,
}

/// User control switching between base layers
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct LayerControl {
    pub position: ControlPosition,
    pub basemaps: Vec<String>,
}

/// Element attached to the live map
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapChild {
    Overlay(OverlayLayer),
    Legend(Legend),
}

impl From<OverlayLayer> for MapChild {
    fn from(layer: OverlayLayer) -> MapChild {
        MapChild::Overlay(layer)
    }
}

impl From<Legend> for MapChild {
    fn from(legend: Legend) -> MapChild {
        MapChild::Legend(legend)
    }
}

#[derive(Clone, Debug)]
pub struct MapController {
    view: MapViewState,
    basemaps: Vec<TileLayer>,
    layer_control: Option<LayerControl>,
    children: Vec<MapChild>,
}

impl MapController {
    /// New map showing `basemap`
    pub fn initialize(center: LatLng, zoom: u8, basemap: TileLayer) -> MapController {
        info!(
            "Map centered at {},{} zoom {} with basemap `{}`",
            center.lat, center.lng, zoom, basemap.name
        );
        MapController {
            view: MapViewState {
                center,
                zoom,
                basemap: basemap.name.clone(),
                overlays: Vec::new(),
            },
            basemaps: vec![basemap],
            layer_control: None,
            children: Vec::new(),
        }
    }
    /// Add base layers. A layer with an already registered name replaces it.
    pub fn register_base_layers(&mut self, layers: Vec<TileLayer>) {
        for layer in layers {
            match self.basemaps.iter_mut().find(|l| l.name == layer.name) {
                Some(existing) => *existing = layer,
                None => self.basemaps.push(layer),
            }
        }
        if let Some(ref mut control) = self.layer_control {
            control.basemaps = self.basemaps.iter().map(|l| l.name.clone()).collect();
        }
    }
    /// Show layer switcher listing all registered base layers
    pub fn attach_layer_control(&mut self) -> &LayerControl {
        let control = LayerControl {
            position: ControlPosition::TopRight,
            basemaps: self.basemaps.iter().map(|l| l.name.clone()).collect(),
        };
        self.layer_control.get_or_insert(control)
    }
    /// Add an overlay or the legend. Attaching the same element twice shows it twice.
    pub fn attach<C: Into<MapChild>>(&mut self, child: C) {
        let child = child.into();
        if self.children.contains(&child) {
            warn!("Element attached twice to map");
        }
        match &child {
            MapChild::Overlay(layer) => {
                info!("Attaching layer `{}` ({} elements)", layer.name, layer.len());
                self.view.overlays.push(layer.name.clone());
            }
            MapChild::Legend(_) => info!("Attaching legend"),
        }
        self.children.push(child);
    }
    /// Switch active base layer
    pub fn select_base_layer(&mut self, name: &str) -> Result<(), String> {
        if self.basemaps.iter().any(|l| l.name == name) {
            self.view.basemap = name.to_string();
            Ok(())
        } else {
            Err(format!("Unknown basemap `{}`", name))
        }
    }
    pub fn view(&self) -> &MapViewState {
        &self.view
    }
    pub fn basemaps(&self) -> &[TileLayer] {
        &self.basemaps
    }
    pub fn basemap(&self, name: &str) -> Option<&TileLayer> {
        self.basemaps.iter().find(|l| l.name == name)
    }
    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.layer_control.as_ref()
    }
    /// Attached elements in attach order
    pub fn children(&self) -> &[MapChild] {
        &self.children
    }
    pub fn overlay(&self, name: &str) -> Option<&OverlayLayer> {
        self.children.iter().find_map(|child| match child {
            MapChild::Overlay(layer) if layer.name == name => Some(layer),
            _ => None,
        })
    }
    pub fn legends(&self) -> Vec<&Legend> {
        self.children
            .iter()
            .filter_map(|child| match child {
                MapChild::Legend(legend) => Some(legend),
                _ => None,
            })
            .collect()
    }
}
