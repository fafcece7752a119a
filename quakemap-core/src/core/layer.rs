//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::BaseLayerCfg;
use crate::core::error::{FeatureError, LayerError};
use crate::core::feature::{FeatureCollection, GeoFeature};
use crate::core::geom::{Geometry, LatLng};
use crate::core::style::{PathStyle, StyleDescriptor};
use crate::core::Config;

pub const DEFAULT_SUBDOMAINS: &str = "abc";

/// Background tile layer
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TileLayer {
    pub name: String,
    /// URL template with {s}, {z}, {x} and {y} placeholders
    pub url: String,
    pub attribution: String,
    pub subdomains: String,
    #[serde(rename = "maxZoom", skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<u8>,
}

impl TileLayer {
    pub fn new(name: &str, url: &str, attribution: &str) -> TileLayer {
        TileLayer {
            name: name.to_string(),
            url: url.to_string(),
            attribution: attribution.to_string(),
            subdomains: DEFAULT_SUBDOMAINS.to_string(),
            maxzoom: None,
        }
    }
    /// Tile URL at x, y, z in XYZ adressing scheme
    pub fn tile_url(&self, xtile: u32, ytile: u32, zoom: u8) -> String {
        let subdomains: Vec<char> = self.subdomains.chars().collect();
        let s = if subdomains.is_empty() {
            String::new()
        } else {
            let idx = (xtile as usize + ytile as usize) % subdomains.len();
            subdomains[idx].to_string()
        };
        self.url
            .replace("{s}", &s)
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &xtile.to_string())
            .replace("{y}", &ytile.to_string())
    }
}

impl<'a> Config<'a, BaseLayerCfg> for TileLayer {
    fn from_config(cfg: &BaseLayerCfg) -> Result<Self, String> {
        for placeholder in &["{z}", "{x}", "{y}"] {
            if !cfg.url.contains(placeholder) {
                return Err(format!(
                    "basemap `{}`: url template is missing {}",
                    cfg.name, placeholder
                ));
            }
        }
        Ok(TileLayer {
            name: cfg.name.clone(),
            url: cfg.url.clone(),
            attribution: cfg.attribution.clone(),
            subdomains: cfg
                .subdomains
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBDOMAINS.to_string()),
            maxzoom: cfg.maxzoom,
        })
    }

    fn gen_config() -> String {
        let toml = r#"
[[basemap]]
name = "Street"
url = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png"
attribution = '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
#subdomains = "abc"
#maxzoom = 19
"#;
        toml.to_string()
    }

    fn gen_runtime_config(&self) -> String {
        let mut lines = vec!["\n[[basemap]]".to_string()];
        lines.push(format!(r#"name = "{}""#, self.name));
        lines.push(format!(r#"url = "{}""#, self.url));
        lines.push(format!("attribution = '{}'", self.attribution));
        if self.subdomains != DEFAULT_SUBDOMAINS {
            lines.push(format!(r#"subdomains = "{}""#, self.subdomains));
        }
        match self.maxzoom {
            Some(maxzoom) => lines.push(format!("maxzoom = {}", maxzoom)),
            None => lines.push("#maxzoom = 19".to_string()),
        }
        lines.join("\n") + "\n"
    }
}

/// Point feature rendered as a circle with a popup
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct CircleMarker {
    pub location: LatLng,
    pub style: StyleDescriptor,
    pub popup: String,
}

/// Line or polygon feature with a popup
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PathFeature {
    pub geometry: Geometry,
    pub style: PathStyle,
    pub popup: String,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Circle(CircleMarker),
    Path(PathFeature),
}

/// Overlay composed from one feature collection. Elements are in source order.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct OverlayLayer {
    pub name: String,
    pub elements: Vec<Element>,
}

impl OverlayLayer {
    pub fn len(&self) -> usize {
        self.elements.len()
    }
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
    pub fn markers(&self) -> impl Iterator<Item = &CircleMarker> {
        self.elements.iter().filter_map(|el| match el {
            Element::Circle(marker) => Some(marker),
            _ => None,
        })
    }
    pub fn paths(&self) -> impl Iterator<Item = &PathFeature> {
        self.elements.iter().filter_map(|el| match el {
            Element::Path(path) => Some(path),
            _ => None,
        })
    }
}

fn malformed(layer: &str, index: usize) -> impl Fn(FeatureError) -> LayerError + '_ {
    move |source| LayerError::MalformedFeature {
        layer: layer.to_string(),
        index,
        source,
    }
}

/// Circle marker overlay with per-feature style and popup.
/// Fails as a whole on the first feature which can't be styled.
pub fn build_overlay<S, P>(
    name: &str,
    collection: FeatureCollection,
    style_fn: S,
    popup_fn: P,
) -> Result<OverlayLayer, LayerError>
where
    S: Fn(&GeoFeature) -> Result<StyleDescriptor, FeatureError>,
    P: Fn(&GeoFeature) -> Result<String, FeatureError>,
{
    let elements = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let location = feature.location().map_err(malformed(name, index))?;
            let style = style_fn(feature).map_err(malformed(name, index))?;
            let popup = popup_fn(feature).map_err(malformed(name, index))?;
            Ok(Element::Circle(CircleMarker {
                location,
                style,
                popup,
            }))
        })
        .collect::<Result<Vec<_>, LayerError>>()?;
    debug!("layer {}: {} markers", name, elements.len());
    Ok(OverlayLayer {
        name: name.to_string(),
        elements,
    })
}

/// Line/polygon overlay with one style for all features
pub fn build_styled_geometry_overlay<P>(
    name: &str,
    collection: FeatureCollection,
    fixed_style: &PathStyle,
    popup_fn: P,
) -> Result<OverlayLayer, LayerError>
where
    P: Fn(&GeoFeature) -> String,
{
    let mut elements = Vec::with_capacity(collection.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let popup = popup_fn(&feature);
        let geometry = feature
            .geometry
            .ok_or(FeatureError::MissingGeometry)
            .map_err(malformed(name, index))?;
        elements.push(Element::Path(PathFeature {
            geometry,
            style: fixed_style.clone(),
            popup,
        }));
    }
    debug!("layer {}: {} paths", name, elements.len());
    Ok(OverlayLayer {
        name: name.to_string(),
        elements,
    })
}
