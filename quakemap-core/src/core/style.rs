//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::classify::{color_for_depth, radius_for_magnitude};
use crate::core::config::PathStyleCfg;
use crate::core::error::FeatureError;
use crate::core::feature::GeoFeature;
use crate::core::Config;

pub const MARKER_STROKE_COLOR: &str = "#000000";
pub const MARKER_FILL_OPACITY: f64 = 0.65;
pub const MARKER_STROKE_OPACITY: f64 = 0.5;
pub const MARKER_STROKE_WEIGHT: f64 = 0.425;

/// Circle marker style. Serialized as Leaflet path options.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct StyleDescriptor {
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "color")]
    pub stroke_color: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
    #[serde(rename = "opacity")]
    pub stroke_opacity: f64,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    pub radius: f64,
}

/// Fixed style for line and polygon overlays
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PathStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
}

impl Default for PathStyle {
    fn default() -> PathStyle {
        PathStyle {
            color: "#ff7800".to_string(),
            weight: 2.0,
            opacity: 0.7,
        }
    }
}

impl<'a> Config<'a, PathStyleCfg> for PathStyle {
    fn from_config(cfg: &PathStyleCfg) -> Result<Self, String> {
        let default = PathStyle::default();
        let opacity = cfg.opacity.unwrap_or(default.opacity);
        if opacity < 0.0 || opacity > 1.0 {
            return Err(format!("opacity {} out of range 0..1", opacity));
        }
        Ok(PathStyle {
            color: cfg.color.clone().unwrap_or(default.color),
            weight: cfg.weight.unwrap_or(default.weight),
            opacity,
        })
    }
    fn gen_config() -> String {
        let toml = r##"
[style.tectonic]
color = "#ff7800"
weight = 2.0
opacity = 0.7
"##;
        toml.to_string()
    }
    fn gen_runtime_config(&self) -> String {
        format!(
            "\n[style.tectonic]\ncolor = \"{}\"\nweight = {:?}\nopacity = {:?}\n",
            self.color, self.weight, self.opacity
        )
    }
}

/// Marker style of a seismic event: fill by depth, radius by magnitude
pub fn resolve_style(feature: &GeoFeature) -> Result<StyleDescriptor, FeatureError> {
    let depth = feature.depth()?;
    let magnitude = feature.magnitude()?;
    Ok(StyleDescriptor {
        fill_color: color_for_depth(depth).to_string(),
        stroke_color: MARKER_STROKE_COLOR.to_string(),
        fill_opacity: MARKER_FILL_OPACITY,
        stroke_opacity: MARKER_STROKE_OPACITY,
        stroke_weight: MARKER_STROKE_WEIGHT,
        radius: radius_for_magnitude(magnitude),
    })
}

pub fn popup_content(feature: &GeoFeature) -> Result<String, FeatureError> {
    let magnitude = feature.magnitude()?;
    let depth = feature.depth()?;
    let place = feature.place()?;
    Ok(format!(
        "Magnitude: <strong>{}</strong><br>Depth: <strong>{}</strong><br>Location: {}",
        magnitude, depth, place
    ))
}

pub const UNKNOWN_PLATE: &str = "Unknown";

pub fn plate_popup_content(feature: &GeoFeature) -> String {
    format!(
        "<strong>Plate:</strong> {}",
        feature.plate_name().unwrap_or(UNKNOWN_PLATE)
    )
}
