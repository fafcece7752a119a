//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::map_service::{MapService, MapSession};
use quakemap_core::core::legend::{build_legend, Legend};
use quakemap_core::service::map::MapChild;
use serde_json;

type JsonResult = Result<serde_json::Value, serde_json::error::Error>;

fn legend_json(legend: &Legend) -> JsonResult {
    let mut json = serde_json::to_value(legend)?;
    json["html"] = json!(legend.to_html());
    Ok(json)
}

impl MapSession {
    /// Map document for the web viewer
    pub fn get_map_json(&self) -> JsonResult {
        let view = self.map.view();
        let children = self
            .map
            .children()
            .iter()
            .map(|child| -> JsonResult {
                let mut json = serde_json::to_value(child)?;
                if let MapChild::Legend(legend) = child {
                    json["html"] = json!(legend.to_html());
                }
                Ok(json)
            })
            .collect::<Result<Vec<_>, serde_json::error::Error>>()?;
        Ok(json!({
            "center": [view.center.lat, view.center.lng],
            "zoom": view.zoom,
            "basemap": view.basemap,
            "overlays": view.overlays,
            "basemaps": self.map.basemaps(),
            "layer_control": self.map.layer_control(),
            "children": children,
            "stage": self.stage,
            "history": self.history,
            "failure": self.failure,
        }))
    }
}

impl MapService {
    /// Depth legend with entries and HTML snippet
    pub fn get_legend_json(&self) -> JsonResult {
        legend_json(&build_legend())
    }
    pub fn get_legend_html(&self) -> String {
        build_legend().to_html()
    }
    /// Registered base layers
    pub fn get_basemaps_json(&self) -> JsonResult {
        Ok(json!({
            "default": self.default_basemap.name,
            "basemaps": self.basemaps,
        }))
    }
}
