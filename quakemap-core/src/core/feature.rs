//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{DecodeError, FeatureError};
use crate::core::geom::{Geometry, LatLng};
use serde_json::{Map, Value};

/// Named feature properties used for styling. Other attributes are kept in `other`.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
pub struct FeatureProperties {
    /// Event magnitude
    pub mag: Option<f64>,
    /// Human-readable location
    pub place: Option<String>,
    /// Plate boundary name (PB2002 datasets)
    #[serde(rename = "PlateName")]
    pub plate_name: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct GeoFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<Geometry>,
    pub properties: Option<FeatureProperties>,
}

/// Collection level metadata of USGS feeds
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
pub struct CollectionMetadata {
    pub title: Option<String>,
    pub url: Option<String>,
    pub generated: Option<u64>,
    pub count: Option<u64>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CollectionMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    pub features: Vec<GeoFeature>,
}

/// Collection with undecoded features
#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    collection_type: String,
    #[serde(default)]
    metadata: Option<CollectionMetadata>,
    #[serde(default)]
    bbox: Option<Vec<f64>>,
    features: Vec<Value>,
}

impl GeoFeature {
    pub fn new(geometry: Geometry, properties: FeatureProperties) -> GeoFeature {
        GeoFeature {
            id: None,
            geometry: Some(geometry),
            properties: Some(properties),
        }
    }
    pub fn geometry(&self) -> Result<&Geometry, FeatureError> {
        self.geometry.as_ref().ok_or(FeatureError::MissingGeometry)
    }
    fn point(&self) -> Result<&[f64], FeatureError> {
        match self.geometry()? {
            &Geometry::Point { ref coordinates } => Ok(coordinates.as_slice()),
            geom => Err(FeatureError::NotAPoint(geom.type_name())),
        }
    }
    /// Marker location of a point feature
    pub fn location(&self) -> Result<LatLng, FeatureError> {
        let pos = self.point()?;
        LatLng::from_position(pos).ok_or(FeatureError::MissingCoordinate("lat"))
    }
    /// Depth in km (positive downward), third point coordinate
    pub fn depth(&self) -> Result<f64, FeatureError> {
        self.point()?
            .get(2)
            .cloned()
            .ok_or(FeatureError::MissingCoordinate("depth"))
    }
    pub fn magnitude(&self) -> Result<f64, FeatureError> {
        self.properties
            .as_ref()
            .and_then(|p| p.mag)
            .ok_or(FeatureError::MissingProperty("mag"))
    }
    pub fn place(&self) -> Result<&str, FeatureError> {
        self.properties
            .as_ref()
            .and_then(|p| p.place.as_ref())
            .map(|s| s.as_str())
            .ok_or(FeatureError::MissingProperty("place"))
    }
    /// Plate name, `None` when absent, null or empty
    pub fn plate_name(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.plate_name.as_ref())
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoFeature>) -> FeatureCollection {
        FeatureCollection {
            collection_type: "FeatureCollection".to_string(),
            metadata: None,
            bbox: None,
            features,
        }
    }
    /// Decode a GeoJSON FeatureCollection. Features are decoded one by one,
    /// so a feature with unexpected types is reported with its index.
    pub fn from_geojson(json: &str) -> Result<FeatureCollection, DecodeError> {
        let raw: RawCollection =
            serde_json::from_str(json).map_err(|e| DecodeError::Collection(e.to_string()))?;
        if raw.collection_type != "FeatureCollection" {
            return Err(DecodeError::Collection(format!(
                "expected FeatureCollection, found `{}`",
                raw.collection_type
            )));
        }
        let features = raw
            .features
            .into_iter()
            .enumerate()
            .map(|(index, feature)| {
                serde_json::from_value::<GeoFeature>(feature).map_err(|e| DecodeError::Feature {
                    index,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FeatureCollection {
            collection_type: raw.collection_type,
            metadata: raw.metadata,
            bbox: raw.bbox,
            features,
        })
    }
    pub fn len(&self) -> usize {
        self.features.len()
    }
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
    /// Title from collection metadata
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_ref())
            .map(|t| t.as_str())
    }
}
