//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GeoJSON geometry types

/// Coordinate position: `[lon, lat]` or `[lon, lat, elevation]`
pub type Position = Vec<f64>;

/// Generic Geometry Data Type
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            &Geometry::Point { .. } => "Point",
            &Geometry::MultiPoint { .. } => "MultiPoint",
            &Geometry::LineString { .. } => "LineString",
            &Geometry::MultiLineString { .. } => "MultiLineString",
            &Geometry::Polygon { .. } => "Polygon",
            &Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }
    pub fn is_empty(&self) -> bool {
        match self {
            &Geometry::Point { ref coordinates } => coordinates.len() < 2,
            &Geometry::MultiPoint { ref coordinates } => coordinates.is_empty(),
            &Geometry::LineString { ref coordinates } => coordinates.is_empty(),
            &Geometry::MultiLineString { ref coordinates } => coordinates.is_empty(),
            &Geometry::Polygon { ref coordinates } => coordinates.is_empty(),
            &Geometry::MultiPolygon { ref coordinates } => coordinates.is_empty(),
        }
    }
}

/// Geographic location in map (lat/lon) order
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }
    /// Location of a GeoJSON position (lon/lat order)
    pub fn from_position(pos: &[f64]) -> Option<LatLng> {
        match pos {
            [lng, lat, ..] => Some(LatLng::new(*lat, *lng)),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from(latlng: (f64, f64)) -> LatLng {
        LatLng::new(latlng.0, latlng.1)
    }
}

#[test]
fn test_geometry_json() {
    let geom: Geometry =
        serde_json::from_str(r#"{"type":"Point","coordinates":[-117.5,35.7,8.2]}"#).unwrap();
    assert_eq!(geom.type_name(), "Point");
    assert!(!geom.is_empty());
    let pos = match geom {
        Geometry::Point { ref coordinates } => coordinates.clone(),
        _ => panic!(),
    };
    assert_eq!(
        LatLng::from_position(&pos),
        Some(LatLng::new(35.7, -117.5))
    );

    let geom: Geometry = serde_json::from_str(
        r#"{"type":"LineString","coordinates":[[-0.4,-3.9],[0.1,-4.5]]}"#,
    )
    .unwrap();
    assert_eq!(geom.type_name(), "LineString");

    let geom: Result<Geometry, _> =
        serde_json::from_str(r#"{"type":"Curve","coordinates":[]}"#);
    assert!(geom.is_err());
}

#[test]
fn test_short_position() {
    assert_eq!(LatLng::from_position(&[12.0]), None);
    assert!(Geometry::Point {
        coordinates: vec![1.0]
    }
    .is_empty());
}
