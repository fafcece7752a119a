//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Depth and magnitude classification

/// Hex color string
pub type Color = &'static str;

/// Depth classification interval starting above `lower` (km)
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DepthBucket {
    pub lower: f64,
    pub color: Color,
}

/// Depth classes, ordered by lower bound. Shared by marker styling and the legend.
pub const DEPTH_BUCKETS: [DepthBucket; 6] = [
    DepthBucket {
        lower: -10.0,
        color: "#98ee00",
    },
    DepthBucket {
        lower: 10.0,
        color: "#d4ee00",
    },
    DepthBucket {
        lower: 30.0,
        color: "#eecc00",
    },
    DepthBucket {
        lower: 50.0,
        color: "#ee9c00",
    },
    DepthBucket {
        lower: 70.0,
        color: "#ea822c",
    },
    DepthBucket {
        lower: 90.0,
        color: "#ea2c2c",
    },
];

/// Marker radius per magnitude unit
pub const RADIUS_SCALE: f64 = 4.75;

/// Index into `DEPTH_BUCKETS` for `depth`
pub fn depth_bucket(depth: f64) -> usize {
    // The lowest bound is a label only, everything below 10 km is shallow
    DEPTH_BUCKETS
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find(|(_, bucket)| depth > bucket.lower)
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

pub fn color_for_depth(depth: f64) -> Color {
    DEPTH_BUCKETS[depth_bucket(depth)].color
}

/// Magnitude 0 is floored to radius 1, negative magnitudes are passed through.
pub fn radius_for_magnitude(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        1.0
    } else {
        magnitude * RADIUS_SCALE
    }
}

#[test]
fn test_depth_colors() {
    assert_eq!(color_for_depth(90.0001), "#ea2c2c");
    assert_eq!(color_for_depth(90.0), "#ea822c");
    assert_eq!(color_for_depth(70.5), "#ea822c");
    assert_eq!(color_for_depth(50.0), "#eecc00");
    assert_eq!(color_for_depth(45.0), "#eecc00");
    assert_eq!(color_for_depth(55.0), "#ee9c00");
    assert_eq!(color_for_depth(30.1), "#eecc00");
    assert_eq!(color_for_depth(10.0), "#98ee00");
    assert_eq!(color_for_depth(10.01), "#d4ee00");
    assert_eq!(color_for_depth(0.0), "#98ee00");
    assert_eq!(color_for_depth(-50.0), "#98ee00");
    assert_eq!(color_for_depth(700.0), "#ea2c2c");
    assert_eq!(color_for_depth(std::f64::NAN), "#98ee00");
}

#[test]
fn test_depth_monotonic() {
    let mut last = 0;
    let mut depth = -100.0;
    while depth < 200.0 {
        let bucket = depth_bucket(depth);
        assert!(bucket >= last, "bucket decreased at depth {}", depth);
        assert!(DEPTH_BUCKETS
            .iter()
            .any(|b| b.color == color_for_depth(depth)));
        if bucket > 0 {
            assert!(depth > DEPTH_BUCKETS[bucket].lower);
        }
        if bucket < DEPTH_BUCKETS.len() - 1 {
            assert!(depth <= DEPTH_BUCKETS[bucket + 1].lower);
        }
        last = bucket;
        depth += 0.25;
    }
}

#[test]
fn test_radius() {
    assert_eq!(radius_for_magnitude(0.0), 1.0);
    assert_eq!(radius_for_magnitude(2.0), 9.5);
    assert_eq!(radius_for_magnitude(5.0), 23.75);
    assert_eq!(radius_for_magnitude(6.0), 28.5);
    assert!(radius_for_magnitude(0.1) < radius_for_magnitude(0.2));
    // unguarded below zero
    assert_eq!(radius_for_magnitude(-1.0), -4.75);
}
