//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use thiserror::Error;

/// Structural problem of a single feature
#[derive(Error, Clone, PartialEq, Debug)]
pub enum FeatureError {
    #[error("missing geometry")]
    MissingGeometry,
    #[error("expected Point geometry, found {0}")]
    NotAPoint(&'static str),
    #[error("missing coordinate `{0}`")]
    MissingCoordinate(&'static str),
    #[error("missing property `{0}`")]
    MissingProperty(&'static str),
    #[error("{0}")]
    Invalid(String),
}

/// GeoJSON decoding failure
#[derive(Error, Clone, PartialEq, Debug)]
pub enum DecodeError {
    #[error("{0}")]
    Collection(String),
    /// A single feature with unexpected structure or property types
    #[error("feature #{index}: {message}")]
    Feature { index: usize, message: String },
}

#[derive(Error, Clone, PartialEq, Debug)]
pub enum LayerError {
    /// A single malformed feature fails the whole overlay
    #[error("layer `{layer}`: malformed feature #{index}: {source}")]
    MalformedFeature {
        layer: String,
        index: usize,
        source: FeatureError,
    },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} returned HTTP status {status}")]
    Status { url: String, status: u16 },
    #[error("reading {path} failed: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid GeoJSON from {origin}: {message}")]
    Decode { origin: String, message: String },
    #[error("invalid feature #{index} from {origin}: {message}")]
    InvalidFeature {
        origin: String,
        index: usize,
        message: String,
    },
}

/// Failure of one acquisition stage
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Layer(#[from] LayerError),
}
