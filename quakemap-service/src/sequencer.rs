//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Ordered acquisition of the seismic and tectonic overlays

use crate::datasources::FeatureSource;
use quakemap_core::core::error::{AcquisitionError, FeatureError, FetchError, LayerError};
use quakemap_core::core::feature::FeatureCollection;
use quakemap_core::core::layer::{build_overlay, build_styled_geometry_overlay, OverlayLayer};
use quakemap_core::core::legend::build_legend;
use quakemap_core::core::style::{plate_popup_content, popup_content, resolve_style, PathStyle};
use quakemap_core::service::map::MapController;
use std::fmt;

pub const SEISMIC_LAYER: &str = "Earthquakes";
pub const TECTONIC_LAYER: &str = "Tectonic Plates";

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Seismic,
    Tectonic,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    SeismicPending,
    SeismicReady,
    TectonicPending,
    TectonicReady,
    Failed(Dataset),
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        match self {
            Stage::TectonicReady | Stage::Failed(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::SeismicPending => write!(f, "seismic pending"),
            Stage::SeismicReady => write!(f, "seismic ready"),
            Stage::TectonicPending => write!(f, "tectonic pending"),
            Stage::TectonicReady => write!(f, "tectonic ready"),
            Stage::Failed(Dataset::Seismic) => write!(f, "failed (seismic)"),
            Stage::Failed(Dataset::Tectonic) => write!(f, "failed (tectonic)"),
        }
    }
}

async fn acquire<F, B>(
    source: &F,
    layer: &str,
    build: B,
) -> Result<OverlayLayer, AcquisitionError>
where
    F: FeatureSource + ?Sized,
    B: FnOnce(FeatureCollection) -> Result<OverlayLayer, LayerError>,
{
    let collection = match source.fetch().await {
        Ok(collection) => collection,
        // Undecodable features fail the layer like any other malformed feature
        Err(FetchError::InvalidFeature { index, message, .. }) => {
            return Err(LayerError::MalformedFeature {
                layer: layer.to_string(),
                index,
                source: FeatureError::Invalid(message),
            }
            .into())
        }
        Err(err) => return Err(err.into()),
    };
    info!(
        "Received {} features from {}",
        collection.len(),
        source.origin()
    );
    if let Some(title) = collection.title() {
        debug!("Collection title: {}", title);
    }
    Ok(build(collection)?)
}

/// Drives one map session through the acquisition stages.
///
/// The tectonic fetch is only issued after the seismic overlay and the legend
/// are attached. A failure of either stage is terminal.
pub struct AcquisitionSequencer<'a, S: ?Sized, T: ?Sized> {
    seismic: &'a S,
    tectonic: &'a T,
    plate_style: PathStyle,
    stage: Stage,
    history: Vec<Stage>,
    failure: Option<AcquisitionError>,
}

impl<'a, S, T> AcquisitionSequencer<'a, S, T>
where
    S: FeatureSource + ?Sized,
    T: FeatureSource + ?Sized,
{
    pub fn new(seismic: &'a S, tectonic: &'a T, plate_style: PathStyle) -> Self {
        AcquisitionSequencer {
            seismic,
            tectonic,
            plate_style,
            stage: Stage::Idle,
            history: vec![Stage::Idle],
            failure: None,
        }
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    /// All stages passed, starting with `Idle`
    pub fn history(&self) -> &[Stage] {
        &self.history
    }
    pub fn failure(&self) -> Option<&AcquisitionError> {
        self.failure.as_ref()
    }
    fn transition(&mut self, stage: Stage) {
        info!("Acquisition: {} -> {}", self.stage, stage);
        self.stage = stage;
        self.history.push(stage);
    }
    fn fail(&mut self, dataset: Dataset, err: AcquisitionError) {
        error!("{:?} acquisition failed: {}", dataset, err);
        self.failure = Some(err);
        self.transition(Stage::Failed(dataset));
    }
    /// Run all stages, attaching overlays and legend to `map`. Returns the terminal stage.
    pub async fn run(&mut self, map: &mut MapController) -> Stage {
        if self.stage != Stage::Idle {
            warn!("Acquisition already run ({})", self.stage);
            return self.stage;
        }

        self.transition(Stage::SeismicPending);
        let seismic = acquire(self.seismic, SEISMIC_LAYER, |collection| {
            build_overlay(SEISMIC_LAYER, collection, resolve_style, popup_content)
        })
        .await;
        match seismic {
            Ok(layer) => {
                map.attach(layer);
                map.attach(build_legend());
                self.transition(Stage::SeismicReady);
            }
            Err(err) => {
                self.fail(Dataset::Seismic, err);
                return self.stage;
            }
        }

        self.transition(Stage::TectonicPending);
        let plate_style = &self.plate_style;
        let tectonic = acquire(self.tectonic, TECTONIC_LAYER, |collection| {
            build_styled_geometry_overlay(
                TECTONIC_LAYER,
                collection,
                plate_style,
                plate_popup_content,
            )
        })
        .await;
        match tectonic {
            Ok(layer) => {
                map.attach(layer);
                self.transition(Stage::TectonicReady);
            }
            Err(err) => self.fail(Dataset::Tectonic, err),
        }
        self.stage
    }
}
