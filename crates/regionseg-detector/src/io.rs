//! JSON configuration and report helpers for region detection.

use crate::{BoundaryMode, RegionDetectorParams, Regions};
use nalgebra::Point2;
use regionseg_core::PixelRect;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum RegionIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RegionDetectorParams {
    /// Load parameters from a JSON file; missing fields keep their defaults.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RegionIoError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RegionIoError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Write these parameters to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RegionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Serializable summary of one accepted region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    pub id: usize,
    pub value: i32,
    pub size: usize,
    pub cog: Point2<f32>,
    pub bounding_box: PixelRect,
    pub is_border: bool,
    pub boundary_points: usize,
    pub thinned_boundary_points: usize,
    /// Absent when the detection was made without relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_regions: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
}

/// JSON dump of a detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub width: usize,
    pub height: usize,
    /// Regions in the unfiltered labeling.
    pub total_regions: usize,
    pub regions: Vec<RegionSummary>,
}

impl RegionReport {
    pub fn from_regions(regions: &Regions<'_>) -> Self {
        let field = regions.label_field();
        let summaries = regions
            .iter()
            .map(|r| RegionSummary {
                id: r.id,
                value: r.value,
                size: r.size,
                cog: r.cog,
                bounding_box: r.bounding_box,
                is_border: r.is_border,
                boundary_points: r.boundary_point_count(BoundaryMode::Normal),
                thinned_boundary_points: r.boundary_point_count(BoundaryMode::Thinned),
                neighbours: r.neighbours().ok().map(<[usize]>::to_vec),
                sub_regions: r.sub_regions(false).ok(),
                parent: r.parent_region().ok().flatten().map(|p| p.id),
            })
            .collect();
        Self {
            width: field.width(),
            height: field.height(),
            total_regions: regions.total_regions(),
            regions: summaries,
        }
    }

    /// Load a report from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, RegionIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), RegionIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
