use super::{Detection, RegionConstraints, RegionDetectError, RegionDetectorParams, Regions};
use crate::labeling::Labeler;
use crate::{PixelLabelField, RegionGraph};
use regionseg_core::{ImageError, Scalar, ScalarImageView};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Connected-component region detector.
///
/// The detector keeps its label field and labeling scratch buffers between
/// calls; the [`Regions`] returned by [`detect`](Self::detect) borrow the
/// detector and are invalidated by the next detection.
#[derive(Debug, Default)]
pub struct RegionDetector {
    params: RegionDetectorParams,
    labeler: Labeler,
    detection: Option<Detection>,
}

impl RegionDetector {
    pub fn new(params: RegionDetectorParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Detector with the given acceptance bounds and graph creation enabled.
    pub fn with_constraints(constraints: RegionConstraints) -> Self {
        Self::new(RegionDetectorParams {
            constraints,
            ..RegionDetectorParams::default()
        })
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &RegionDetectorParams {
        &self.params
    }

    /// Change the acceptance bounds for subsequent detections.
    pub fn set_constraints(&mut self, constraints: RegionConstraints) {
        self.params.constraints = constraints;
    }

    pub fn set_create_graph(&mut self, create_graph: bool) {
        self.params.create_graph = create_graph;
    }

    /// Label `image` and report the regions accepted by the current
    /// constraints.
    ///
    /// On error the previous detection is discarded and no partial result is
    /// kept.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn detect<T: Scalar>(
        &mut self,
        image: &ScalarImageView<'_, T>,
    ) -> Result<Regions<'_>, RegionDetectError> {
        let mut field = self
            .detection
            .take()
            .map(|d| d.field)
            .unwrap_or_default();

        if image.is_empty() {
            return Err(RegionDetectError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }
        let expected = image.width * image.height;
        if image.data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: image.data.len(),
            }
            .into());
        }

        let regions = self.labeler.label(image, &mut field);
        let detection = build_detection(&self.params, field, regions)?;
        log::debug!(
            "detected {} regions in {}x{} image, {} accepted",
            detection.regions.len(),
            image.width,
            image.height,
            detection.selected.len()
        );
        Ok(Regions::new(self.detection.insert(detection)))
    }

    /// Replace the constraints, then [`detect`](Self::detect).
    pub fn detect_with<T: Scalar>(
        &mut self,
        image: &ScalarImageView<'_, T>,
        constraints: RegionConstraints,
    ) -> Result<Regions<'_>, RegionDetectError> {
        self.set_constraints(constraints);
        self.detect(image)
    }

    /// Detect on a raw row-major buffer.
    pub fn detect_buffer<T: Scalar>(
        &mut self,
        width: usize,
        height: usize,
        data: &[T],
    ) -> Result<Regions<'_>, RegionDetectError> {
        let view = ScalarImageView::new(width, height, data)?;
        self.detect(&view)
    }

    /// Result of the most recent successful detection.
    pub fn last_detection(&self) -> Option<Regions<'_>> {
        self.detection.as_ref().map(Regions::new)
    }
}

fn build_detection(
    params: &RegionDetectorParams,
    field: PixelLabelField,
    regions: Vec<crate::Region>,
) -> Result<Detection, RegionDetectError> {
    let mask: Vec<bool> = regions
        .iter()
        .map(|r| params.constraints.accepts(r))
        .collect();
    let graph = if params.create_graph {
        Some(RegionGraph::build(&regions, &field, &mask)?)
    } else {
        None
    };
    let selected = (0..regions.len()).filter(|&id| mask[id]).collect();
    Ok(Detection {
        field,
        regions,
        selected,
        graph,
    })
}
