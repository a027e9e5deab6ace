use super::RegionDetectError;
use crate::boundary::{boundary_length, thin_boundary, trace_boundary, BoundaryMode};
use crate::{PixelLabelField, Region, RegionGraph};
use nalgebra::Point2;
use std::fmt::Write as _;
use std::ops::Deref;

/// Everything one detection produced; owned by the detector.
#[derive(Clone, Debug, Default)]
pub(crate) struct Detection {
    pub(crate) field: PixelLabelField,
    /// All regions of the labeling, indexed by id.
    pub(crate) regions: Vec<Region>,
    /// Ids accepted by the constraints, ascending.
    pub(crate) selected: Vec<usize>,
    pub(crate) graph: Option<RegionGraph>,
}

impl Detection {
    fn region(&self, id: usize) -> Result<&Region, RegionDetectError> {
        if self.selected.binary_search(&id).is_ok() {
            Ok(&self.regions[id])
        } else {
            Err(RegionDetectError::RegionNotFound { id })
        }
    }

    fn graph_for(&self, id: usize) -> Result<&RegionGraph, RegionDetectError> {
        self.region(id)?;
        self.graph.as_ref().ok_or(RegionDetectError::GraphUnavailable)
    }
}

/// Accepted regions of the latest detection.
///
/// Regions are listed in ascending id order. Ids come from the full labeling,
/// so filtering leaves gaps in the sequence.
#[derive(Clone, Copy, Debug)]
pub struct Regions<'a> {
    detection: &'a Detection,
}

impl<'a> Regions<'a> {
    pub(crate) fn new(detection: &'a Detection) -> Self {
        Self { detection }
    }

    /// Number of accepted regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.detection.selected.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detection.selected.is_empty()
    }

    /// Number of regions in the unfiltered labeling.
    pub fn total_regions(&self) -> usize {
        self.detection.regions.len()
    }

    /// Ids of the accepted regions, ascending.
    pub fn ids(&self) -> &'a [usize] {
        &self.detection.selected
    }

    pub fn iter(&self) -> impl Iterator<Item = RegionRef<'a>> + 'a {
        let detection = self.detection;
        detection.selected.iter().map(move |&id| RegionRef {
            detection,
            region: &detection.regions[id],
        })
    }

    /// Accepted region at position `index` of the list.
    pub fn get(&self, index: usize) -> Option<RegionRef<'a>> {
        let id = *self.detection.selected.get(index)?;
        Some(self.handle(&self.detection.regions[id]))
    }

    /// Accepted region with id `id`.
    pub fn by_id(&self, id: usize) -> Result<RegionRef<'a>, RegionDetectError> {
        Ok(self.handle(self.detection.region(id)?))
    }

    /// Accepted region covering pixel `p`, if any.
    pub fn region_at(&self, p: Point2<i32>) -> Option<RegionRef<'a>> {
        let id = self.detection.field.label_at(p)?;
        self.by_id(id).ok()
    }

    /// Per-pixel ids of the full labeling.
    pub fn label_field(&self) -> &'a PixelLabelField {
        &self.detection.field
    }

    /// Relations, `None` when graph creation was disabled.
    pub fn graph(&self) -> Option<&'a RegionGraph> {
        self.detection.graph.as_ref()
    }

    pub fn neighbours_of(&self, id: usize) -> Result<&'a [usize], RegionDetectError> {
        let graph = self.detection.graph_for(id)?;
        Ok(graph.neighbours(id).unwrap_or_default())
    }

    /// Direct (or, with `recursive`, all) sub-regions of `id`, ascending.
    pub fn sub_regions_of(
        &self,
        id: usize,
        recursive: bool,
    ) -> Result<Vec<usize>, RegionDetectError> {
        let graph = self.detection.graph_for(id)?;
        let found = if recursive {
            graph.sub_regions_recursive(id)
        } else {
            graph.sub_regions(id).map(<[usize]>::to_vec)
        };
        Ok(found.unwrap_or_default())
    }

    pub fn parent_of(&self, id: usize) -> Result<Option<usize>, RegionDetectError> {
        Ok(self.detection.graph_for(id)?.parent(id))
    }

    /// Indented dump of the sub-region hierarchy with neighbour lists.
    pub fn format_tree(&self) -> Result<String, RegionDetectError> {
        let graph = self
            .detection
            .graph
            .as_ref()
            .ok_or(RegionDetectError::GraphUnavailable)?;
        let mut out = String::new();
        let mut stack: Vec<(usize, usize)> = graph.roots().map(|id| (id, 0)).collect();
        stack.reverse();
        while let Some((id, depth)) = stack.pop() {
            let r = &self.detection.regions[id];
            let _ = writeln!(
                out,
                "{:indent$}[{}] value={} size={} neighbours={:?}",
                "",
                id,
                r.value,
                r.size,
                graph.neighbours(id).unwrap_or_default(),
                indent = 2 * depth
            );
            if let Some(children) = graph.sub_regions(id) {
                stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
        Ok(out)
    }

    fn handle(&self, region: &'a Region) -> RegionRef<'a> {
        RegionRef {
            detection: self.detection,
            region,
        }
    }
}

impl<'a> IntoIterator for Regions<'a> {
    type Item = RegionRef<'a>;
    type IntoIter = Box<dyn Iterator<Item = RegionRef<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A region together with the detection it belongs to.
///
/// Dereferences to [`Region`] for the stored features; the methods here add
/// the outline and the relations.
#[derive(Clone, Copy, Debug)]
pub struct RegionRef<'a> {
    detection: &'a Detection,
    region: &'a Region,
}

impl<'a> Deref for RegionRef<'a> {
    type Target = Region;

    fn deref(&self) -> &Region {
        self.region
    }
}

impl<'a> RegionRef<'a> {
    pub fn region(&self) -> &'a Region {
        self.region
    }

    pub fn boundary(&self, mode: BoundaryMode) -> Vec<Point2<i32>> {
        let traced = trace_boundary(&self.detection.field, self.region);
        match mode {
            BoundaryMode::Normal => traced,
            BoundaryMode::Thinned => thin_boundary(&traced),
        }
    }

    pub fn boundary_point_count(&self, mode: BoundaryMode) -> usize {
        self.boundary(mode).len()
    }

    /// Weighted length of the thinned outline.
    pub fn boundary_length(&self) -> f32 {
        boundary_length(&self.boundary(BoundaryMode::Thinned))
    }

    /// `length² / (4π·size)`; close to 1 for discs, larger for ragged shapes.
    pub fn form_factor(&self) -> f32 {
        let length = self.boundary_length();
        length * length / (4.0 * std::f32::consts::PI * self.region.size as f32)
    }

    pub fn neighbours(&self) -> Result<&'a [usize], RegionDetectError> {
        Regions::new(self.detection).neighbours_of(self.region.id)
    }

    pub fn sub_regions(&self, recursive: bool) -> Result<Vec<usize>, RegionDetectError> {
        Regions::new(self.detection).sub_regions_of(self.region.id, recursive)
    }

    pub fn parent_region(&self) -> Result<Option<RegionRef<'a>>, RegionDetectError> {
        let regions = Regions::new(self.detection);
        regions
            .parent_of(self.region.id)?
            .map(|p| regions.by_id(p))
            .transpose()
    }

    /// Ids of the parents up to a root, nearest first.
    pub fn parent_tree(&self) -> Result<Vec<usize>, RegionDetectError> {
        Ok(self.detection.graph_for(self.region.id)?.parent_tree(self.region.id))
    }
}
