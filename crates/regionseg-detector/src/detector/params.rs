use crate::Region;
use serde::{Deserialize, Serialize};

/// Inclusive size and value bounds a region must satisfy to be reported.
///
/// An inverted range (`min > max`) selects nothing on that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConstraints {
    /// Minimum pixel count.
    pub min_size: usize,
    /// Maximum pixel count.
    pub max_size: usize,
    /// Minimum pixel value.
    pub min_value: i32,
    /// Maximum pixel value.
    pub max_value: i32,
}

impl Default for RegionConstraints {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl RegionConstraints {
    pub fn new(min_size: usize, max_size: usize, min_value: i32, max_value: i32) -> Self {
        Self {
            min_size,
            max_size,
            min_value,
            max_value,
        }
    }

    /// Accept every region.
    pub fn unrestricted() -> Self {
        Self::new(0, usize::MAX, i32::MIN, i32::MAX)
    }

    #[inline]
    pub fn accepts(&self, region: &Region) -> bool {
        (self.min_size..=self.max_size).contains(&region.size)
            && (self.min_value..=self.max_value).contains(&region.value)
    }
}

/// Configuration for [`RegionDetector`](crate::RegionDetector).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionDetectorParams {
    pub constraints: RegionConstraints,
    /// Compute neighbour and sub-region relations. Without them, relation
    /// queries fail with `GraphUnavailable`.
    pub create_graph: bool,
}

impl Default for RegionDetectorParams {
    fn default() -> Self {
        Self {
            constraints: RegionConstraints::default(),
            create_graph: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;
    use regionseg_core::PixelRect;

    fn region(size: usize, value: i32) -> Region {
        Region {
            id: 0,
            value,
            size,
            cog: Point2::origin(),
            bounding_box: PixelRect::default(),
            is_border: false,
            segments: Vec::new(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let c = RegionConstraints::new(1, 10, 128, 255);
        assert!(c.accepts(&region(1, 128)));
        assert!(c.accepts(&region(10, 255)));
        assert!(!c.accepts(&region(0, 200)));
        assert!(!c.accepts(&region(11, 200)));
        assert!(!c.accepts(&region(5, 127)));
    }

    #[test]
    fn inverted_range_accepts_nothing() {
        let c = RegionConstraints::new(10, 1, 0, 255);
        assert!(!c.accepts(&region(5, 0)));
        let c = RegionConstraints::new(0, 100, 10, 0);
        assert!(!c.accepts(&region(5, 5)));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let params: RegionDetectorParams =
            serde_json::from_str(r#"{ "constraints": { "max_size": 98 } }"#).expect("parse");
        assert!(params.create_graph);
        assert_eq!(params.constraints.max_size, 98);
        assert_eq!(params.constraints.min_value, i32::MIN);
    }
}
