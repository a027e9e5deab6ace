use nalgebra::Point2;
use regionseg_core::PixelRect;
use serde::{Deserialize, Serialize};

/// Horizontal run of region pixels in row `y`, covering `x..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub x: i32,
    pub y: i32,
    /// Exclusive end column.
    pub end: i32,
}

impl LineSegment {
    #[inline]
    pub fn len(&self) -> i32 {
        self.end - self.x
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.x
    }

    /// Pixels of the run, left to right.
    pub fn pixels(&self) -> impl Iterator<Item = Point2<i32>> {
        let y = self.y;
        (self.x..self.end).map(move |x| Point2::new(x, y))
    }
}

/// Principal axes of a region's pixel distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionPca {
    /// Twice the standard deviation along the major axis.
    pub major_axis: f32,
    /// Twice the standard deviation along the minor axis.
    pub minor_axis: f32,
    /// Orientation of the major axis in radians.
    pub angle: f32,
    pub center: Point2<f32>,
}

/// One maximal 4-connected set of equal-valued pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Position in the full labeling; ids count up in scan order of the
    /// region's first run.
    pub id: usize,
    /// Common pixel value.
    pub value: i32,
    /// Pixel count.
    pub size: usize,
    /// Mean pixel position.
    pub cog: Point2<f32>,
    pub bounding_box: PixelRect,
    /// `true` if a pixel lies on the image frame.
    pub is_border: bool,
    /// Runs in scan order; the first run starts at the upper-left pixel.
    pub segments: Vec<LineSegment>,
}

impl Region {
    /// Topmost, then leftmost pixel.
    pub fn upper_left(&self) -> Point2<i32> {
        self.segments
            .first()
            .map(|s| Point2::new(s.x, s.y))
            .unwrap_or_else(|| Point2::new(self.bounding_box.x, self.bounding_box.y))
    }

    pub fn is_border_region(&self) -> bool {
        self.is_border
    }

    /// All member pixels in scan order.
    pub fn pixels(&self) -> impl Iterator<Item = Point2<i32>> + '_ {
        self.segments.iter().flat_map(LineSegment::pixels)
    }

    pub fn contains(&self, p: Point2<i32>) -> bool {
        self.bounding_box.contains(p.x, p.y)
            && self
                .segments
                .iter()
                .any(|s| s.y == p.y && p.x >= s.x && p.x < s.end)
    }

    /// Principal component analysis of the member pixels.
    pub fn pca(&self) -> RegionPca {
        let n = self.size.max(1) as f64;

        let (mut sx, mut sy) = (0.0, 0.0);
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for s in &self.segments {
            let len = s.len() as f64;
            let y = s.y as f64;
            let last = (s.end - 1) as i64;
            let first = s.x as i64;
            let sum_x = (sum_to(last) - sum_to(first - 1)) as f64;
            sx += sum_x;
            sy += len * y;
            sxx += (sum_squares_to(last) - sum_squares_to(first - 1)) as f64;
            syy += len * y * y;
            sxy += y * sum_x;
        }
        let (cx, cy) = (sx / n, sy / n);
        let var_x = sxx / n - cx * cx;
        let var_y = syy / n - cy * cy;
        let cov = sxy / n - cx * cy;

        let mean = 0.5 * (var_x + var_y);
        let spread = (0.25 * (var_x - var_y).powi(2) + cov * cov).sqrt();
        let major = mean + spread;
        let minor = (mean - spread).max(0.0);

        RegionPca {
            major_axis: (2.0 * major.sqrt()) as f32,
            minor_axis: (2.0 * minor.sqrt()) as f32,
            angle: (0.5 * (2.0 * cov).atan2(var_x - var_y)) as f32,
            center: self.cog,
        }
    }
}

/// `0 + 1 + ... + k`, zero for negative `k`.
fn sum_to(k: i64) -> i64 {
    if k <= 0 {
        0
    } else {
        k * (k + 1) / 2
    }
}

/// `0² + 1² + ... + k²`, zero for negative `k`.
fn sum_squares_to(k: i64) -> i64 {
    if k <= 0 {
        0
    } else {
        k * (k + 1) * (2 * k + 1) / 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn region_from_rows(rows: &[(i32, i32, i32)]) -> Region {
        let segments: Vec<LineSegment> = rows
            .iter()
            .map(|&(x, y, end)| LineSegment { x, y, end })
            .collect();
        let size: i32 = segments.iter().map(LineSegment::len).sum();
        let sx: f64 = segments
            .iter()
            .map(|s| s.len() as f64 * (s.x as f64 + 0.5 * (s.len() - 1) as f64))
            .sum();
        let sy: f64 = segments.iter().map(|s| (s.len() * s.y) as f64).sum();
        let x0 = segments.iter().map(|s| s.x).min().unwrap_or(0);
        let x1 = segments.iter().map(|s| s.end).max().unwrap_or(0);
        let y0 = segments.iter().map(|s| s.y).min().unwrap_or(0);
        let y1 = segments.iter().map(|s| s.y).max().unwrap_or(0);
        Region {
            id: 0,
            value: 1,
            size: size as usize,
            cog: Point2::new((sx / size as f64) as f32, (sy / size as f64) as f32),
            bounding_box: PixelRect::new(x0, y0, x1 - x0, y1 - y0 + 1),
            is_border: false,
            segments,
        }
    }

    #[test]
    fn contains_checks_runs_not_just_the_box() {
        // L shape: (2..5, 3) and (2..3, 4)
        let r = region_from_rows(&[(2, 3, 5), (2, 4, 3)]);
        assert!(r.contains(Point2::new(4, 3)));
        assert!(r.contains(Point2::new(2, 4)));
        assert!(!r.contains(Point2::new(4, 4)));
        assert_eq!(r.pixels().count(), r.size);
        assert_eq!(r.upper_left(), Point2::new(2, 3));
    }

    #[test]
    fn pca_of_horizontal_bar() {
        let r = region_from_rows(&[(0, 0, 9)]);
        let pca = r.pca();
        // Variance of 0..=8 is 20/3.
        assert_relative_eq!(pca.major_axis, 2.0 * (20.0f32 / 3.0).sqrt(), epsilon = 1e-4);
        assert_relative_eq!(pca.minor_axis, 0.0, epsilon = 1e-4);
        assert_relative_eq!(pca.angle, 0.0, epsilon = 1e-6);
        assert_relative_eq!(pca.center.x, 4.0);
    }

    #[test]
    fn pca_of_vertical_bar_points_down() {
        let r = region_from_rows(&[(3, 0, 4), (3, 1, 4), (3, 2, 4), (3, 3, 4)]);
        let pca = r.pca();
        assert_relative_eq!(pca.angle, std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
        assert!(pca.major_axis > pca.minor_axis);
    }
}
