//! Per-pixel region ids of the latest detection.

use nalgebra::Point2;

/// Row-major map from pixel to the id of the region that contains it.
///
/// Every pixel carries the id of its region in the full, unfiltered
/// labeling, so the field is complete even when a size or value filter
/// drops regions from the result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelLabelField {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl PixelLabelField {
    /// Resize for a new image, keeping the allocation.
    pub(crate) fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.labels.clear();
        self.labels.resize(width * height, 0);
    }

    /// Label `[x0, x1)` of row `y` with `id`.
    #[inline]
    pub(crate) fn fill_run(&mut self, y: usize, x0: usize, x1: usize, id: usize) {
        let start = y * self.width;
        self.labels[start + x0..start + x1].fill(id as u32);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Region id at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the pixel lies outside the field.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> usize {
        self.labels[y * self.width + x] as usize
    }

    /// Region id at a signed pixel position, `None` outside the field.
    #[inline]
    pub fn label_at(&self, p: Point2<i32>) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        (x < self.width && y < self.height).then(|| self.get(x, y))
    }

    /// Labels of row `y`.
    pub fn row(&self, y: usize) -> &[u32] {
        let start = y * self.width;
        &self.labels[start..start + self.width]
    }

    /// Every pair of differing labels on 4-adjacent pixels, as
    /// `(left or upper, right or lower)`. Pairs repeat along shared edges.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let horizontal = (0..self.height).flat_map(move |y| {
            self.row(y)
                .windows(2)
                .filter(|w| w[0] != w[1])
                .map(|w| (w[0] as usize, w[1] as usize))
        });
        let vertical = (1..self.height).flat_map(move |y| {
            self.row(y - 1)
                .iter()
                .zip(self.row(y))
                .filter(|(a, b)| a != b)
                .map(|(&a, &b)| (a as usize, b as usize))
        });
        horizontal.chain(vertical)
    }

    /// Ids of the regions that touch the image frame, possibly repeated.
    pub fn frame_labels(&self) -> impl Iterator<Item = usize> + '_ {
        let (w, h) = (self.width, self.height);
        let rows = [0, h.saturating_sub(1)]
            .into_iter()
            .filter(move |_| h > 0)
            .flat_map(move |y| self.row(y).iter().map(|&l| l as usize));
        let cols = (0..h).flat_map(move |y| {
            [0, w.saturating_sub(1)]
                .into_iter()
                .filter(move |_| w > 0)
                .map(move |x| self.get(x, y))
        });
        rows.chain(cols)
    }
}
