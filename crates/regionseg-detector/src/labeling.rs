//! Run-length connected-component labeling.
//!
//! Each row is encoded into maximal runs of equal value. A run joins every
//! equal-valued run of the previous row it overlaps in at least one column
//! (4-connectivity). Partial regions are kept in a disjoint-set forest; when
//! a run links two of them, the set the run already belongs to absorbs the
//! other. Surviving sets become regions, numbered in row-major scan order of
//! their upper-left pixel.

use crate::{LineSegment, PixelLabelField, Region};
use nalgebra::Point2;
use regionseg_core::{PixelRect, Scalar, ScalarImageView};

const UNASSIGNED: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
struct Run {
    x: usize,
    end: usize,
    value: i32,
    part: usize,
}

/// Scratch buffers for repeated labeling; reused between images.
#[derive(Debug, Default)]
pub(crate) struct Labeler {
    runs: Vec<Run>,
    row_start: Vec<usize>,
    parent: Vec<usize>,
}

impl Labeler {
    /// Label `image` into `field` and return all regions, indexed by id.
    pub(crate) fn label<T: Scalar>(
        &mut self,
        image: &ScalarImageView<'_, T>,
        field: &mut PixelLabelField,
    ) -> Vec<Region> {
        self.encode_rows(image);
        self.link_rows(image.height);
        let regions = self.collect_regions(image.width, image.height, field);
        log::trace!(
            "labeled {} runs into {} partial regions, {} regions",
            self.runs.len(),
            self.parent.len(),
            regions.len()
        );
        regions
    }

    fn encode_rows<T: Scalar>(&mut self, image: &ScalarImageView<'_, T>) {
        self.runs.clear();
        self.row_start.clear();
        for y in 0..image.height {
            self.row_start.push(self.runs.len());
            let row = image.row(y);
            let mut x = 0;
            while x < row.len() {
                let value = row[x];
                let mut end = x + 1;
                while end < row.len() && row[end] == value {
                    end += 1;
                }
                self.runs.push(Run {
                    x,
                    end,
                    value: value.to_i32(),
                    part: UNASSIGNED,
                });
                x = end;
            }
        }
        self.row_start.push(self.runs.len());
    }

    fn new_part(&mut self) -> usize {
        self.parent.push(self.parent.len());
        self.parent.len() - 1
    }

    fn root(&mut self, mut part: usize) -> usize {
        while self.parent[part] != part {
            self.parent[part] = self.parent[self.parent[part]];
            part = self.parent[part];
        }
        part
    }

    fn link_rows(&mut self, height: usize) {
        self.parent.clear();
        if height == 0 {
            return;
        }
        for r in self.row_start[0]..self.row_start[1] {
            self.runs[r].part = self.new_part();
        }

        for y in 1..height {
            let prev_end = self.row_start[y];
            let mut li = self.row_start[y - 1];
            for ci in self.row_start[y]..self.row_start[y + 1] {
                let cur = self.runs[ci];
                loop {
                    let above = self.runs[li];
                    if above.value == cur.value {
                        let a = self.root(above.part);
                        let part = self.runs[ci].part;
                        if part == UNASSIGNED {
                            self.runs[ci].part = a;
                        } else {
                            let b = self.root(part);
                            if a != b {
                                self.parent[a] = b;
                            }
                        }
                    }
                    // Runs of both rows end at the image width, so a run
                    // reaching past `above` always has a successor above.
                    if cur.end > above.end {
                        li += 1;
                    } else {
                        break;
                    }
                }
                if self.runs[ci].part == UNASSIGNED {
                    self.runs[ci].part = self.new_part();
                }
                if cur.end == self.runs[li].end && li + 1 < prev_end {
                    li += 1;
                }
            }
        }
    }

    fn collect_regions(
        &mut self,
        width: usize,
        height: usize,
        field: &mut PixelLabelField,
    ) -> Vec<Region> {
        let mut id_of_root = vec![UNASSIGNED; self.parent.len()];
        let mut acc: Vec<RegionAccumulator> = Vec::new();
        field.reset(width, height);
        for y in 0..height {
            for r in self.row_start[y]..self.row_start[y + 1] {
                let run = self.runs[r];
                let root = self.root(run.part);
                if id_of_root[root] == UNASSIGNED {
                    id_of_root[root] = acc.len();
                    acc.push(RegionAccumulator::default());
                }
                let id = id_of_root[root];
                field.fill_run(y, run.x, run.end, id);
                acc[id].push(run.x as i32, run.end as i32, y as i32, run.value);
            }
        }

        let mut regions: Vec<Region> = acc
            .into_iter()
            .enumerate()
            .map(|(id, a)| a.finish(id))
            .collect();
        for id in field.frame_labels() {
            regions[id].is_border = true;
        }
        regions
    }
}

#[derive(Clone, Default)]
struct RegionAccumulator {
    value: i32,
    size: usize,
    sum_x: f64,
    sum_y: f64,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    segments: Vec<LineSegment>,
}

impl RegionAccumulator {
    fn push(&mut self, x: i32, end: i32, y: i32, value: i32) {
        let len = end - x;
        if self.segments.is_empty() {
            self.value = value;
            (self.min_x, self.min_y) = (x, y);
            self.max_x = end;
        } else {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(end);
        }
        self.max_y = y;
        self.size += len as usize;
        self.sum_x += len as f64 * (x as f64 + 0.5 * (len - 1) as f64);
        self.sum_y += len as f64 * y as f64;
        self.segments.push(LineSegment { x, y, end });
    }

    fn finish(self, id: usize) -> Region {
        let n = self.size.max(1) as f64;
        Region {
            id,
            value: self.value,
            size: self.size,
            cog: Point2::new((self.sum_x / n) as f32, (self.sum_y / n) as f32),
            bounding_box: PixelRect::new(
                self.min_x,
                self.min_y,
                self.max_x - self.min_x,
                self.max_y - self.min_y + 1,
            ),
            is_border: false,
            segments: self.segments,
        }
    }
}
