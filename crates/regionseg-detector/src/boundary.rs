//! Region outlines traced on the label field.

use crate::{PixelLabelField, Region};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Which outline variant to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Every contour step of the 4-connected trace.
    #[default]
    Normal,
    /// The trace with points dropped wherever the outline stays
    /// 8-connected without them.
    Thinned,
}

// Search directions up, right, down, left, repeated so a scan can run past
// "left" without wrapping.
const DX: [i32; 8] = [0, 1, 0, -1, 0, 1, 0, -1];
const DY: [i32; 8] = [-1, 0, 1, 0, -1, 0, 1, 0];
// First direction to test after a step taken in direction `d`.
const RESTART: [usize; 8] = [3, 0, 1, 2, 3, 0, 1, 2];

/// Step from `p` to the first 4-neighbour inside region `id`, scanning from
/// direction `*dir`. On return `*dir` is one past the direction taken.
fn step(field: &PixelLabelField, id: usize, p: Point2<i32>, dir: &mut usize) -> Point2<i32> {
    loop {
        let q = Point2::new(p.x + DX[*dir], p.y + DY[*dir]);
        *dir += 1;
        if field.label_at(q) == Some(id) {
            return q;
        }
    }
}

/// Trace the outer contour of `region`.
///
/// The trace starts at the upper-left pixel and follows the region's edge
/// by always turning left first. Pixels on one-pixel-wide parts appear once
/// per pass. A single-pixel region yields that pixel.
pub fn trace_boundary(field: &PixelLabelField, region: &Region) -> Vec<Point2<i32>> {
    let start = region.upper_left();
    if region.size <= 1 {
        return vec![start];
    }

    let id = region.id;
    let mut boundary = vec![start];
    let mut dir = 0;
    let mut p = step(field, id, start, &mut dir);
    dir = RESTART[dir - 1];
    let (second, second_dir) = (p, dir);

    loop {
        boundary.push(p);
        p = step(field, id, p, &mut dir);
        dir = RESTART[dir - 1];
        if p == second && dir == second_dir {
            break;
        }
    }
    // The start pixel was reached again just before re-entering `second`.
    boundary.pop();
    boundary
}

#[inline]
fn touches(a: &Point2<i32>, b: &Point2<i32>) -> bool {
    (a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1
}

/// Drop every trace point whose successor is still 8-adjacent to the last
/// kept point.
pub fn thin_boundary(boundary: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let n = boundary.len();
    if n < 3 {
        return boundary.to_vec();
    }

    let mut last = boundary[0];
    let mut thinned = vec![last];
    let mut i = 2;
    while i < n {
        if !touches(&boundary[i], &last) {
            i -= 1;
        }
        last = boundary[i];
        thinned.push(last);
        i += 2;
    }
    if !touches(&thinned[0], &last) {
        thinned.push(boundary[n - 1]);
    }
    thinned
}

/// Outline length of a closed point chain.
///
/// Each point contributes by how many of its two adjacent steps are
/// diagonal: none `1`, one `sqrt(1.25)`, both `sqrt(2)`.
pub fn boundary_length(chain: &[Point2<i32>]) -> f32 {
    const WEIGHTS: [f32; 3] = [1.0, 1.118_034, std::f32::consts::SQRT_2];

    let n = chain.len();
    if n < 2 {
        return n as f32;
    }
    let diagonal = |a: &Point2<i32>, b: &Point2<i32>| usize::from(a.x != b.x && a.y != b.y);
    (0..n)
        .map(|i| {
            let pre = &chain[(i + n - 1) % n];
            let cur = &chain[i];
            let post = &chain[(i + 1) % n];
            WEIGHTS[diagonal(pre, cur) + diagonal(cur, post)]
        })
        .sum()
}
