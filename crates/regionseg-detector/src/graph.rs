//! Neighbour and sub-region relations between regions.
//!
//! Relations are derived from the complete labeling and then restricted to
//! the regions that passed the detector's filters:
//!
//! - neighbour lists only name selected regions,
//! - a filtered region is transparent in the hierarchy, its selected
//!   descendants move up to the nearest selected ancestor.
//!
//! A region `r` with more than one neighbour claims neighbour `m` as a direct
//! sub-region when `m` does not touch the image frame and either `m` has `r`
//! as its only neighbour, or everything reachable from `m` without passing
//! through `r` stays off the frame and inside `r`'s bounding box.

use crate::{PixelLabelField, Region, RegionDetectError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Relations over the selected regions of one detection, indexed by region id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionGraph {
    selected: Vec<bool>,
    neighbours: Vec<Vec<usize>>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
}

impl RegionGraph {
    /// Build the relations for `regions` (all regions of the labeling,
    /// indexed by id); `selected[id]` marks the regions to report.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(regions = regions.len()))
    )]
    pub(crate) fn build(
        regions: &[Region],
        field: &PixelLabelField,
        selected: &[bool],
    ) -> Result<Self, RegionDetectError> {
        let all_neighbours = adjacency(regions.len(), field);
        let all_children = claim_sub_regions(regions, &all_neighbours);
        ensure_acyclic(&all_children)?;

        let n = regions.len();
        let neighbours: Vec<Vec<usize>> = (0..n)
            .map(|id| {
                if selected[id] {
                    all_neighbours[id]
                        .iter()
                        .copied()
                        .filter(|&m| selected[m])
                        .collect()
                } else {
                    Vec::new()
                }
            })
            .collect();

        let mut children = vec![Vec::new(); n];
        let mut seen = vec![usize::MAX; n];
        let mut stack: Vec<usize> = Vec::new();
        for id in (0..n).filter(|&id| selected[id]) {
            stack.extend(all_children[id].iter().rev().copied());
            while let Some(c) = stack.pop() {
                if seen[c] == id {
                    continue;
                }
                seen[c] = id;
                if selected[c] {
                    children[id].push(c);
                } else {
                    stack.extend(all_children[c].iter().rev().copied());
                }
            }
            children[id].sort_unstable();
        }

        let mut parents = vec![None; n];
        for (id, list) in children.iter().enumerate() {
            for &c in list {
                parents[c].get_or_insert(id);
            }
        }

        log::debug!(
            "region graph: {} of {} regions selected, {} sub-region links",
            selected.iter().filter(|&&s| s).count(),
            n,
            children.iter().map(Vec::len).sum::<usize>()
        );
        Ok(Self {
            selected: selected.to_vec(),
            neighbours,
            children,
            parents,
        })
    }

    /// `true` if `id` is a selected region of this detection.
    #[inline]
    pub fn contains(&self, id: usize) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Selected regions sharing a 4-adjacent pixel pair with `id`, ascending.
    pub fn neighbours(&self, id: usize) -> Option<&[usize]> {
        self.contains(id).then(|| self.neighbours[id].as_slice())
    }

    /// Direct sub-regions of `id`, ascending.
    pub fn sub_regions(&self, id: usize) -> Option<&[usize]> {
        self.contains(id).then(|| self.children[id].as_slice())
    }

    /// All descendants of `id` in the sub-region hierarchy, ascending.
    pub fn sub_regions_recursive(&self, id: usize) -> Option<Vec<usize>> {
        if !self.contains(id) {
            return None;
        }
        let mut found = vec![false; self.children.len()];
        let mut stack: Vec<usize> = self.children[id].clone();
        while let Some(c) = stack.pop() {
            if !found[c] {
                found[c] = true;
                stack.extend_from_slice(&self.children[c]);
            }
        }
        Some((0..found.len()).filter(|&c| found[c]).collect())
    }

    /// Lowest-id region that lists `id` as a direct sub-region.
    pub fn parent(&self, id: usize) -> Option<usize> {
        self.parents.get(id).copied().flatten()
    }

    /// Chain of parents from `id` up to a root, excluding `id`.
    pub fn parent_tree(&self, id: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            chain.push(p);
            cur = p;
        }
        chain
    }

    /// Selected regions without a parent, ascending.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.selected.len()).filter(|&id| self.selected[id] && self.parents[id].is_none())
    }
}

/// Sorted, de-duplicated neighbour lists of the full labeling.
fn adjacency(n: usize, field: &PixelLabelField) -> Vec<Vec<usize>> {
    let mut neighbours = vec![Vec::new(); n];
    for (a, b) in field.adjacent_pairs() {
        neighbours[a].push(b);
        neighbours[b].push(a);
    }
    for list in neighbours.iter_mut() {
        list.sort_unstable();
        list.dedup();
    }
    neighbours
}

fn claim_sub_regions(regions: &[Region], neighbours: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = regions.len();
    let mut children = vec![Vec::new(); n];
    let mut walk = Walk {
        mark: vec![0; n],
        stamp: 0,
        stack: Vec::new(),
    };

    for r in 0..n {
        if neighbours[r].len() < 2 {
            continue;
        }
        for &m in &neighbours[r] {
            if regions[m].is_border {
                continue;
            }
            if neighbours[m].len() == 1 || !walk.escapes(regions, neighbours, r, m) {
                children[r].push(m);
            }
        }
    }
    children
}

struct Walk {
    mark: Vec<u32>,
    stamp: u32,
    stack: Vec<usize>,
}

impl Walk {
    /// `true` if some region reachable from `start` without entering
    /// `enclosing` touches the frame or leaves `enclosing`'s bounding box.
    fn escapes(
        &mut self,
        regions: &[Region],
        neighbours: &[Vec<usize>],
        enclosing: usize,
        start: usize,
    ) -> bool {
        self.stamp += 1;
        let stamp = self.stamp;
        let frame = regions[enclosing].bounding_box;
        self.mark[enclosing] = stamp;
        self.mark[start] = stamp;
        self.stack.clear();
        self.stack.push(start);

        while let Some(v) = self.stack.pop() {
            let region = &regions[v];
            if region.is_border || frame.is_exceeded_by(&region.bounding_box) {
                return true;
            }
            for &u in &neighbours[v] {
                if self.mark[u] != stamp {
                    self.mark[u] = stamp;
                    self.stack.push(u);
                }
            }
        }
        false
    }
}

/// Kahn's algorithm over the sub-region links.
fn ensure_acyclic(children: &[Vec<usize>]) -> Result<(), RegionDetectError> {
    let mut in_degree = vec![0usize; children.len()];
    for list in children {
        for &c in list {
            in_degree[c] += 1;
        }
    }
    let mut ready: Vec<usize> = (0..children.len()).filter(|&v| in_degree[v] == 0).collect();
    let mut resolved = 0;
    while let Some(v) = ready.pop() {
        resolved += 1;
        for &c in &children[v] {
            in_degree[c] -= 1;
            if in_degree[c] == 0 {
                ready.push(c);
            }
        }
    }
    if resolved == children.len() {
        Ok(())
    } else {
        Err(RegionDetectError::CyclicHierarchy {
            unresolved: children.len() - resolved,
        })
    }
}
