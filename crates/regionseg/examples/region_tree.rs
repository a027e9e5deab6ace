//! Detect regions on a synthetic bitmap, print the sub-region tree and group
//! the region adjacency graph with a threshold cut.
//!
//! Run with `cargo run -p regionseg --example region_tree`.

use log::LevelFilter;
use regionseg::core::{init_with_level, ScalarImage};
use regionseg::cut::{hierarchical_cut, threshold_cut};
use regionseg::regions::{BoundaryMode, RegionDetector};

const BITMAP: [&str; 12] = [
    "....................",
    ".xxxxxxx....xxxxxxx.",
    ".x.....x....x.....x.",
    ".x.xxx.x....x..x..x.",
    ".x.x.x.x....x.....x.",
    ".x.xxx.x....xxxxxxx.",
    ".x.....x............",
    ".xxxxxxx...xx..xx...",
    "...........xx..xx...",
    "....................",
    "..xxxxxxxxxxxxxxxx..",
    "....................",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug).map_err(|e| e.to_string())?;

    let img = ScalarImage::from_fn(BITMAP[0].len(), BITMAP.len(), |x, y| {
        if BITMAP[y].as_bytes()[x] == b'x' {
            255u8
        } else {
            0
        }
    });
    let mut detector = RegionDetector::default();
    let regions = detector.detect(&img.view())?;

    println!("{} regions", regions.len());
    for r in regions.iter() {
        let pca = r.pca();
        println!(
            "  [{:2}] value={:3} size={:3} cog=({:5.2}, {:5.2}) boundary={}/{} form={:.2} axes=({:.2}, {:.2})",
            r.id,
            r.value,
            r.size,
            r.cog.x,
            r.cog.y,
            r.boundary_point_count(BoundaryMode::Normal),
            r.boundary_point_count(BoundaryMode::Thinned),
            r.form_factor(),
            pca.major_axis,
            pca.minor_axis,
        );
    }

    println!("sub-region tree:");
    print!("{}", regions.format_tree()?);

    let w = regionseg::adjacency_matrix(&regions)?;
    let ids = regions.ids();
    let groups = threshold_cut(&w, 1.5)?;
    println!("threshold cut into {} groups:", groups.len());
    for g in &groups {
        let members: Vec<usize> = g.iter().map(|&i| ids[i]).collect();
        println!("  {members:?}");
    }

    let tree = hierarchical_cut(&w)?;
    for (i, node) in tree.iter().enumerate().filter(|(_, n)| !n.is_leaf()) {
        println!(
            "cut node {i}: cost {:.2} splits {} regions into {:?}",
            node.cost,
            node.subset.len(),
            node.children
        );
    }
    Ok(())
}
