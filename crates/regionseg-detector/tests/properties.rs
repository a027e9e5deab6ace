//! Invariants of the detector on pseudo-random images.

use regionseg_core::ScalarImage;
use regionseg_detector::{
    BoundaryMode, RegionConstraints, RegionDetectError, RegionDetector, RegionDetectorParams,
    RegionReport,
};
use std::collections::{BTreeSet, VecDeque};

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }
}

/// Blocky random image with `levels` distinct values.
fn random_image(rng: &mut Lcg, width: usize, height: usize, levels: u32) -> ScalarImage<i16> {
    let cell = 1 + (rng.next() % 3) as usize;
    let cols = width.div_ceil(cell);
    let cells: Vec<i16> = (0..cols * height.div_ceil(cell))
        .map(|_| (rng.next() % levels) as i16 * 40 - 40)
        .collect();
    let mut img = ScalarImage::from_fn(width, height, |x, y| cells[(y / cell) * cols + x / cell]);
    // Sprinkle single-pixel noise so thin and one-pixel regions occur.
    for _ in 0..(width * height) / 8 {
        let i = rng.next() as usize % img.data.len();
        img.data[i] = (rng.next() % levels) as i16 * 40 - 40;
    }
    img
}

/// Sizes of 4-connected equal-value components, in scan order of their
/// first pixel.
fn flood_fill_sizes(img: &ScalarImage<i16>) -> Vec<usize> {
    let (w, h) = (img.width, img.height);
    let mut seen = vec![false; w * h];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();
    for start in 0..w * h {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(start);
        let mut size = 0;
        while let Some(i) = queue.pop_front() {
            size += 1;
            let (x, y) = (i % w, i / w);
            let mut visit = |j: usize| {
                if !seen[j] && img.data[j] == img.data[i] {
                    seen[j] = true;
                    queue.push_back(j);
                }
            };
            if x > 0 {
                visit(i - 1);
            }
            if x + 1 < w {
                visit(i + 1);
            }
            if y > 0 {
                visit(i - w);
            }
            if y + 1 < h {
                visit(i + w);
            }
        }
        sizes.push(size);
    }
    sizes
}

fn images() -> impl Iterator<Item = ScalarImage<i16>> {
    let mut rng = Lcg(0x5eed);
    (0..60).map(move |_| {
        let w = 1 + (rng.next() % 24) as usize;
        let h = 1 + (rng.next() % 24) as usize;
        let levels = 2 + rng.next() % 3;
        random_image(&mut rng, w, h, levels)
    })
}

#[test]
fn regions_match_flood_fill() {
    let mut detector = RegionDetector::default();
    for img in images() {
        let expected = flood_fill_sizes(&img);
        let regions = detector.detect(&img.view()).expect("detect");
        let sizes: Vec<usize> = regions.iter().map(|r| r.size).collect();
        assert_eq!(sizes, expected);
        assert_eq!(sizes.iter().sum::<usize>(), img.width * img.height);

        let field = regions.label_field();
        for r in regions.iter() {
            for p in r.pixels() {
                assert_eq!(field.get(p.x as usize, p.y as usize), r.id);
                assert_eq!(img.view().get(p.x as usize, p.y as usize) as i32, r.value);
            }
        }
    }
}

#[test]
fn neighbours_are_symmetric_and_irreflexive() {
    let mut detector = RegionDetector::default();
    for img in images() {
        let regions = detector.detect(&img.view()).expect("detect");
        for r in regions.iter() {
            for &n in r.neighbours().expect("graph") {
                assert_ne!(n, r.id);
                assert!(regions.neighbours_of(n).expect("graph").contains(&r.id));
            }
        }
    }
}

#[test]
fn recursive_sub_regions_are_the_closure() {
    let mut detector = RegionDetector::default();
    for img in images() {
        let regions = detector.detect(&img.view()).expect("detect");
        for &id in regions.ids() {
            let mut closure = BTreeSet::new();
            let mut stack = regions.sub_regions_of(id, false).expect("graph");
            while let Some(c) = stack.pop() {
                if closure.insert(c) {
                    stack.extend(regions.sub_regions_of(c, false).expect("graph"));
                }
            }
            let recursive = regions.sub_regions_of(id, true).expect("graph");
            assert_eq!(recursive, closure.into_iter().collect::<Vec<_>>());
            assert!(!recursive.contains(&id));
        }
    }
}

#[test]
fn sub_regions_lie_inside_their_parent() {
    let mut detector = RegionDetector::default();
    for img in images() {
        let regions = detector.detect(&img.view()).expect("detect");
        for r in regions.iter() {
            for c in r.sub_regions(false).expect("graph") {
                let child = regions.by_id(c).expect("child");
                assert!(!child.is_border);
                assert!(!r.bounding_box.is_exceeded_by(&child.bounding_box));
            }
        }
    }
}

#[test]
fn narrowing_constraints_never_adds_regions() {
    let mut detector = RegionDetector::default();
    for img in images().take(20) {
        let mut last = usize::MAX;
        for max_size in [usize::MAX, 40, 10, 3, 1, 0] {
            let c = RegionConstraints::new(0, max_size, i32::MIN, i32::MAX);
            let n = detector.detect_with(&img.view(), c).expect("detect").len();
            assert!(n <= last);
            last = n;
        }
        let mut last = usize::MAX;
        for (lo, hi) in [(-40, 80), (-40, 40), (0, 40), (0, 0), (1, 0)] {
            let c = RegionConstraints::new(0, usize::MAX, lo, hi);
            let n = detector.detect_with(&img.view(), c).expect("detect").len();
            assert!(n <= last);
            last = n;
        }
        assert_eq!(last, 0, "inverted value range selects nothing");
    }
}

#[test]
fn repeated_detection_is_identical() {
    let mut detector = RegionDetector::default();
    let mut other = RegionDetector::default();
    for img in images().take(20) {
        let first = RegionReport::from_regions(&detector.detect(&img.view()).expect("detect"));
        let again = RegionReport::from_regions(&detector.detect(&img.view()).expect("detect"));
        let fresh = RegionReport::from_regions(&other.detect(&img.view()).expect("detect"));
        assert_eq!(first, again);
        assert_eq!(first, fresh);
    }
}

#[test]
fn thinned_boundaries_are_never_longer() {
    let mut detector = RegionDetector::default();
    for img in images().take(20) {
        let regions = detector.detect(&img.view()).expect("detect");
        for r in regions.iter() {
            let normal = r.boundary(BoundaryMode::Normal);
            let thinned = r.boundary(BoundaryMode::Thinned);
            assert!(!normal.is_empty());
            assert!(thinned.len() <= normal.len());
            assert_eq!(normal[0], r.upper_left());
            assert!(normal.iter().all(|&p| r.contains(p)));
        }
    }
}

#[test]
fn relation_queries_fail_for_unknown_ids() {
    let img = ScalarImage::from_fn(5, 5, |x, _| x as u8);
    let mut detector =
        RegionDetector::with_constraints(RegionConstraints::new(0, usize::MAX, 2, 4));
    let regions = detector.detect(&img.view()).expect("detect");
    assert_eq!(regions.ids(), &[2, 3, 4]);
    assert_eq!(regions.neighbours_of(3), Ok(&[2, 4][..]));
    assert_eq!(
        regions.neighbours_of(0),
        Err(RegionDetectError::RegionNotFound { id: 0 })
    );
    assert_eq!(
        regions.sub_regions_of(17, true),
        Err(RegionDetectError::RegionNotFound { id: 17 })
    );
}

#[test]
fn params_and_report_round_trip_through_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let params_path = dir.path().join("params.json");
    let params = RegionDetectorParams {
        constraints: RegionConstraints::new(2, 500, 0, 200),
        create_graph: true,
    };
    params.write_json(&params_path).expect("write params");
    let loaded = RegionDetectorParams::load_json(&params_path).expect("load params");
    assert_eq!(loaded, params);

    let img = images().next().expect("image");
    let mut detector = RegionDetector::new(loaded);
    let report = RegionReport::from_regions(&detector.detect(&img.view()).expect("detect"));
    let report_path = dir.path().join("report.json");
    report.write_json(&report_path).expect("write report");
    assert_eq!(RegionReport::load_json(&report_path).expect("load report"), report);

    assert!(RegionDetectorParams::from_json_str("{ \"constraints\": 3 }").is_err());
    assert!(RegionDetectorParams::load_json(dir.path().join("missing.json")).is_err());
}
