// File: crates/dash-core/tests/scale.rs
// Purpose: Tick increments, nice domains and bucket edges.

use dash_core::scale::{bucket_edges, extent, nice_domain, tick_increment, widen, DEFAULT_DOMAIN};
use dash_core::LinearScale;

#[test]
fn tick_increment_positive_and_inverse() {
    assert_eq!(tick_increment(0.0, 100.0, 10), 10.0);
    assert_eq!(tick_increment(0.0, 10.0, 5), 2.0);
    // sub-unit steps come back as -1/step
    assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
    assert_eq!(tick_increment(5.0, 5.0, 10), 0.0);
}

#[test]
fn nice_domain_rounds_outward() {
    assert_eq!(nice_domain(0.3, 9.7, 10), (0.0, 10.0));
    assert_eq!(nice_domain(8.0, 9.0, 10), (8.0, 9.0));
    assert_eq!(nice_domain(3.0, 11.0, 10), (3.0, 11.0));
    let (lo, hi) = nice_domain(12.0, 987.0, 10);
    assert!(lo <= 12.0 && hi >= 987.0);
    assert_eq!((lo, hi), (0.0, 1000.0));
}

#[test]
fn degenerate_and_empty_inputs() {
    assert_eq!(widen(5.0, 5.0), (5.0, 6.0));
    assert_eq!(extent(std::iter::empty()), None);
    let s = LinearScale::from_values(Vec::new(), (0.0, 10.0), 10);
    assert_eq!(s.domain(), DEFAULT_DOMAIN);
    let s = LinearScale::from_values(vec![5.0, 5.0], (0.0, 10.0), 10);
    assert_eq!(s.domain(), (5.0, 6.0));
}

#[test]
fn map_invert_and_descending_range() {
    let s = LinearScale::new((0.0, 10.0), (400.0, 0.0));
    assert_eq!(s.map(0.0), 400.0);
    assert_eq!(s.map(10.0), 0.0);
    assert_eq!(s.invert(200.0), 5.0);
    assert_eq!(s.pixel_bounds(), (0.0, 400.0));
    assert_eq!(s.clamp_to_domain(12.0), 10.0);

    let flat = LinearScale::new((3.0, 3.0), (0.0, 100.0));
    assert_eq!(flat.map(3.0), 50.0);
}

#[test]
fn bucket_edges_are_equal_width() {
    assert_eq!(bucket_edges(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    let sub = bucket_edges(8.0, 9.0, 10);
    assert_eq!(sub.len(), 11);
    assert_eq!(sub[0], 8.0);
    assert_eq!(sub[10], 9.0);
    assert!((sub[1] - 8.1).abs() < 1e-12);
}

#[test]
fn bucket_edges_far_from_zero_finish() {
    // step multiples are indistinguishable at this magnitude: one bucket
    assert_eq!(bucket_edges(1e17, 1e17 + 160.0, 20), vec![1e17, 1e17 + 160.0]);
    let near = bucket_edges(1e12, 1e12 + 100.0, 10);
    assert_eq!(near.len(), 11);
    assert_eq!(near[1], 1e12 + 10.0);
    assert_eq!(bucket_edges(-5.0, 5.0, 5), vec![-5.0, -4.0, -2.0, 0.0, 2.0, 4.0, 5.0]);
}
