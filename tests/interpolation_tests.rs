use gridtrace::compute::rounding::round_half_even;
use gridtrace::{
    GeohashHasher, GridConfig, InterpolatedPoint, RawSample, SegmentInterpolator, SpatialHasher,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 0.001;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_interpolator() -> SegmentInterpolator {
    init_logging();
    let config = GridConfig::default()
        .with_time_min(0)
        .with_time_delta(10)
        .with_tolerance(0.0001);
    SegmentInterpolator::with_geohash(config).expect("valid config")
}

fn sorted_by_time<C>(mut points: Vec<InterpolatedPoint<C>>) -> Vec<InterpolatedPoint<C>> {
    points.sort_by_key(|p| p.timestamp());
    points
}

#[test]
fn test_stationary_segment_yields_two_grid_points() {
    let interp = scenario_interpolator();
    let current = RawSample::new(1.0, 1.0, 5, 1);
    let next = RawSample::new(1.0, 1.0, 25, 1);

    assert!(interp.validate(&current, Some(&next)));

    let points = sorted_by_time(interp.interpolate(&current, &next).collect());
    let expected_hash = GeohashHasher::default().hash(1.0, 1.0);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].timestamp(), 10);
    assert_eq!(points[1].timestamp(), 20);
    for p in &points {
        assert_eq!(p.longitude(), 1.0);
        assert_eq!(p.latitude(), 1.0);
        assert_eq!(p.entity_id(), 1);
        assert_eq!(p.hash(), &expected_hash);
    }
}

#[test]
fn test_gap_without_grid_line_is_empty() {
    let interp = scenario_interpolator();
    let current = RawSample::new(1.0, 1.0, 5, 1);
    let next = RawSample::new(1.0, 1.0, 9, 1);

    assert!(interp.validate(&current, Some(&next)));
    assert_eq!(interp.grid_range(&current, &next), None);
    assert_eq!(interp.interpolate(&current, &next).count(), 0);
}

#[test]
fn test_sample_before_origin_is_invalid() {
    let interp = scenario_interpolator();
    let current = RawSample::new(1.0, 1.0, -5, 1);
    let next = RawSample::new(1.0, 1.0, 25, 1);
    assert!(!interp.validate(&current, Some(&next)));
}

#[test]
fn test_moving_segment_is_invalid() {
    let interp = scenario_interpolator();
    let current = RawSample::new(1.0, 1.0, 5, 1);
    let next = RawSample::new(1.5, 1.0, 25, 1);
    assert!(!interp.validate(&current, Some(&next)));
}

#[test]
fn test_chain_terminator_is_invalid() {
    let interp = scenario_interpolator();
    let current = RawSample::new(1.0, 1.0, 5, 1);
    assert!(!interp.validate(&current, None));
}

#[test]
fn test_point_count_matches_grid_lines_in_span() {
    let interp = scenario_interpolator();
    let cases = [
        (0, 100, 11),
        (1, 99, 9),
        (10, 10 + 1, 1),
        (11, 19, 0),
        (11, 20, 1),
        (0, 1, 1),
    ];
    for (start, end, count) in cases {
        let current = RawSample::new(0.0, 0.0, start, 1);
        let next = RawSample::new(0.0, 0.0, end, 1);
        assert_eq!(
            interp.interpolate(&current, &next).count(),
            count,
            "segment {}..{}",
            start,
            end
        );
    }
}

#[test]
fn test_interpolation_is_deterministic() {
    let config = GridConfig::default()
        .with_time_delta(7)
        .with_tolerance(0.01)
        .with_precision(5);
    let interp = SegmentInterpolator::with_geohash(config).unwrap();
    let current = RawSample::new(12.345678, -45.678901, 3, 8);
    let next = RawSample::new(12.349999, -45.671111, 200, 8);

    let first: Vec<_> = interp.interpolate(&current, &next).collect();
    let second: Vec<_> = interp.interpolate(&current, &next).collect();
    assert_eq!(first, second);

    let reversed: Vec<_> = interp.interpolate(&current, &next).rev().collect();
    assert_eq!(sorted_by_time(reversed), first);
}

#[test]
fn test_emitted_coordinates_are_already_rounded() {
    let config = GridConfig::default()
        .with_time_delta(3)
        .with_tolerance(0.01)
        .with_precision(4);
    let interp = SegmentInterpolator::with_geohash(config).unwrap();
    let current = RawSample::new(100.123456, 10.987654, 1, 1);
    let next = RawSample::new(100.129999, 10.981111, 50, 1);

    for p in interp.interpolate(&current, &next) {
        assert_eq!(round_half_even(p.longitude(), 4), p.longitude());
        assert_eq!(round_half_even(p.latitude(), 4), p.latitude());
        assert!(p.longitude() >= 100.1234 && p.longitude() <= 100.1300);
    }
}

#[test]
fn test_custom_hasher_receives_rounded_lat_lon() {
    let config = GridConfig::default()
        .with_time_delta(10)
        .with_tolerance(0.01)
        .with_precision(2);
    let interp = SegmentInterpolator::new(config, |lat: f64, lon: f64| (lat, lon)).unwrap();
    let current = RawSample::new(5.001, 50.004, 10, 1);
    let next = RawSample::new(5.001, 50.004, 20, 1);

    let codes: Vec<(f64, f64)> = interp
        .interpolate(&current, &next)
        .map(|p| p.into_hash())
        .collect();
    assert_eq!(codes, vec![(50.0, 5.0), (50.0, 5.0)]);
}

#[test]
fn test_densify_over_multiple_entities() {
    let interp = scenario_interpolator();
    let samples = vec![
        RawSample::new(1.0, 1.0, 0, 1),
        RawSample::new(1.0, 1.0, 30, 1),
        RawSample::new(2.0, 2.0, 5, 2),
        RawSample::new(2.0, 2.0, 15, 2),
        RawSample::new(9.0, 9.0, 15, 2),
    ];
    let result = interp.densify(&samples);

    let mut by_entity: Vec<(i64, i64)> = result
        .points
        .iter()
        .map(|p| (p.entity_id(), p.timestamp()))
        .collect();
    by_entity.sort();
    assert_eq!(by_entity, vec![(1, 0), (1, 10), (1, 20), (1, 30), (2, 10)]);
    assert_eq!(result.stats.segments, 5);
    assert_eq!(result.stats.accepted, 2);
    assert_eq!(result.stats.points, 5);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    use rayon::prelude::*;

    let config = GridConfig::default()
        .with_time_delta(5)
        .with_tolerance(0.01)
        .with_precision(6);
    let interp = SegmentInterpolator::with_geohash(config).unwrap();
    let current = RawSample::new(-0.1278, 51.5074, 2, 4);
    let next = RawSample::new(-0.1201, 51.5001, 10_000, 4);

    let sequential: Vec<_> = interp.interpolate(&current, &next).collect();
    let parallel: Vec<_> = interp.par_interpolate(&current, &next).collect();
    assert_eq!(sorted_by_time(parallel), sequential);
}

/// Move `value` toward zero by `drift`, staying inside its coordinate range.
fn drift_toward_zero(value: f64, drift: f64) -> f64 {
    if value > 0.0 { value - drift } else { value + drift }
}

proptest! {
    #[test]
    fn test_grid_invariants_hold_for_valid_pairs(
        time_min in -1_000i64..1_000,
        time_delta in 1i64..120,
        start_offset in 0i64..5_000,
        span in 1i64..2_000,
        lon in -180.0f64..180.0,
        lat in -90.0f64..90.0,
        drift in 0.0f64..(TOLERANCE * 0.9),
    ) {
        let config = GridConfig::default()
            .with_time_min(time_min)
            .with_time_delta(time_delta)
            .with_tolerance(TOLERANCE)
            .with_precision(6);
        let interp = SegmentInterpolator::with_geohash(config).unwrap();

        let start = time_min + start_offset;
        let end = start + span;
        let current = RawSample::new(lon, lat, start, 3);
        let next = RawSample::new(
            drift_toward_zero(lon, drift),
            drift_toward_zero(lat, drift),
            end,
            3,
        );
        prop_assert!(interp.validate(&current, Some(&next)));

        let points: Vec<_> = interp.interpolate(&current, &next).collect();
        let expected = match interp.grid_range(&current, &next) {
            Some(range) => (range.end() - range.start() + 1) as usize,
            None => 0,
        };
        prop_assert_eq!(points.len(), expected);

        // Every grid line inside the span is emitted exactly once.
        let on_grid = (start..=end)
            .filter(|t| (t - time_min).rem_euclid(time_delta) == 0)
            .count();
        prop_assert_eq!(points.len(), on_grid);

        for p in &points {
            prop_assert_eq!((p.timestamp() - time_min).rem_euclid(time_delta), 0);
            prop_assert!(p.timestamp() >= start && p.timestamp() <= end);
            prop_assert_eq!(p.entity_id(), 3);
            prop_assert!(!p.hash().is_empty());
        }
    }

    #[test]
    fn test_rounding_is_idempotent(
        value in any::<f64>().prop_filter("finite", |v| v.is_finite()),
        precision in 0u32..=22,
    ) {
        let once = round_half_even(value, precision);
        prop_assert!(once.is_finite());
        prop_assert_eq!(round_half_even(once, precision), once);
    }

    #[test]
    fn test_validate_is_symmetric_in_position(
        lon in -179.0f64..179.0,
        lat in -89.0f64..89.0,
        dlon in -2.0 * TOLERANCE..2.0 * TOLERANCE,
        dlat in -2.0 * TOLERANCE..2.0 * TOLERANCE,
    ) {
        let config = GridConfig::default()
            .with_time_delta(10)
            .with_tolerance(TOLERANCE);
        let interp = SegmentInterpolator::with_geohash(config).unwrap();
        let a = (lon, lat);
        let b = (lon + dlon, lat + dlat);

        let forward = interp.validate(
            &RawSample::new(a.0, a.1, 0, 1),
            Some(&RawSample::new(b.0, b.1, 10, 1)),
        );
        let backward = interp.validate(
            &RawSample::new(b.0, b.1, 0, 1),
            Some(&RawSample::new(a.0, a.1, 10, 1)),
        );
        prop_assert_eq!(forward, backward);

        if dlon.abs() <= TOLERANCE * 0.9 && dlat.abs() <= TOLERANCE * 0.9 {
            prop_assert!(forward);
        }
    }
}
