use super::*;

#[test]
fn extent_starts_empty_and_skips_absent_samples() {
    let e: Extent = [None, None].into_iter().collect();
    assert_eq!(e.bounds(), None);

    let e: Extent = [Some(3.0), None, Some(-1.0), Some(8.0)].into_iter().collect();
    assert_eq!(e.bounds(), Some((-1.0, 8.0)));
}

#[test]
fn extent_accepts_extreme_legitimate_values() {
    let mut e = Extent::default();
    e.push(f64::MAX);
    e.push(f64::MIN_POSITIVE);
    assert_eq!(e.bounds(), Some((f64::MIN_POSITIVE, f64::MAX)));
}

#[test]
fn padding_keeps_zero_min_anchored() {
    assert_eq!(pad_bounds(0.0, 10.0, 0.1), (0.0, 11.0));
    assert_eq!(pad_bounds(5.0, 30.0, 0.1), (4.5, 33.0));
    assert_eq!(pad_bounds(-10.0, -5.0, 0.1), (-9.0, -5.5));
}

#[test]
fn round_half_up_rounds_ties_toward_positive_infinity() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(1.2), 1.0);
}
