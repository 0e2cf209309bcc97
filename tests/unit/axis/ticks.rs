use super::*;

#[test]
fn unit_interval_in_tenths() {
    let t = nice_ticks(0.0, 1.0, 10);
    assert_eq!(
        t,
        vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
    );
}

#[test]
fn step_picks_one_two_or_five() {
    assert_eq!(
        nice_ticks(0.0, 100.0, 5),
        vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
    assert_eq!(
        nice_ticks(4.5, 33.0, 5),
        vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0]
    );
    assert_eq!(nice_ticks(0.0, 10.0, 10).len(), 11);
}

#[test]
fn ticks_stay_inside_interval() {
    for (lo, hi) in [(-7.3, 12.9), (0.013, 0.071), (1234.0, 98765.0), (-5.5, -4.5)] {
        for count in [1usize, 3, 5, 8, 12] {
            let t = nice_ticks(lo, hi, count);
            assert!(!t.is_empty(), "no ticks for [{lo}, {hi}] x{count}");
            assert!(t.iter().all(|v| *v >= lo && *v <= hi));
            assert!(t.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn reversed_interval_descends() {
    assert_eq!(nice_ticks(1.0, 0.0, 2), vec![1.0, 0.5, 0.0]);
}

#[test]
fn degenerate_inputs() {
    assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    assert!(nice_ticks(0.0, 1.0, 0).is_empty());
    assert!(nice_ticks(f64::NAN, 1.0, 5).is_empty());
}
