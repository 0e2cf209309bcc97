use super::*;

fn tracker(entities: usize, total: usize) -> RankTracker {
    RankTracker::new(TrackerConfig::default(), entities, total)
}

/// Feed one frame where entity `i` is assigned `ranks[i]`.
fn step(t: &mut RankTracker, frame: usize, ranks: &[usize]) -> Vec<RankState> {
    t.begin_frame(FrameIndex(frame)).unwrap();
    ranks
        .iter()
        .enumerate()
        .map(|(i, &r)| t.advance(FrameIndex(frame), EntityId(i), r).unwrap())
        .collect()
}

#[test]
fn first_sighting_starts_at_rest() {
    let mut t = tracker(2, 10);
    let s = step(&mut t, 0, &[1, 0]);
    assert_eq!(s[0].current_rank, 1.0);
    assert_eq!(s[0].destination_rank, 1);
    assert_eq!(s[0].transition_speed, 0.0);
    assert_eq!(s[1].current_rank, 0.0);
}

#[test]
fn unchanged_ranks_never_move() {
    let mut t = tracker(3, 20);
    for f in 0..20 {
        for (i, s) in step(&mut t, f, &[0, 1, 2]).into_iter().enumerate() {
            assert_eq!(s.transition_speed, 0.0);
            assert_eq!(s.current_rank, i as f64);
            assert_eq!(s.destination_rank, i);
        }
    }
}

#[test]
fn swap_uses_full_window_when_budget_allows() {
    let mut t = tracker(2, 200);
    step(&mut t, 0, &[0, 1]);
    let s = step(&mut t, 1, &[1, 0]);
    assert_eq!(s[0].destination_rank, 1);
    assert_eq!(s[0].transition_speed, 1.0 / 40.0);
    assert_eq!(s[0].current_rank, 1.0 / 40.0);
    assert_eq!(s[1].transition_speed, -1.0 / 40.0);
}

#[test]
fn swap_arrives_within_bound_and_snaps_exactly() {
    let total = 100;
    let mut t = tracker(2, total);
    step(&mut t, 0, &[0, 1]);
    let k = 10;
    for f in 1..k {
        step(&mut t, f, &[0, 1]);
    }
    let bound = 40.min(total - k - 1);
    let mut arrived_at = None;
    for f in k..total {
        let s = step(&mut t, f, &[1, 0]);
        if arrived_at.is_none() && s[0].current_rank == 1.0 {
            assert_eq!(s[0].transition_speed, 0.0);
            assert_eq!(s[1].current_rank, 0.0);
            arrived_at = Some(f);
        }
        // Never lingers inside the snap radius without being exact.
        let gap = (s[0].destination_rank as f64 - s[0].current_rank).abs();
        assert!(gap == 0.0 || gap >= DEFAULT_SNAP_EPSILON);
    }
    let arrived_at = arrived_at.unwrap();
    assert!(arrived_at - k < bound);
}

#[test]
fn late_swap_speeds_up_to_finish_on_time() {
    let total = 10;
    let mut t = tracker(2, total);
    for f in 0..6 {
        step(&mut t, f, &[0, 1]);
    }
    // Frame 6 leaves 3 frames of budget.
    let s = step(&mut t, 6, &[1, 0]);
    assert_eq!(s[0].transition_speed, 1.0 / 3.0);
    step(&mut t, 7, &[1, 0]);
    let s = step(&mut t, 8, &[1, 0]);
    assert_eq!(s[0].current_rank, 1.0);
    assert_eq!(s[1].current_rank, 0.0);
}

#[test]
fn swap_on_final_frame_arrives_immediately() {
    let mut t = tracker(2, 3);
    step(&mut t, 0, &[0, 1]);
    step(&mut t, 1, &[0, 1]);
    let s = step(&mut t, 2, &[1, 0]);
    assert_eq!(s[0].current_rank, 1.0);
    assert_eq!(s[1].current_rank, 0.0);
    assert!(s.iter().all(|s| s.transition_speed == 0.0));
}

#[test]
fn retarget_mid_flight_recomputes_from_current_position() {
    let mut t = tracker(3, 200);
    step(&mut t, 0, &[0, 1, 2]);
    let mut last = step(&mut t, 1, &[2, 1, 0]);
    for f in 2..11 {
        last = step(&mut t, f, &[2, 1, 0]);
    }
    let mid = last[0].current_rank;
    assert!(mid > 0.0 && mid < 2.0);
    let s = step(&mut t, 11, &[1, 2, 0]);
    assert_eq!(s[0].destination_rank, 1);
    let expected = (1.0 - mid) / 40.0;
    assert!((s[0].transition_speed - expected).abs() < 1e-12);
}

#[test]
fn frames_must_arrive_in_order() {
    let mut t = tracker(1, 5);
    assert!(t.begin_frame(FrameIndex(1)).is_err());
    t.begin_frame(FrameIndex(0)).unwrap();
    assert!(t.begin_frame(FrameIndex(0)).is_err());
    t.begin_frame(FrameIndex(1)).unwrap();
}

#[test]
fn unknown_entity_is_a_sequencing_error() {
    let mut t = tracker(1, 5);
    t.begin_frame(FrameIndex(0)).unwrap();
    let err = t.advance(FrameIndex(0), EntityId(3), 0).unwrap_err();
    assert_eq!(err.kind(), crate::foundation::error::ErrorKind::Sequencing);
}

#[test]
fn config_validation() {
    assert!(TrackerConfig::default().validate().is_ok());
    let bad = TrackerConfig {
        transition_frames: 0,
        ..TrackerConfig::default()
    };
    assert!(bad.validate().is_err());
    let bad = TrackerConfig {
        snap_epsilon: 0.0,
        ..TrackerConfig::default()
    };
    assert!(bad.validate().is_err());
}
