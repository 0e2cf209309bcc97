use super::*;
use crate::{
    axis::planner::DomainPolicy,
    data::dataset::{ColumnRelation, Record},
    foundation::core::EntityId,
};
use serde_json::json;

fn dataset() -> Dataset {
    let rows = [
        ("A", [10, 20, 30]),
        ("B", [30, 10, 5]),
        ("C", [15, 15, 15]),
    ]
    .iter()
    .map(|(name, values)| {
        let mut r = Record::new();
        r.insert("name".to_string(), json!(name));
        for (c, v) in ["y1", "y2", "y3"].iter().zip(values) {
            r.insert(c.to_string(), json!(v));
        }
        r
    })
    .collect();
    Dataset::new(
        ColumnRelation {
            labels: "name".to_string(),
            values: vec!["y1".to_string(), "y2".to_string(), "y3".to_string()],
            images: None,
        },
        rows,
    )
}

fn config(frames: usize) -> RaceConfig {
    RaceConfig {
        frames,
        ..RaceConfig::default()
    }
}

#[test]
fn build_produces_planned_frames() {
    let race = Race::build(dataset(), config(30)).unwrap();
    assert_eq!(race.len(), 30);
    assert!(!race.is_empty());
    assert!(race.frames().iter().all(|f| f.axis.is_some()));
    assert_eq!(race.frame(FrameIndex(29)).unwrap().index, FrameIndex(29));
    assert_eq!(
        race.frame(FrameIndex(30)).unwrap_err().kind(),
        crate::ErrorKind::Sequencing
    );
}

#[test]
fn seek_clamps_into_range() {
    let race = Race::build(dataset(), config(10)).unwrap();
    assert_eq!(race.seek(-4).index, FrameIndex(0));
    assert_eq!(race.seek(3).index, FrameIndex(3));
    assert_eq!(race.seek(1_000).index, FrameIndex(9));
}

#[test]
fn rebuild_failure_keeps_previous_frames() {
    let mut race = Race::build(dataset(), config(10)).unwrap();
    let before = race.frames().to_vec();
    assert!(race.set_value_columns(vec!["y1".to_string()]).is_err());
    assert_eq!(race.frames(), before.as_slice());
    assert_eq!(race.dataset().value_columns().len(), 3);
}

#[test]
fn changing_columns_rebuilds_with_fresh_state() {
    let mut race = Race::build(dataset(), config(10)).unwrap();
    race.set_value_columns(vec!["y3".to_string(), "y1".to_string()])
        .unwrap();
    let first = &race.frames()[0];
    // y3 leads with A (30), then C (15), then B (5).
    let order: Vec<EntityId> = first.rows.iter().map(|r| r.entity).collect();
    assert_eq!(order, vec![EntityId(0), EntityId(2), EntityId(1)]);
    assert!(first.rows.iter().all(|r| r.transition_speed == 0.0));
}

#[test]
fn set_config_switches_policy() {
    let mut race = Race::build(dataset(), config(10)).unwrap();
    let mut cfg = config(10);
    cfg.axis.policy = DomainPolicy::Custom {
        min: 0.0,
        max: 100.0,
    };
    race.set_config(cfg).unwrap();
    let axis = &race.seek(5).axis.as_ref().unwrap().y_axis;
    assert_eq!((axis.min, axis.max), (0.0, 100.0));
}

#[test]
fn coordinates_need_an_axis_plan() {
    let race = Race::build(dataset(), config(10)).unwrap();
    let frame = race.seek(0);
    let layout = race.config().layout;
    let map = race.coordinates(frame, &layout).unwrap();
    assert_eq!(map.column_count(), 10);

    let mut bare = frame.clone();
    bare.axis = None;
    assert_eq!(
        race.coordinates(&bare, &layout).unwrap_err().kind(),
        crate::ErrorKind::Sequencing
    );
}

#[test]
fn visible_rows_respect_column_count() {
    let mut cfg = config(10);
    cfg.column_count = 2;
    let race = Race::build(dataset(), cfg).unwrap();
    let rows = race.visible_rows(race.seek(0));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entity, EntityId(1));
}
