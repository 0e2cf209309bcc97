use super::*;
use crate::data::dataset::{ColumnRelation, Record};
use serde_json::json;

fn dataset(rows: &[(&str, serde_json::Value)], columns: &[&str]) -> Dataset {
    let rows = rows
        .iter()
        .map(|(name, values)| {
            let mut r = Record::new();
            r.insert("name".to_string(), json!(name));
            for (col, v) in columns.iter().zip(values.as_array().unwrap()) {
                r.insert(col.to_string(), v.clone());
            }
            r
        })
        .collect();
    Dataset::new(
        ColumnRelation {
            labels: "name".to_string(),
            values: columns.iter().map(|c| c.to_string()).collect(),
            images: None,
        },
        rows,
    )
}

fn labels(ds: &Dataset, frame: &Frame) -> Vec<String> {
    frame
        .rows
        .iter()
        .map(|r| ds.label(r.entity).unwrap())
        .collect()
}

#[test]
fn two_entity_race_swaps_order() {
    let ds = dataset(
        &[("A", json!([10, 20, 30])), ("B", json!([30, 10, 5]))],
        &["c0", "c1", "c2"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 3, true).unwrap();
    assert_eq!(frames.len(), 3);

    assert_eq!(labels(&ds, &frames[0]), vec!["B", "A"]);
    assert_eq!(labels(&ds, &frames[2]), vec!["A", "B"]);

    let a = frames[1].row(EntityId(0)).unwrap();
    let b = frames[1].row(EntityId(1)).unwrap();
    assert_eq!(a.frame_value, Some(20.0));
    assert_eq!(b.frame_value, Some(10.0));
    assert_eq!(a.new_rank, 0);
    assert!(frames.iter().all(|f| f.axis.is_none()));
}

#[test]
fn constant_data_never_moves() {
    let ds = dataset(
        &[
            ("A", json!([5, 5, 5])),
            ("B", json!([9, 9, 9])),
            ("C", json!([1, 1, 1])),
        ],
        &["x", "y", "z"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 50, true).unwrap();
    for f in &frames {
        for (pos, row) in f.rows.iter().enumerate() {
            assert_eq!(row.new_rank, pos);
            assert_eq!(row.rank, pos as f64);
            assert_eq!(row.transition_speed, 0.0);
            assert_eq!(row.frame_index, f.index);
        }
        assert_eq!(labels(&ds, f), vec!["B", "A", "C"]);
    }
}

#[test]
fn ties_keep_input_order() {
    let ds = dataset(
        &[("A", json!([1, 1])), ("B", json!([1, 1])), ("C", json!([2, 2]))],
        &["x", "y"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 4, true).unwrap();
    assert_eq!(labels(&ds, &frames[0]), vec!["C", "A", "B"]);
}

#[test]
fn unusable_values_sort_last_without_failing() {
    let ds = dataset(
        &[
            ("A", json!(["oops", 3])),
            ("B", json!([1, 1])),
            ("C", json!([null, null])),
        ],
        &["x", "y"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 3, true).unwrap();
    assert_eq!(labels(&ds, &frames[0]), vec!["B", "A", "C"]);
    assert_eq!(frames[0].row(EntityId(0)).unwrap().frame_value, None);
    // The last frame only reads column y, where A is valid again.
    assert_eq!(labels(&ds, &frames[2]), vec!["A", "B", "C"]);
    assert_eq!(frames[2].row(EntityId(0)).unwrap().frame_value, Some(3.0));
}

#[test]
fn unsorted_build_keeps_input_order_and_ranks() {
    let ds = dataset(
        &[("A", json!([1, 100])), ("B", json!([50, 2]))],
        &["x", "y"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 10, false).unwrap();
    for f in &frames {
        assert_eq!(labels(&ds, f), vec!["A", "B"]);
        assert_eq!(f.rows[0].rank, 0.0);
        assert_eq!(f.rows[1].rank, 1.0);
    }
}

#[test]
fn rebuild_starts_from_fresh_state() {
    let ds = dataset(
        &[("A", json!([1, 100])), ("B", json!([50, 2]))],
        &["x", "y"],
    );
    let first = build_frames(&ds, ds.value_columns(), 30, true).unwrap();
    let second = build_frames(&ds, ds.value_columns(), 30, true).unwrap();
    assert_eq!(first, second);
    assert_eq!(second[0].rows[0].transition_speed, 0.0);
}

#[test]
fn visible_rows_follow_continuous_rank() {
    let ds = dataset(
        &[
            ("A", json!([1, 100])),
            ("B", json!([50, 40])),
            ("C", json!([30, 20])),
        ],
        &["x", "y"],
    );
    let frames = build_frames(&ds, ds.value_columns(), 100, true).unwrap();
    // A starts last and climbs to the top.
    assert_eq!(frames[0].visible_rows(2).len(), 2);
    let mid = frames
        .iter()
        .find(|f| f.visible_rows(2).len() == 3)
        .expect("a frame where A is sliding through the last slot");
    let ranks: Vec<f64> = mid.visible_rows(2).iter().map(|r| r.rank).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn configuration_errors_surface_before_any_frame() {
    let ds = dataset(&[("A", json!([1, 2]))], &["x", "y"]);
    assert!(matches!(
        build_frames(&ds, &ds.value_columns()[..1], 10, true),
        Err(crate::RaceError::TooFewColumns { got: 1 })
    ));
    assert!(matches!(
        build_frames(&ds, ds.value_columns(), 1, true),
        Err(crate::RaceError::TooFewFrames { got: 1 })
    ));
    let bad = TrackerConfig {
        transition_frames: 0,
        ..TrackerConfig::default()
    };
    assert!(build_frames_with(&ds, ds.value_columns(), 10, true, bad).is_err());
}
