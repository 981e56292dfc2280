// File: crates/chart-core/tests/dedup.rs
// Purpose: Duplicate label suppression by (text, anchor shape), including property checks.

use chart_core::labels::remove_duplicates;
use chart_core::{LabelDataPoint, LabelParent, Point, Rect, Size};
use proptest::prelude::*;

fn rect_point(text: &str, rect: Rect) -> LabelDataPoint {
    LabelDataPoint::new(text, Size::new(10.0, 8.0), LabelParent::rectangle(rect))
}

fn point_point(text: &str, p: Point) -> LabelDataPoint {
    LabelDataPoint::new(text, Size::new(10.0, 8.0), LabelParent::point(p))
}

#[test]
fn same_text_same_rect_keeps_one() {
    let r = Rect::new(0.0, 0.0, 10.0, 20.0);
    let out = remove_duplicates(vec![rect_point("5", r), rect_point("5", r)]);
    assert_eq!(out.len(), 1);
}

#[test]
fn same_text_different_rect_keeps_both() {
    let out = remove_duplicates(vec![
        rect_point("5", Rect::new(0.0, 0.0, 10.0, 20.0)),
        rect_point("5", Rect::new(12.0, 0.0, 10.0, 20.0)),
    ]);
    assert_eq!(out.len(), 2);
}

#[test]
fn different_text_same_rect_keeps_both() {
    let r = Rect::new(0.0, 0.0, 10.0, 20.0);
    let out = remove_duplicates(vec![rect_point("5", r), rect_point("6", r)]);
    assert_eq!(out.len(), 2);
}

#[test]
fn point_anchors_compare_points() {
    let out = remove_duplicates(vec![
        point_point("a", Point::new(1.0, 1.0)),
        point_point("a", Point::new(1.0, 1.0)),
        point_point("a", Point::new(2.0, 1.0)),
    ]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].parent, LabelParent::point(Point::new(2.0, 1.0)));
}

#[test]
fn rect_and_point_anchors_never_match() {
    let out = remove_duplicates(vec![
        rect_point("a", Rect::new(1.0, 1.0, 0.0, 0.0)),
        point_point("a", Point::new(1.0, 1.0)),
    ]);
    assert_eq!(out.len(), 2);
}

fn arb_point() -> impl Strategy<Value = LabelDataPoint> {
    (0u8..4, 0u8..3, 0u8..3, any::<bool>()).prop_map(|(text, x, y, is_rect)| {
        let text = format!("t{text}");
        if is_rect {
            rect_point(&text, Rect::new(x as f64, y as f64, 5.0, 5.0))
        } else {
            point_point(&text, Point::new(x as f64, y as f64))
        }
    })
}

proptest! {
    #[test]
    fn output_is_ordered_subset_without_duplicates(points in proptest::collection::vec(arb_point(), 0..40)) {
        let out = remove_duplicates(points.clone());
        prop_assert!(out.len() <= points.len());

        // Kept items appear in input order.
        let mut cursor = 0;
        for kept in &out {
            let found = points[cursor..].iter().position(|p| p == kept);
            prop_assert!(found.is_some());
            cursor += found.unwrap_or(0) + 1;
        }

        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                prop_assert!(!(a.text == b.text && a.parent.same_shape(&b.parent)));
            }
        }

        // Every input is represented by an equal kept item.
        for p in &points {
            prop_assert!(out.iter().any(|k| k.text == p.text && k.parent.same_shape(&p.parent)));
        }
    }
}
