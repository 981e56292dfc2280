// File: crates/chart-core/src/labels/layout.rs
// Summary: Greedy label placement: candidate positions around each anchor, offsets, collisions, viewport.
// Notes:
// - Preferred candidates are placed first; everything else keeps input order.
// - A candidate that fits nowhere is dropped rather than overlapped.

use tracing::debug;

use super::options::DataLabelLayoutOptions;
use super::{Label, LabelConfig, LabelDataPoint, LabelParent, PointLabelPosition, RectLabelPosition, RectOrientation};
use crate::color::Color;
use crate::geometry::{clamp, Point, Rect, Size};

pub struct DataLabelLayout {
    options: DataLabelLayoutOptions,
    config: LabelConfig,
}

impl DataLabelLayout {
    pub fn new(options: DataLabelLayoutOptions, config: LabelConfig) -> Self {
        Self { options, config }
    }

    pub fn options(&self) -> &DataLabelLayoutOptions {
        &self.options
    }

    /// Offsets tried for each anchor, nearest first.
    fn offsets(&self) -> Vec<f64> {
        let start = self.options.starting_offset;
        let mut out = vec![start];
        if let Some(delta) = self.options.offset_iteration_delta.filter(|d| *d > 0.0) {
            let mut next = start + delta;
            while next <= self.options.maximum_offset + f64::EPSILON {
                out.push(next);
                next += delta;
            }
        }
        out
    }

    /// Place `points` inside `viewport`; returns one label per placed point.
    pub fn layout(&self, points: &[LabelDataPoint], viewport: Size) -> Vec<Label> {
        let bounds = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        let mut order: Vec<&LabelDataPoint> = points.iter().filter(|p| p.is_preferred).collect();
        order.extend(points.iter().filter(|p| !p.is_preferred));

        let offsets = self.offsets();
        let mut placed: Vec<Rect> = Vec::with_capacity(points.len());
        let mut labels = Vec::with_capacity(points.len());
        for point in order {
            if let Some((rect, fill, offset)) = self.place(point, &offsets, &placed, &bounds) {
                placed.push(rect);
                labels.push(self.to_label(point, rect, fill, offset));
            }
        }
        debug!(candidates = points.len(), placed = labels.len(), "data label layout");
        labels
    }

    fn place(&self, point: &LabelDataPoint, offsets: &[f64], placed: &[Rect], bounds: &Rect) -> Option<(Rect, Color, f64)> {
        for &offset in offsets {
            let candidates: Vec<(Rect, Color)> = match &point.parent {
                LabelParent::Rectangle { rect, orientation, valid_positions } => valid_positions
                    .iter()
                    .filter_map(|pos| rect_candidate(rect, *orientation, *pos, point.text_size, offset).map(|r| (r, *pos)))
                    .map(|(r, pos)| (r, if is_inside(pos) { point.inside_fill } else { point.outside_fill }))
                    .collect(),
                LabelParent::Point { point: anchor, radius, valid_positions } => valid_positions
                    .iter()
                    .map(|pos| (point_candidate(anchor, *radius, *pos, point.text_size, offset), point.outside_fill))
                    .collect(),
            };
            for (rect, fill) in candidates {
                let rect = if self.options.attempt_to_move_labels_into_viewport {
                    move_into(&rect, bounds)
                } else {
                    rect
                };
                if bounds.contains_rect(&rect) && !placed.iter().any(|p| p.intersects(&rect)) {
                    return Some((rect, fill, offset));
                }
            }
        }
        None
    }

    fn to_label(&self, point: &LabelDataPoint, rect: Rect, fill: Color, offset: f64) -> Label {
        let mut label = Label::new(point.text.clone(), rect).with_fill(fill);
        label.font_size = point.font_size.or(Some(self.config.default_font_size_pt));
        label.second_row_text = point.second_row_text.clone();
        label.tooltip = point.tooltip.clone();
        label.identity = point.identity.clone();
        label.key = point.key.clone();
        label.has_background = point.has_background;
        if self.options.allow_leader_lines && offset > self.options.starting_offset {
            if let LabelParent::Point { point: anchor, .. } = &point.parent {
                let end = Point::new(
                    clamp(anchor.x, rect.left, rect.right()),
                    clamp(anchor.y, rect.top, rect.bottom()),
                );
                label.leader_line_points = Some(vec![*anchor, end]);
            }
        }
        label
    }
}

fn is_inside(pos: RectLabelPosition) -> bool {
    matches!(pos, RectLabelPosition::InsideCenter | RectLabelPosition::InsideEnd | RectLabelPosition::InsideBase)
}

/// Candidate box for a rectangle anchor; inside positions require the text to fit.
fn rect_candidate(parent: &Rect, orientation: RectOrientation, pos: RectLabelPosition, size: Size, offset: f64) -> Option<Rect> {
    let c = parent.center();
    let centered_x = c.x - size.width / 2.0;
    let centered_y = c.y - size.height / 2.0;
    let rect = match pos {
        RectLabelPosition::InsideCenter => Rect::new(centered_x, centered_y, size.width, size.height),
        _ => {
            let at_end = matches!(pos, RectLabelPosition::InsideEnd | RectLabelPosition::OutsideEnd);
            let inside = is_inside(pos);
            // Edge the label hugs, and whether it grows towards +x/+y from that edge.
            let (vertical, edge, grows_positive) = match (orientation, at_end) {
                (RectOrientation::VerticalBottomBased, true) => (true, parent.top, inside),
                (RectOrientation::VerticalBottomBased, false) => (true, parent.bottom(), !inside),
                (RectOrientation::VerticalTopBased, true) => (true, parent.bottom(), !inside),
                (RectOrientation::VerticalTopBased, false) => (true, parent.top, inside),
                (RectOrientation::HorizontalLeftBased, true) => (false, parent.right(), !inside),
                (RectOrientation::HorizontalLeftBased, false) => (false, parent.left, inside),
                (RectOrientation::HorizontalRightBased, true) => (false, parent.left, inside),
                (RectOrientation::HorizontalRightBased, false) => (false, parent.right(), !inside),
            };
            if vertical {
                let top = if grows_positive { edge + offset } else { edge - offset - size.height };
                Rect::new(centered_x, top, size.width, size.height)
            } else {
                let left = if grows_positive { edge + offset } else { edge - offset - size.width };
                Rect::new(left, centered_y, size.width, size.height)
            }
        }
    };
    if is_inside(pos) && !parent.contains_rect(&rect) {
        return None;
    }
    Some(rect)
}

fn point_candidate(anchor: &Point, radius: f64, pos: PointLabelPosition, size: Size, offset: f64) -> Rect {
    let gap = radius + offset;
    let (left, top) = match pos {
        PointLabelPosition::Above => (anchor.x - size.width / 2.0, anchor.y - gap - size.height),
        PointLabelPosition::Below => (anchor.x - size.width / 2.0, anchor.y + gap),
        PointLabelPosition::Left => (anchor.x - gap - size.width, anchor.y - size.height / 2.0),
        PointLabelPosition::Right => (anchor.x + gap, anchor.y - size.height / 2.0),
        PointLabelPosition::Center => (anchor.x - size.width / 2.0, anchor.y - size.height / 2.0),
    };
    Rect::new(left, top, size.width, size.height)
}

/// Shift `rect` so it lies within `bounds` when it is small enough to fit.
fn move_into(rect: &Rect, bounds: &Rect) -> Rect {
    if rect.width > bounds.width || rect.height > bounds.height {
        return *rect;
    }
    let dx = (bounds.left - rect.left).max(0.0) - (rect.right() - bounds.right()).max(0.0);
    let dy = (bounds.top - rect.top).max(0.0) - (rect.bottom() - bounds.bottom()).max(0.0);
    rect.translate(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::options::{get_data_label_layout_options, CartesianChartType};

    fn layout(chart: CartesianChartType) -> DataLabelLayout {
        let config = LabelConfig::default();
        DataLabelLayout::new(get_data_label_layout_options(chart, &config), config)
    }

    #[test]
    fn column_label_goes_above_bar() {
        let bar = Rect::new(10.0, 50.0, 20.0, 50.0);
        let p = LabelDataPoint::new("12", Size::new(10.0, 8.0), LabelParent::rectangle(bar));
        let labels = layout(CartesianChartType::ClusteredColumn).layout(&[p], Size::new(100.0, 100.0));
        assert_eq!(labels.len(), 1);
        let bb = labels[0].bounding_box;
        assert_eq!(bb.bottom(), 50.0 - 8.0);
        assert_eq!(bb.center().x, 20.0);
    }

    #[test]
    fn colliding_points_try_other_positions() {
        let size = Size::new(20.0, 10.0);
        let a = LabelDataPoint::new("a", size, LabelParent::point(Point::new(50.0, 50.0)));
        let b = LabelDataPoint::new("b", size, LabelParent::point(Point::new(52.0, 50.0)));
        let labels = layout(CartesianChartType::Scatter).layout(&[a, b], Size::new(200.0, 200.0));
        assert_eq!(labels.len(), 2);
        assert!(!labels[0].bounding_box.intersects(&labels[1].bounding_box));
    }

    #[test]
    fn labels_are_moved_into_viewport() {
        let p = LabelDataPoint::new("edge", Size::new(30.0, 10.0), LabelParent::point(Point::new(2.0, 50.0)));
        let labels = layout(CartesianChartType::Scatter).layout(&[p], Size::new(100.0, 100.0));
        assert_eq!(labels.len(), 1);
        assert!(labels[0].bounding_box.left >= 0.0);
    }
}
