// File: crates/chart-core/src/labels/dedup.rs
// Summary: Drop candidate labels that repeat both the text and the anchor of an earlier one.

use std::collections::HashMap;

use super::{LabelDataPoint, LabelParent};

/// Keep the first candidate per (text, anchor shape). Candidates with the same
/// text on different anchors all survive; order is preserved.
pub fn remove_duplicates(points: Vec<LabelDataPoint>) -> Vec<LabelDataPoint> {
    let mut kept_parents: HashMap<String, Vec<LabelParent>> = HashMap::new();
    let mut unique = Vec::with_capacity(points.len());
    for point in points {
        let parents = kept_parents.entry(point.text.clone()).or_default();
        if parents.iter().any(|p| p.same_shape(&point.parent)) {
            continue;
        }
        parents.push(point.parent.clone());
        unique.push(point);
    }
    unique
}
