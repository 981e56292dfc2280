// File: crates/tornado-chart/tests/properties.rs
// Purpose: Layout invariants across viewport sizes and scroll offsets.

mod common;

use chart_core::Viewport;
use common::{sales_by_country, VisualBuilder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn visible_rows_fit_the_viewport(height in 0.0f64..400.0, count in 1usize..=6, offset in 0usize..10) {
        let mut builder = VisualBuilder::new(600.0, 300.0);
        builder.update(&sales_by_country(count));
        builder.visual.resize(Viewport::new(600.0, height));
        builder.visual.scroll_to(offset);
        builder.visual.finish_transitions();

        let capacity = (((height - 20.0).max(0.0) / 20.0).floor() as usize).max(1);
        let rows = builder.find(".category-text").len();
        prop_assert_eq!(rows, count.min(capacity));
        prop_assert_eq!(builder.find("rect.column").len(), 2 * rows);
        prop_assert_eq!(builder.find(".y rect").len(), usize::from(rows < count));
        prop_assert!(builder.visual.scroll_offset() + rows <= count);
    }
}
