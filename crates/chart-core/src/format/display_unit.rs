// File: crates/chart-core/src/format/display_unit.rs
// Summary: Display units (K, M, bn, T) and resolution from a magnitude hint.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayUnit {
    pub value: f64,
    pub title: &'static str,
    pub suffix: &'static str,
}

pub const THOUSANDS: DisplayUnit = DisplayUnit { value: 1e3, title: "Thousands", suffix: "K" };
pub const MILLIONS: DisplayUnit = DisplayUnit { value: 1e6, title: "Millions", suffix: "M" };
pub const BILLIONS: DisplayUnit = DisplayUnit { value: 1e9, title: "Billions", suffix: "bn" };
pub const TRILLIONS: DisplayUnit = DisplayUnit { value: 1e12, title: "Trillions", suffix: "T" };

/// Largest first.
const UNITS: [DisplayUnit; 4] = [TRILLIONS, BILLIONS, MILLIONS, THOUSANDS];

/// Display-units setting value requesting automatic selection.
pub const AUTO_DISPLAY_UNITS: f64 = 0.0;
/// Display-units setting value requesting plain numbers.
pub const NO_DISPLAY_UNITS: f64 = 1.0;

/// Pick the largest unit not exceeding `magnitude`. Magnitudes below one
/// thousand (including the "none" setting of 1) use no unit.
pub fn resolve_display_unit(magnitude: f64) -> Option<DisplayUnit> {
    let m = magnitude.abs();
    if !m.is_finite() {
        return None;
    }
    UNITS.iter().copied().find(|u| m >= u.value)
}

/// Scale `value` into `unit`.
pub fn project(unit: &DisplayUnit, value: f64) -> f64 {
    value / unit.value
}
