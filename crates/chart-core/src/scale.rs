// File: crates/chart-core/src/scale.rs
// Summary: Linear value scale and category band scale used to map data into pixels.

/// Value coordinate (e.g., a measure).
pub type Value = f64;

/// Maps a value domain onto a pixel range. The range may be reversed
/// (start > end) for bars growing leftwards.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub domain_min: Value,
    pub domain_max: Value,
    pub range_start: f64,
    pub range_end: f64,
}

impl LinearScale {
    pub fn new(domain_min: Value, mut domain_max: Value, range_start: f64, range_end: f64) -> Self {
        if (domain_max - domain_min).abs() < 1e-12 { domain_max = domain_min + 1.0; }
        Self { domain_min, domain_max, range_start, range_end }
    }
    #[inline]
    pub fn to_px(&self, v: Value) -> f64 {
        let span = (self.domain_max - self.domain_min).max(1e-12);
        self.range_start + (v - self.domain_min) / span * (self.range_end - self.range_start)
    }
    /// Pixel length of `v` measured from the domain minimum; always non-negative.
    pub fn length(&self, v: Value) -> f64 {
        (self.to_px(v) - self.range_start).abs()
    }
}

/// Splits a pixel range into `count` equal bands with inner padding.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    pub start: f64,
    pub band: f64,
    pub padding: f64,
}

impl BandScale {
    /// `padding` is the fraction (0..1) of each step left empty.
    pub fn new(start: f64, step: f64, padding: f64) -> Self {
        Self { start, band: step.max(0.0), padding: padding.clamp(0.0, 0.95) }
    }
    pub fn step(&self) -> f64 { self.band }
    pub fn bandwidth(&self) -> f64 { self.band * (1.0 - self.padding) }
    /// Top edge of band `index`, already offset by half of the padding.
    pub fn position(&self, index: usize) -> f64 {
        self.start + self.band * index as f64 + self.band * self.padding / 2.0
    }
}
