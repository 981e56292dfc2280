// File: crates/chart-core/src/ease.rs
// Summary: Named easing curves ("cubic-in-out", "linear", ...) for scene transitions.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::error::ChartError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Linear,
    Quad,
    Cubic,
    Sin,
    Exp,
    Circle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EaseMode {
    In,
    Out,
    InOut,
    OutIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Easing {
    pub curve: Curve,
    pub mode: EaseMode,
}

impl Easing {
    pub const LINEAR: Easing = Easing { curve: Curve::Linear, mode: EaseMode::In };
    pub const CUBIC_IN_OUT: Easing = Easing { curve: Curve::Cubic, mode: EaseMode::InOut };

    pub const fn new(curve: Curve, mode: EaseMode) -> Self {
        Self { curve, mode }
    }

    /// Map linear progress `t` in 0..=1 to eased progress. Endpoints are exact.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let f = |x: f64| ease_in(self.curve, x);
        match self.mode {
            EaseMode::In => f(t),
            EaseMode::Out => 1.0 - f(1.0 - t),
            EaseMode::InOut => {
                if t < 0.5 { f(2.0 * t) / 2.0 } else { 1.0 - f(2.0 - 2.0 * t) / 2.0 }
            }
            EaseMode::OutIn => {
                if t < 0.5 { (1.0 - f(1.0 - 2.0 * t)) / 2.0 } else { 0.5 + f(2.0 * t - 1.0) / 2.0 }
            }
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::CUBIC_IN_OUT
    }
}

fn ease_in(curve: Curve, t: f64) -> f64 {
    match curve {
        Curve::Linear => t,
        Curve::Quad => t * t,
        Curve::Cubic => t * t * t,
        Curve::Sin => 1.0 - (t * PI / 2.0).cos(),
        Curve::Exp => 2f64.powf(10.0 * (t - 1.0)),
        Curve::Circle => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
    }
}

impl FromStr for Easing {
    type Err = ChartError;

    /// Parses `<curve>[-<mode>]`, e.g. `cubic-in-out`, `quad-out`, `linear`.
    /// A bare curve name eases in.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let (curve_name, mode_name) = match name.find('-') {
            Some(i) => (&name[..i], &name[i + 1..]),
            None => (name.as_str(), "in"),
        };
        let curve = match curve_name {
            "linear" => Curve::Linear,
            "quad" => Curve::Quad,
            "cubic" => Curve::Cubic,
            "sin" => Curve::Sin,
            "exp" => Curve::Exp,
            "circle" => Curve::Circle,
            _ => return Err(ChartError::UnknownEasing(s.to_string())),
        };
        let mode = match mode_name {
            "in" => EaseMode::In,
            "out" => EaseMode::Out,
            "in-out" => EaseMode::InOut,
            "out-in" => EaseMode::OutIn,
            _ => return Err(ChartError::UnknownEasing(s.to_string())),
        };
        Ok(Easing { curve, mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_curves() {
        assert_eq!("cubic-in-out".parse::<Easing>().ok(), Some(Easing::CUBIC_IN_OUT));
        assert_eq!("linear".parse::<Easing>().ok(), Some(Easing::LINEAR));
        assert_eq!(" Quad-Out ".parse::<Easing>().ok(), Some(Easing::new(Curve::Quad, EaseMode::Out)));
        assert_eq!("sin-out-in".parse::<Easing>().ok(), Some(Easing::new(Curve::Sin, EaseMode::OutIn)));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(matches!("bounce".parse::<Easing>(), Err(ChartError::UnknownEasing(name)) if name == "bounce"));
        assert!(matches!("cubic-sideways".parse::<Easing>(), Err(ChartError::UnknownEasing(_))));
    }

    #[test]
    fn every_mode_keeps_exact_endpoints() {
        for mode in [EaseMode::In, EaseMode::Out, EaseMode::InOut, EaseMode::OutIn] {
            for curve in [Curve::Linear, Curve::Quad, Curve::Cubic, Curve::Sin, Curve::Exp, Curve::Circle] {
                let e = Easing::new(curve, mode);
                assert_eq!(e.apply(0.0), 0.0);
                assert_eq!(e.apply(1.0), 1.0);
                assert!((0.0..=1.0).contains(&e.apply(0.5)));
            }
        }
    }
}
