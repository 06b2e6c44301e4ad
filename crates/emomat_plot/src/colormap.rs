//! Sequential colormaps for heatmap fills.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Sequential colormap for mapping cell intensity to a fill color.
///
/// Ramps are piecewise-linear approximations of the matplotlib palettes
/// of the same names, good enough that figures read the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Colormap {
    /// Light-to-dark blue ramp, the classic confusion-matrix palette.
    #[default]
    Blues,
    /// Dark-purple to yellow perceptually uniform ramp.
    Viridis,
}

impl Colormap {
    /// Map an intensity `t` in `[0, 1]` to a fill color.
    ///
    /// Out-of-range intensities are clamped, so callers can pass raw
    /// `value / max` ratios without special-casing.
    #[must_use]
    pub fn color(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self {
            Colormap::Blues => ramp(t, (247, 251, 255), (107, 174, 214), (8, 48, 107)),
            Colormap::Viridis => ramp(t, (68, 1, 84), (33, 145, 140), (253, 231, 37)),
        }
    }
}

/// Piecewise-linear ramp through three color stops at t = 0, 0.5 and 1.
fn ramp(t: f64, lo: (u8, u8, u8), mid: (u8, u8, u8), hi: (u8, u8, u8)) -> RGBColor {
    let (from, to, s) = if t < 0.5 {
        (lo, mid, t * 2.0)
    } else {
        (mid, hi, (t - 0.5) * 2.0)
    };
    let channel = |a: u8, b: u8| -> u8 {
        (f64::from(a) + (f64::from(b) - f64::from(a)) * s).round() as u8
    };
    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blues_endpoints() {
        assert_eq!(Colormap::Blues.color(0.0), RGBColor(247, 251, 255));
        assert_eq!(Colormap::Blues.color(1.0), RGBColor(8, 48, 107));
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(Colormap::Viridis.color(0.0), RGBColor(68, 1, 84));
        assert_eq!(Colormap::Viridis.color(1.0), RGBColor(253, 231, 37));
    }

    #[test]
    fn test_blues_darkens_with_intensity() {
        // The red channel falls monotonically as cells get hotter.
        let mut last = 256i32;
        for i in 0..=10 {
            let RGBColor(r, _, _) = Colormap::Blues.color(f64::from(i) / 10.0);
            assert!(i32::from(r) <= last);
            last = i32::from(r);
        }
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(Colormap::Blues.color(-0.5), Colormap::Blues.color(0.0));
        assert_eq!(Colormap::Blues.color(7.0), Colormap::Blues.color(1.0));
        assert_eq!(Colormap::Blues.color(f64::NAN), Colormap::Blues.color(0.0));
    }

    #[test]
    fn test_default_is_blues() {
        assert_eq!(Colormap::default(), Colormap::Blues);
    }
}
