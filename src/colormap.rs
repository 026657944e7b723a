//! Named colormaps for turning scalar vertex values into RGB colors.
//!
//! Colormaps are piecewise linear between a few color stops. Append `_r` to a name to
//! reverse the map.

use crate::error::{NeuropaintError, Result};

/// Names of the built-in colormaps.
pub const COLORMAP_NAMES: [&str; 5] = ["gist_ncar", "viridis", "coolwarm", "hot", "gray"];

const GIST_NCAR: &[(f64, [u8; 3])] = &[
    (0.00, [0, 0, 128]),
    (0.10, [0, 56, 255]),
    (0.20, [0, 220, 255]),
    (0.33, [0, 255, 90]),
    (0.45, [100, 255, 0]),
    (0.60, [255, 240, 0]),
    (0.72, [255, 130, 0]),
    (0.82, [255, 0, 30]),
    (0.92, [240, 0, 255]),
    (1.00, [254, 248, 254]),
];

const VIRIDIS: &[(f64, [u8; 3])] = &[
    (0.00, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.50, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.00, [253, 231, 37]),
];

const COOLWARM: &[(f64, [u8; 3])] = &[
    (0.00, [59, 76, 192]),
    (0.50, [221, 221, 221]),
    (1.00, [180, 4, 38]),
];

const HOT: &[(f64, [u8; 3])] = &[
    (0.000, [10, 0, 0]),
    (0.365, [255, 0, 0]),
    (0.746, [255, 255, 0]),
    (1.000, [255, 255, 255]),
];

const GRAY: &[(f64, [u8; 3])] = &[
    (0.0, [0, 0, 0]),
    (1.0, [255, 255, 255]),
];


/// A colormap defined by color stops at increasing positions in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    pub name: String,
    stops: Vec<(f64, [u8; 3])>,
}

impl Colormap {
    /// Look up a built-in colormap by name, see [`COLORMAP_NAMES`].
    pub fn by_name(name: &str) -> Result<Colormap> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let stops: &[(f64, [u8; 3])] = match base {
            "gist_ncar" => GIST_NCAR,
            "viridis" => VIRIDIS,
            "coolwarm" => COOLWARM,
            "hot" => HOT,
            "gray" | "grey" => GRAY,
            _ => return Err(NeuropaintError::UnknownColormap(name.to_string())),
        };

        let stops: Vec<(f64, [u8; 3])> = if reversed {
            stops.iter().rev().map(|(pos, rgb)| (1.0 - pos, *rgb)).collect()
        } else {
            stops.to_vec()
        };
        Ok(Colormap { name: name.to_string(), stops })
    }

    /// The color at position `t`, which is clamped to `[0, 1]`. NaN maps to the first stop.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };

        let upper = self.stops.iter().position(|(pos, _)| *pos >= t).unwrap_or(self.stops.len() - 1);
        if upper == 0 {
            return self.stops[0].1;
        }
        let (p0, c0) = self.stops[upper - 1];
        let (p1, c1) = self.stops[upper];
        let frac = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };

        let mut rgb = [0u8; 3];
        for ch in 0..3 {
            let v = c0[ch] as f64 + frac * (c1[ch] as f64 - c0[ch] as f64);
            rgb[ch] = v.round() as u8;
        }
        rgb
    }

    /// The color for `value` with the colormap stretched over `[vmin, vmax]`.
    pub fn sample_range(&self, value: f64, vmin: f64, vmax: f64) -> [u8; 3] {
        if vmax > vmin {
            self.sample((value - vmin) / (vmax - vmin))
        } else {
            self.sample(0.5)
        }
    }
}
