//! sRGB ↔ CIE L*a*b* conversion and `#RRGGBB` hex encoding.

use rgb::RGB8;
use serde::{Deserialize, Serialize};

/// D65 reference white.
const REF_X: f64 = 0.95047;
const REF_Y: f64 = 1.0;
const REF_Z: f64 = 1.08883;

/// A color in CIE L*a*b* (D65).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

#[inline]
fn linearize(value: f64) -> f64 {
    if value > 0.04045 {
        ((value + 0.055) / 1.055).powf(2.4)
    } else {
        value / 12.92
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.powf(1.0 / 3.0)
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert an 8-bit sRGB pixel to Lab.
pub fn rgb_to_lab(pixel: RGB8) -> Lab {
    let r = linearize(pixel.r as f64 / 255.0);
    let g = linearize(pixel.g as f64 / 255.0);
    let b = linearize(pixel.b as f64 / 255.0);

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    let fx = lab_f(x / REF_X);
    let fy = lab_f(y / REF_Y);
    let fz = lab_f(z / REF_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Euclidean distance in Lab space (CIE76 ΔE).
#[inline]
pub fn lab_distance(a: &Lab, b: &Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Uppercase `#RRGGBB`.
pub fn rgb_to_hex(pixel: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", pixel.r, pixel.g, pixel.b)
}

/// Parse `#RRGGBB` (the `#` is optional).
///
/// Input is not validated: non-hex digits count as zero and only the last six
/// digits are significant, so malformed catalog data yields some pixel rather
/// than an error.
pub fn hex_to_rgb(hex: &str) -> RGB8 {
    let digits = hex.trim().trim_start_matches('#');
    let value = digits
        .chars()
        .fold(0u32, |acc, c| (acc << 4) | c.to_digit(16).unwrap_or(0));
    RGB8::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}
