//! Color values used by scales and drawing primitives.
//!
//! Colors are plain 8-bit RGBA. Strings are parsed with CSS syntax
//! (`"#4472C4"`, `"steelblue"`, `"rgb(68, 114, 196)"`, `"hsl(…)"`) and written
//! back as upper-case hex, so a legend spec serializes to readable JSON.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LegendError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse any CSS color string.
    pub fn parse(s: &str) -> Result<Self, LegendError> {
        let c = csscolorparser::parse(s.trim())
            .map_err(|e| LegendError::InvalidColor(s.to_string(), e.to_string()))?;
        let [r, g, b, a] = c.to_rgba8();
        Ok(Self { r, g, b, a })
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0..1 opacity.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = LegendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = LegendError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgba::parse(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

/// Color space used when blending between two scale stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Rgb,
    /// Shortest-arc hue interpolation.
    Hsl,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h_deg: f64, // 0..360, NaN for achromatic colors
    pub s: f64,     // 0..1
    pub l: f64,     // 0..1
}

/// Blend `a` towards `b` by `t` in 0..1 (clamped).
pub fn interpolate(a: Rgba, b: Rgba, t: f64, space: Interpolation) -> Rgba {
    let t = clamp01(t);
    match space {
        Interpolation::Rgb => Rgba::new(
            lerp_u8(a.r, b.r, t),
            lerp_u8(a.g, b.g, t),
            lerp_u8(a.b, b.b, t),
            lerp_u8(a.a, b.a, t),
        ),
        Interpolation::Hsl => {
            let (ha, hb) = (rgb8_to_hsl(a), rgb8_to_hsl(b));
            // Achromatic endpoints borrow the other end's hue so gray→color doesn't sweep.
            let (h0, h1) = match (ha.h_deg.is_nan(), hb.h_deg.is_nan()) {
                (true, true) => (0.0, 0.0),
                (true, false) => (hb.h_deg, hb.h_deg),
                (false, true) => (ha.h_deg, ha.h_deg),
                (false, false) => (ha.h_deg, hb.h_deg),
            };
            let mut dh = h1 - h0;
            if dh > 180.0 {
                dh -= 360.0;
            } else if dh < -180.0 {
                dh += 360.0;
            }
            let hsl = Hsl {
                h_deg: (h0 + dh * t).rem_euclid(360.0),
                s: ha.s + (hb.s - ha.s) * t,
                l: ha.l + (hb.l - ha.l) * t,
            };
            let mut out = hsl_to_rgb8(hsl);
            out.a = lerp_u8(a.a, b.a, t);
            out
        }
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

pub fn rgb8_to_hsl(c: Rgba) -> Hsl {
    let r = c.r as f64 / 255.0;
    let g = c.g as f64 / 255.0;
    let b = c.b as f64 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d == 0.0 {
        return Hsl {
            h_deg: f64::NAN,
            s: 0.0,
            l,
        };
    }
    let s = if l < 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Hsl {
        h_deg: h * 60.0,
        s,
        l,
    }
}

// HSL -> RGB conversion (linear; sufficient for legend colors)
pub fn hsl_to_rgb8(hsl: Hsl) -> Rgba {
    let h = if hsl.h_deg.is_nan() {
        0.0
    } else {
        hsl.h_deg.rem_euclid(360.0) / 360.0
    };
    let s = clamp01(hsl.s);
    let l = clamp01(hsl.l);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return Rgba::rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgba::rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_forms() {
        assert_eq!(Rgba::parse("#4472C4").unwrap(), Rgba::rgb(68, 114, 196));
        assert_eq!(Rgba::parse("white").unwrap(), WHITE);
        assert_eq!(Rgba::parse("rgb(255, 0, 0)").unwrap(), Rgba::rgb(255, 0, 0));
        assert!(Rgba::parse("not-a-color").is_err());
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let c = Rgba::rgb(237, 125, 49);
        let s = serde_json::to_string(&c).unwrap();
        assert_eq!(s, "\"#ED7D31\"");
        let back: Rgba = serde_json::from_str(&s).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn rgb_midpoint() {
        let mid = interpolate(BLACK, WHITE, 0.5, Interpolation::Rgb);
        assert_eq!(mid, Rgba::rgb(128, 128, 128));
        assert_eq!(interpolate(BLACK, WHITE, 2.0, Interpolation::Rgb), WHITE);
    }

    #[test]
    fn hsl_takes_shortest_hue_arc() {
        // red (0°) to blue (240°) goes through magenta (300°), not green.
        let red = Rgba::rgb(255, 0, 0);
        let blue = Rgba::rgb(0, 0, 255);
        let mid = interpolate(red, blue, 0.5, Interpolation::Hsl);
        assert_eq!(mid, Rgba::rgb(255, 0, 255));
    }

    #[test]
    fn hsl_round_trip() {
        let c = Rgba::rgb(91, 155, 213);
        assert_eq!(hsl_to_rgb8(rgb8_to_hsl(c)), c);
    }
}
