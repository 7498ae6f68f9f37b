//! CSS color parsing and RGB interpolation for glitch transitions.

use std::fmt;
use std::str::FromStr;

use crate::error::EffectError;

/// An opaque 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation in RGB space. `t` is clamped to `[0, 1]`, so
    /// `lerp(to, 0.0) == self` and `lerp(to, 1.0) == to` exactly.
    pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| {
            let (a, b) = (a as f64, b as f64);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, to.r),
            g: mix(self.g, to.g),
            b: mix(self.b, to.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(body) = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).ok_or_else(|| EffectError::color(s));
        }
        parse_hex(s.strip_prefix('#').unwrap_or(s)).ok_or_else(|| EffectError::color(s))
    }
}

fn parse_hex(digits: &str) -> Option<Rgb> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match digits.len() {
        3 => {
            // #abc expands to #aabbcc
            let nibble = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
            Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Rgb> {
    let mut parts = body.split(',').map(|p| p.trim().parse::<u8>());
    let rgb = Rgb::new(parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    match parts.next() {
        None => Some(rgb),
        Some(_) => None,
    }
}

/// Color shown at `progress` along a transition between two CSS colors.
///
/// `None` when either endpoint fails to parse; the caller keeps whatever it
/// was displaying.
pub fn interpolate(start: &str, target: &str, progress: f64) -> Option<Rgb> {
    let start: Rgb = start.parse().ok()?;
    let target: Rgb = target.parse().ok()?;
    Some(start.lerp(target, progress))
}
