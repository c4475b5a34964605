//! Accent color parsing and interpolation.

use std::fmt;

/// An RGB color with float channels so per-frame smoothing accumulates
/// without quantization; rendering rounds to integer channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255.0, g: 255.0, b: 255.0 };
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> Option<Rgb> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = s
            .strip_prefix("rgba")
            .or_else(|| s.strip_prefix("rgb"))
            .and_then(|rest| rest.trim().strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let mut channels = body.split(',').map(str::trim);
            let r: f32 = channels.next()?.parse().ok()?;
            let g: f32 = channels.next()?.parse().ok()?;
            let b: f32 = channels.next()?.parse().ok()?;
            return Some(Rgb::new(r, g, b));
        }
        None
    }

    fn parse_hex(hex: &str) -> Option<Rgb> {
        match hex.len() {
            3 => {
                let mut channels = hex.chars().map(|c| {
                    c.to_digit(16).map(|d| (d * 16 + d) as f32)
                });
                Some(Rgb::new(channels.next()??, channels.next()??, channels.next()??))
            }
            6 => {
                let channel = |i: usize| {
                    u8::from_str_radix(hex.get(i..i + 2)?, 16).ok().map(f32::from)
                };
                Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }

    /// Linear blend toward `other` by factor `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// One smoothing step toward `target`.
    pub fn approach(&mut self, target: Rgb, factor: f32) {
        self.r += (target.r - self.r) * factor;
        self.g += (target.g - self.g) * factor;
        self.b += (target.b - self.b) * factor;
    }

    /// CSS `rgb(r, g, b)` string with integer channels.
    pub fn to_css(self) -> String {
        format!(
            "rgb({}, {}, {})",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
