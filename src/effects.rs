//! Decorative particle burst shown on wins. Purely cosmetic; the host page
//! feeds these parameters to its confetti renderer.

use serde::Serialize;

const SPREAD_DEGREES: u32 = 70;
const COLORS: &[&str] = &["#9c27b0", "#ba68c8", "#e1bee7", "#8e24aa", "#7b1fa2"];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Celebration {
    pub particle_count: u32,
    pub spread: u32,
    /// Burst origin as fractions of the viewport (0..=1 on each axis).
    pub origin_x: f64,
    pub origin_y: f64,
    pub colors: &'static [&'static str],
}

impl Celebration {
    /// Burst centered on a screen point (client pixels).
    pub fn at(particle_count: u32, x: f64, y: f64, viewport_width: f64, viewport_height: f64) -> Self {
        let frac = |v: f64, extent: f64| {
            if extent > 0.0 { (v / extent).clamp(0.0, 1.0) } else { 0.5 }
        };
        Self {
            particle_count,
            spread: SPREAD_DEGREES,
            origin_x: frac(x, viewport_width),
            origin_y: frac(y, viewport_height),
            colors: COLORS,
        }
    }

    /// Burst in the middle of the viewport.
    pub fn centered(particle_count: u32) -> Self {
        Self::at(particle_count, 0.5, 0.5, 1.0, 1.0)
    }
}
