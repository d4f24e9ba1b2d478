//! Heatmap colors for deviation visualization.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CRITICAL_THRESHOLD_MM, Severity, WARNING_THRESHOLD_MM};

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeatmapColor {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
}

impl HeatmapColor {
    /// Create a color from RGB components.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` value.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Convert to floating point values in [0, 1] range.
    #[inline]
    #[must_use]
    pub fn to_float(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }

    /// Linear blend between two colors; `t` is clamped to [0, 1].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        // Result stays within [0, 255] since both ends do.
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Within tolerance (`#22c55e`).
    pub const GREEN: Self = Self::from_hex(0x22_c5_5e);

    /// Start of the warning band (`#eab308`).
    pub const YELLOW: Self = Self::from_hex(0xea_b3_08);

    /// End of the warning band (`#f97316`).
    pub const ORANGE: Self = Self::from_hex(0xf9_73_16);

    /// Out of tolerance (`#ef4444`).
    pub const RED: Self = Self::from_hex(0xef_44_44);
}

impl Severity {
    /// Base color of the band. Warning uses the start of its gradient.
    #[must_use]
    pub const fn color(self) -> HeatmapColor {
        match self {
            Self::Ok => HeatmapColor::GREEN,
            Self::Warning => HeatmapColor::YELLOW,
            Self::Critical => HeatmapColor::RED,
        }
    }
}

/// Heatmap color for a deviation in millimeters.
///
/// Ok and critical deviations get flat colors. Warning deviations blend from
/// yellow at the warning threshold to orange at the critical threshold.
///
/// # Example
///
/// ```
/// use deviation_types::{deviation_color, HeatmapColor};
///
/// assert_eq!(deviation_color(3.0), HeatmapColor::GREEN);
/// assert_eq!(deviation_color(10.0), HeatmapColor::YELLOW);
/// assert_eq!(deviation_color(-50.0), HeatmapColor::RED);
/// ```
#[must_use]
pub fn deviation_color(deviation_mm: f64) -> HeatmapColor {
    match crate::classify_deviation(deviation_mm) {
        Severity::Ok => HeatmapColor::GREEN,
        Severity::Warning => {
            let t = (deviation_mm.abs() - WARNING_THRESHOLD_MM)
                / (CRITICAL_THRESHOLD_MM - WARNING_THRESHOLD_MM);
            HeatmapColor::YELLOW.lerp(HeatmapColor::ORANGE, t)
        }
        Severity::Critical => HeatmapColor::RED,
    }
}
