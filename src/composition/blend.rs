use std::fmt;
use std::str::FromStr;

use crate::foundation::error::ComposeError;

/// Blend operator used when drawing the component over the surface.
///
/// `Normal` is premultiplied source-over; every other mode is a separable blend function
/// applied to unpremultiplied channels inside source-over compositing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source over destination.
    #[default]
    #[serde(alias = "source-over")]
    Normal,
    /// `s * d`.
    Multiply,
    /// `s + d - s * d`.
    Screen,
    /// Hard-light with source and destination swapped.
    Overlay,
    /// `min(s, d)`.
    Darken,
    /// `max(s, d)`.
    Lighten,
    /// Brightens destination to reflect source.
    ColorDodge,
    /// Darkens destination to reflect source.
    ColorBurn,
    /// Multiply or screen depending on the source.
    HardLight,
    /// Softer hard-light (W3C compositing formula).
    SoftLight,
    /// `|d - s|`.
    Difference,
    /// `d + s - 2 * d * s`.
    Exclusion,
}

/// Per-channel blend function over unpremultiplied `[0, 1]` values: `B(source, destination)`.
pub type BlendKernel = fn(f32, f32) -> f32;

impl BlendMode {
    /// Every supported mode, in declaration order.
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
        }
    }

    /// Separable blend function, or `None` for plain source-over.
    pub fn kernel(self) -> Option<BlendKernel> {
        let k: BlendKernel = match self {
            BlendMode::Normal => return None,
            BlendMode::Multiply => |s, d| s * d,
            BlendMode::Screen => |s, d| s + d - s * d,
            BlendMode::Overlay => |s, d| hard_light(d, s),
            BlendMode::Darken => |s, d| s.min(d),
            BlendMode::Lighten => |s, d| s.max(d),
            BlendMode::ColorDodge => |s, d| {
                if d <= 0.0 {
                    0.0
                } else if s >= 1.0 {
                    1.0
                } else {
                    (d / (1.0 - s)).min(1.0)
                }
            },
            BlendMode::ColorBurn => |s, d| {
                if d >= 1.0 {
                    1.0
                } else if s <= 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - d) / s).min(1.0)
                }
            },
            BlendMode::HardLight => hard_light,
            BlendMode::SoftLight => |s, d| {
                if s <= 0.5 {
                    d - (1.0 - 2.0 * s) * d * (1.0 - d)
                } else {
                    let g = if d <= 0.25 {
                        ((16.0 * d - 12.0) * d + 4.0) * d
                    } else {
                        d.sqrt()
                    };
                    d + (2.0 * s - 1.0) * (g - d)
                }
            },
            BlendMode::Difference => |s, d| (d - s).abs(),
            BlendMode::Exclusion => |s, d| d + s - 2.0 * d * s,
        };
        Some(k)
    }
}

fn hard_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

impl FromStr for BlendMode {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "source-over" {
            return Ok(BlendMode::Normal);
        }
        BlendMode::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| ComposeError::configuration(format!("unknown blend mode '{s}'")))
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/blend.rs"]
mod tests;
