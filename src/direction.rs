use std::str::FromStr;

use crate::foundation::core::UnitPoint;
use crate::foundation::error::BackdropError;

/// Distance (in unit-square lengths) an angle direction is projected from the center.
///
/// Large enough that, once the gradient is clamped to the frame, the line through the center
/// spans the whole image edge-to-edge for any aspect ratio.
pub const ANGLE_PROJECTION: f64 = 10_000.0;

/// One of the eight fixed compass directions, named by where the gradient starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Compass {
    Top,
    Bottom,
    Leading,
    Trailing,
    TopLeading,
    TopTrailing,
    BottomLeading,
    BottomTrailing,
}

impl Compass {
    pub const ALL: [Self; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Leading,
        Self::Trailing,
        Self::TopLeading,
        Self::TopTrailing,
        Self::BottomLeading,
        Self::BottomTrailing,
    ];

    pub fn start_end(self) -> (UnitPoint, UnitPoint) {
        match self {
            Self::Top => (UnitPoint::TOP, UnitPoint::BOTTOM),
            Self::Bottom => (UnitPoint::BOTTOM, UnitPoint::TOP),
            Self::Leading => (UnitPoint::LEADING, UnitPoint::TRAILING),
            Self::Trailing => (UnitPoint::TRAILING, UnitPoint::LEADING),
            Self::TopLeading => (UnitPoint::TOP_LEADING, UnitPoint::BOTTOM_TRAILING),
            Self::TopTrailing => (UnitPoint::TOP_TRAILING, UnitPoint::BOTTOM_LEADING),
            Self::BottomLeading => (UnitPoint::BOTTOM_LEADING, UnitPoint::TOP_TRAILING),
            Self::BottomTrailing => (UnitPoint::BOTTOM_TRAILING, UnitPoint::TOP_LEADING),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::TopLeading => "topLeading",
            Self::TopTrailing => "topTrailing",
            Self::BottomLeading => "bottomLeading",
            Self::BottomTrailing => "bottomTrailing",
        }
    }
}

impl FromStr for Compass {
    type Err = BackdropError;

    /// Accepts `topLeading`, `top-leading`, `top_leading` and any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.name().to_ascii_lowercase() == key)
            .ok_or_else(|| {
                BackdropError::invalid_request(format!("unknown gradient direction \"{s}\""))
            })
    }
}

/// How a linear gradient is oriented across the frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientDirection {
    Preset(Compass),
    /// Degrees, measured clockwise from the positive x axis (y grows downward).
    Angle(f64),
    Points { start: UnitPoint, end: UnitPoint },
}

impl GradientDirection {
    /// Concrete `(start, end)` pair in unit coordinates.
    pub fn resolve(&self) -> (UnitPoint, UnitPoint) {
        match *self {
            Self::Preset(p) => p.start_end(),
            Self::Angle(degrees) => {
                let rad = degrees.rem_euclid(360.0).to_radians();
                let (dy, dx) = rad.sin_cos();
                let c = UnitPoint::CENTER;
                let start = UnitPoint::new(c.x - ANGLE_PROJECTION * dx, c.y - ANGLE_PROJECTION * dy);
                let end = UnitPoint::new(c.x + ANGLE_PROJECTION * dx, c.y + ANGLE_PROJECTION * dy);
                (start, end)
            }
            Self::Points { start, end } => (start, end),
        }
    }
}

impl Default for GradientDirection {
    fn default() -> Self {
        Self::Preset(Compass::TopLeading)
    }
}

#[cfg(test)]
#[path = "../tests/unit/direction.rs"]
mod tests;
