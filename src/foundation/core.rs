use crate::foundation::error::{BackdropError, BackdropResult};

pub use kurbo::{Point, Vec2};

/// A point normalized to a rectangle's size: `(0,0)` is top-left, `(1,1)` bottom-right.
///
/// Values outside the unit square are allowed; angle-based gradient directions project far past
/// the frame on purpose.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const TOP_LEADING: Self = Self::new(0.0, 0.0);
    pub const TOP: Self = Self::new(0.5, 0.0);
    pub const TOP_TRAILING: Self = Self::new(1.0, 0.0);
    pub const LEADING: Self = Self::new(0.0, 0.5);
    pub const CENTER: Self = Self::new(0.5, 0.5);
    pub const TRAILING: Self = Self::new(1.0, 0.5);
    pub const BOTTOM_LEADING: Self = Self::new(0.0, 1.0);
    pub const BOTTOM: Self = Self::new(0.5, 1.0);
    pub const BOTTOM_TRAILING: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Map into pixel space for a `width x height` frame.
    pub fn to_pixels(self, canvas: Canvas) -> Point {
        Point::new(self.x * f64::from(canvas.width), self.y * f64::from(canvas.height))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Byte length of a tightly packed RGBA8 buffer, `None` on overflow.
    pub fn rgba8_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
    }

    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Inclusive per-axis pixel bounds accepted by the exporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DimensionBounds {
    pub min: u32,
    pub max: u32,
}

impl DimensionBounds {
    pub const DEFAULT: Self = Self {
        min: 64,
        max: 16_000,
    };

    pub fn new(min: u32, max: u32) -> BackdropResult<Self> {
        if min == 0 || min > max {
            return Err(BackdropError::invalid_request(
                "dimension bounds must satisfy 0 < min <= max",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn contains(self, v: u32) -> bool {
        self.min <= v && v <= self.max
    }

    /// Reject canvases with a zero or out-of-range side.
    pub fn check(self, canvas: Canvas) -> BackdropResult<()> {
        if canvas.width == 0
            || canvas.height == 0
            || !self.contains(canvas.width)
            || !self.contains(canvas.height)
        {
            return Err(BackdropError::InvalidDimensions {
                width: canvas.width,
                height: canvas.height,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for DimensionBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
