//! Background composition: turns a [`BackgroundSpec`] into an ordered [`LayerStack`].
//!
//! No pixels are produced here. The rasterizer consumes the stack back-to-front.

use std::str::FromStr;

use crate::color::Color;
use crate::color::perceptual::mix_perceptual;
use crate::direction::GradientDirection;
use crate::foundation::core::UnitPoint;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Fraction of the perceptual mix from the base color toward black/white.
pub const DEEPEN_RATIO: f64 = 0.55;
/// Opacity of the base color at the top of a perceptual background.
pub const PERCEPTUAL_TOP_OPACITY: f64 = 0.9;
/// Opacity of the deepened color at the bottom of a perceptual background.
pub const PERCEPTUAL_BOTTOM_OPACITY: f64 = 0.85;
/// Gaussian sigma of the frosted material blur, in pixels.
pub const MATERIAL_BLUR_SIGMA_PX: f64 = 12.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Color that perceptual backgrounds deepen toward.
    pub fn deepen_target(self) -> Color {
        match self {
            Self::Light => Color::WHITE,
            Self::Dark => Color::BLACK,
        }
    }

    /// Translucent tint of the frosted material panel.
    pub fn material_tint(self) -> Color {
        match self {
            Self::Light => Color::rgba(0.97, 0.97, 0.98, 0.35),
            Self::Dark => Color::rgba(0.11, 0.11, 0.12, 0.40),
        }
    }

    /// Opaque matte used when flattening alpha for containers without an alpha channel.
    pub fn matte(self) -> Color {
        match self {
            Self::Light => Color::WHITE,
            Self::Dark => Color::BLACK,
        }
    }
}

impl FromStr for ColorScheme {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(BackdropError::invalid_request(format!(
                "unknown color scheme \"{s}\" (expected light or dark)"
            ))),
        }
    }
}

/// What the background is made of.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum BackgroundSpec {
    /// Vertical blend from a base color to its perceptually deepened variant.
    #[serde(rename_all = "camelCase")]
    Perceptual { base_color: Color },
    /// Evenly spaced multi-stop linear gradient.
    #[serde(rename_all = "camelCase")]
    LinearGradient {
        stops: Vec<Color>,
        #[serde(default)]
        direction: GradientDirection,
    },
}

impl BackgroundSpec {
    /// The application's initial gradient: three cool hues from the top-leading corner.
    pub fn default_gradient() -> Self {
        Self::LinearGradient {
            stops: vec![
                Color::from_hsb(0.58, 0.75, 0.9),
                Color::from_hsb(0.65, 0.70, 0.85),
                Color::from_hsb(0.75, 0.65, 0.80),
            ],
            direction: GradientDirection::default(),
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Perceptual { .. } => "perceptual",
            Self::LinearGradient { .. } => "linearGradient",
        }
    }
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self::Perceptual {
            base_color: Color::from_hsb(0.58, 0.75, 0.9),
        }
    }
}

/// A color anchored at `offset` in `[0, 1]` along the gradient axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// Full-frame linear gradient fill.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradientLayer {
    stops: Vec<GradientStop>,
    start: UnitPoint,
    end: UnitPoint,
    clip_to_frame: bool,
}

impl LinearGradientLayer {
    /// Gradient from `start` to `end`; needs at least two stops with non-decreasing offsets.
    pub fn new(
        stops: Vec<GradientStop>,
        start: UnitPoint,
        end: UnitPoint,
    ) -> BackdropResult<Self> {
        if stops.len() < 2 {
            return Err(BackdropError::invalid_request(format!(
                "linear gradient needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        let out_of_order = stops.windows(2).any(|p| {
            p[0].offset
                .partial_cmp(&p[1].offset)
                .is_none_or(|o| o.is_gt())
        });
        if out_of_order {
            return Err(BackdropError::invalid_request(
                "gradient stop offsets must be finite and non-decreasing",
            ));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(BackdropError::invalid_request(
                "gradient direction must resolve to finite points",
            ));
        }
        Ok(Self {
            stops,
            start,
            end,
            clip_to_frame: false,
        })
    }

    /// Treat `start -> end` as a line through the frame: the rasterizer maps `t = 0` and `t = 1`
    /// to where the frame begins and ends along it instead of to the endpoints themselves.
    pub fn clipped_to_frame(mut self) -> Self {
        self.clip_to_frame = true;
        self
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn start(&self) -> UnitPoint {
        self.start
    }

    pub fn end(&self) -> UnitPoint {
        self.end
    }

    pub fn is_clipped_to_frame(&self) -> bool {
        self.clip_to_frame
    }

    /// Color at gradient parameter `t` (clamped to `[0, 1]`), interpolated in straight sRGB.
    pub fn color_at(&self, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let Some((first, rest)) = self.stops.split_first() else {
            return Color::rgba(0.0, 0.0, 0.0, 0.0);
        };
        if t <= first.offset {
            return first.color;
        }
        let mut prev = *first;
        for &next in rest {
            if t <= next.offset {
                let span = next.offset - prev.offset;
                if span <= 0.0 {
                    return next.color;
                }
                return prev.color.lerp(next.color, (t - prev.offset) / span);
            }
            prev = next;
        }
        prev.color
    }
}

/// Frosted translucent panel covering the full frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialLayer {
    pub tint: Color,
    pub blur_sigma_px: f64,
}

/// Borrowed view of one layer, in painting order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layer<'a> {
    Fill(&'a LinearGradientLayer),
    Material(&'a MaterialLayer),
}

/// Immutable back-to-front layer list: one gradient fill plus an optional material overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerStack {
    base: LinearGradientLayer,
    overlay: Option<MaterialLayer>,
}

impl LayerStack {
    pub fn base(&self) -> &LinearGradientLayer {
        &self.base
    }

    pub fn overlay(&self) -> Option<&MaterialLayer> {
        self.overlay.as_ref()
    }

    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        std::iter::once(Layer::Fill(&self.base)).chain(self.overlay.iter().map(Layer::Material))
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.overlay.is_some())
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// `base` mixed [`DEEPEN_RATIO`] of the way toward the scheme's target in OKLab.
pub fn deepened(base: Color, scheme: ColorScheme) -> Color {
    mix_perceptual(base, scheme.deepen_target().with_opacity(base.a), DEEPEN_RATIO)
}

/// Stops spaced evenly over `[0, 1]`.
pub fn evenly_spaced(colors: &[Color]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, &color)| GradientStop {
            offset: i as f64 / last,
            color,
        })
        .collect()
}

#[tracing::instrument(skip(spec), fields(mode = spec.mode_name()))]
pub fn compose(
    spec: &BackgroundSpec,
    scheme: ColorScheme,
    material_overlay: bool,
) -> BackdropResult<LayerStack> {
    let base = match spec {
        BackgroundSpec::Perceptual { base_color } => {
            let base_color = base_color.validated()?;
            let top = base_color.with_opacity(base_color.a * PERCEPTUAL_TOP_OPACITY);
            let deep = deepened(base_color, scheme);
            let bottom = deep.with_opacity(base_color.a * PERCEPTUAL_BOTTOM_OPACITY);
            LinearGradientLayer::new(
                evenly_spaced(&[top, bottom]),
                UnitPoint::TOP,
                UnitPoint::BOTTOM,
            )?
        }
        BackgroundSpec::LinearGradient { stops, direction } => {
            if stops.len() < 2 {
                return Err(BackdropError::invalid_request(format!(
                    "linear gradient needs at least 2 stops, got {}",
                    stops.len()
                )));
            }
            let colors = stops
                .iter()
                .map(|c| c.validated())
                .collect::<BackdropResult<Vec<_>>>()?;
            let (start, end) = direction.resolve();
            let layer = LinearGradientLayer::new(evenly_spaced(&colors), start, end)?;
            match direction {
                GradientDirection::Angle(_) => layer.clipped_to_frame(),
                _ => layer,
            }
        }
    };

    let overlay = material_overlay.then(|| MaterialLayer {
        tint: scheme.material_tint(),
        blur_sigma_px: MATERIAL_BLUR_SIGMA_PX,
    });

    tracing::debug!(stops = base.stops.len(), overlay = overlay.is_some(), "composed layers");
    Ok(LayerStack { base, overlay })
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;
