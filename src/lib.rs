//! Backdrop renders procedural background images and exports them as image files.
//!
//! A [`RenderRequest`] describes the canvas size, color scheme and background style. An
//! [`ExportSession`] runs it through four stages:
//!
//! - [`compose`] the style into a [`LayerStack`]
//! - rasterize the stack with a [`RasterBackend`] (by default [`CpuRasterizer`])
//! - encode the [`PixelBuffer`] with an [`ImageEncoder`]
//! - save the bytes atomically to disk
//!
//! Every stage is also usable on its own.
#![forbid(unsafe_code)]

mod foundation;

/// Color values and perceptual blending.
pub mod color;
/// Background styles and the layers they compose into.
pub mod compose;
/// Gradient direction presets and angles.
pub mod direction;
/// Output formats, encoders and file saving.
pub mod encode;
/// The export state machine and its configuration.
pub mod export;
/// Named device sizes.
pub mod presets;
/// Rasterization backends.
pub mod render;

pub use crate::foundation::core::{Canvas, DimensionBounds, Point, UnitPoint, Vec2};
pub use crate::foundation::error::{BackdropError, BackdropResult, ErrorKind};

pub use crate::color::Color;
pub use crate::compose::{
    BackgroundSpec, ColorScheme, GradientStop, Layer, LayerStack, LinearGradientLayer,
    MaterialLayer, compose,
};
pub use crate::direction::{Compass, GradientDirection};
pub use crate::encode::codec::{DefaultEncoder, EncodeOptions, ImageEncoder, encode};
pub use crate::encode::format::OutputFormat;
pub use crate::encode::save::save;
pub use crate::export::config::ExportConfig;
pub use crate::export::request::{ExportJob, RenderRequest};
pub use crate::export::session::{ExportSession, ExportState};
pub use crate::presets::{DevicePreset, PRESETS, find_preset};
pub use crate::render::backend::{PixelBuffer, RasterBackend};
pub use crate::render::cpu::{CpuRasterizer, CpuRasterizerOpts, rasterize};
