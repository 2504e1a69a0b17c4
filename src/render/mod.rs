/// Pixel buffer and the rasterizer seam.
pub mod backend;
pub(crate) mod composite;
/// Software rasterizer.
pub mod cpu;
pub(crate) mod ramp;
