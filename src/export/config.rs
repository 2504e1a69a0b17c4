use crate::encode::codec::DEFAULT_QUALITY;
use crate::foundation::core::DimensionBounds;
use crate::render::cpu::CpuRasterizerOpts;

/// Set to `1` or `true` when running inside a non-interactive preview/sandbox.
pub const PREVIEW_MODE_ENV: &str = "BACKDROP_PREVIEW_MODE";
/// Positive worker count for the rasterizer pool.
pub const THREADS_ENV: &str = "BACKDROP_THREADS";

/// Exporter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportConfig {
    /// When set, every export is refused before any rendering or I/O.
    pub preview_mode: bool,
    pub bounds: DimensionBounds,
    /// Default lossy quality in `(0, 1]`.
    pub quality: f64,
    pub raster: CpuRasterizerOpts,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            preview_mode: false,
            bounds: DimensionBounds::DEFAULT,
            quality: DEFAULT_QUALITY,
            raster: CpuRasterizerOpts::default(),
        }
    }
}

impl ExportConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup(key)`; unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup(PREVIEW_MODE_ENV) {
            match parse_flag(&v) {
                Some(flag) => cfg.preview_mode = flag,
                None => tracing::warn!(key = PREVIEW_MODE_ENV, value = %v, "ignoring invalid flag"),
            }
        }

        if let Some(v) = lookup(THREADS_ENV) {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.raster.threads = Some(n),
                _ => tracing::warn!(key = THREADS_ENV, value = %v, "ignoring invalid thread count"),
            }
        }

        cfg
    }

    pub fn with_preview_mode(mut self, preview_mode: bool) -> Self {
        self.preview_mode = preview_mode;
        self
    }

    pub fn with_bounds(mut self, bounds: DimensionBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_raster(mut self, raster: CpuRasterizerOpts) -> Self {
        self.raster = raster;
        self
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
