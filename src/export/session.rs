use std::path::{Path, PathBuf};

use crate::compose::compose;
use crate::encode::codec::{DefaultEncoder, EncodeOptions, ImageEncoder};
use crate::encode::format::OutputFormat;
use crate::encode::save::save;
use crate::export::config::ExportConfig;
use crate::export::request::{ExportJob, RenderRequest};
use crate::foundation::error::{BackdropError, BackdropResult, ErrorKind};
use crate::render::backend::RasterBackend;
use crate::render::cpu::CpuRasterizer;

/// Observable progress of the most recent export.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportState {
    Idle,
    Validating,
    Composing,
    Rasterizing,
    Encoding,
    Saved(PathBuf),
    Failed { kind: ErrorKind, message: String },
}

impl ExportState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Composing => "composing",
            Self::Rasterizing => "rasterizing",
            Self::Encoding => "encoding",
            Self::Saved(_) => "saved",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved(_) | Self::Failed { .. })
    }
}

/// Runs render requests through compose, rasterize, encode and save.
///
/// `export` takes `&mut self`, so a session handles one export at a time. Use one session per
/// thread to export concurrently.
pub struct ExportSession<R = CpuRasterizer, E = DefaultEncoder> {
    config: ExportConfig,
    raster: R,
    encoder: E,
    state: ExportState,
    history: Vec<ExportState>,
}

impl ExportSession {
    /// Session with the CPU rasterizer and the default encoder.
    pub fn new(config: ExportConfig) -> BackdropResult<Self> {
        let raster = CpuRasterizer::new(config.raster)?;
        Ok(Self::with_backends(config, raster, DefaultEncoder))
    }
}

impl<R: RasterBackend, E: ImageEncoder> ExportSession<R, E> {
    pub fn with_backends(config: ExportConfig, raster: R, encoder: E) -> Self {
        Self {
            config,
            raster,
            encoder,
            state: ExportState::Idle,
            history: vec![ExportState::Idle],
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// States visited by the most recent export, starting at `Idle`.
    pub fn history(&self) -> &[ExportState] {
        &self.history
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Render `request` and save it as `format` at `dest`.
    ///
    /// If `dest` is an existing directory the file is named by
    /// [`RenderRequest::default_file_name`]. A missing extension is appended. Returns the path
    /// actually written.
    pub fn export(
        &mut self,
        request: &RenderRequest,
        format: OutputFormat,
        dest: &Path,
    ) -> BackdropResult<PathBuf> {
        self.export_with_quality(request, format, self.config.quality, dest)
    }

    /// Like [`ExportSession::export`], with the job's quality override applied.
    pub fn export_job(&mut self, job: &ExportJob) -> BackdropResult<PathBuf> {
        let quality = job.quality.unwrap_or(self.config.quality);
        self.export_with_quality(&job.request, job.format, quality, &job.out)
    }

    #[tracing::instrument(
        skip(self, request),
        fields(width = request.width, height = request.height, %format)
    )]
    pub fn export_with_quality(
        &mut self,
        request: &RenderRequest,
        format: OutputFormat,
        quality: f64,
        dest: &Path,
    ) -> BackdropResult<PathBuf> {
        self.history.clear();
        self.transition(ExportState::Idle);

        match self.run(request, format, quality, dest) {
            Ok(path) => {
                self.transition(ExportState::Saved(path.clone()));
                tracing::info!(path = %path.display(), "export finished");
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), error = %err, "export failed");
                self.transition(ExportState::Failed {
                    kind: err.kind(),
                    message: err.user_message(),
                });
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        request: &RenderRequest,
        format: OutputFormat,
        quality: f64,
        dest: &Path,
    ) -> BackdropResult<PathBuf> {
        self.transition(ExportState::Validating);
        if self.config.preview_mode {
            return Err(BackdropError::PreviewModeUnavailable);
        }
        let canvas = request.canvas();
        self.config.bounds.check(canvas)?;
        if !format.is_encodable() {
            return Err(BackdropError::UnsupportedFormat(format));
        }
        let opts = EncodeOptions::default()
            .with_quality(quality)
            .with_matte(request.color_scheme.matte());
        if format.is_lossy() {
            opts.jpeg_quality()?;
        }

        self.transition(ExportState::Composing);
        let layers = compose(
            &request.background,
            request.color_scheme,
            request.add_material_overlay,
        )?;

        self.transition(ExportState::Rasterizing);
        let buffer = self.raster.rasterize(&layers, canvas)?;

        self.transition(ExportState::Encoding);
        let bytes = self.encoder.encode(buffer, format, &opts)?;

        let target = resolve_destination(dest, request, format);
        save(&bytes, &target, format)
    }

    fn transition(&mut self, next: ExportState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "export state");
        self.history.push(next.clone());
        self.state = next;
    }
}

fn resolve_destination(dest: &Path, request: &RenderRequest, format: OutputFormat) -> PathBuf {
    if dest.is_dir() {
        dest.join(request.default_file_name(format))
    } else {
        dest.to_path_buf()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/session.rs"]
mod tests;
