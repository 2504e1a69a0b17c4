use super::*;
use crate::compose::LayerStack;
use crate::foundation::core::Canvas;
use crate::render::backend::PixelBuffer;

struct SolidRaster;

impl RasterBackend for SolidRaster {
    fn rasterize(&mut self, _layers: &LayerStack, canvas: Canvas) -> BackdropResult<PixelBuffer> {
        let len = (canvas.width * canvas.height * 4) as usize;
        PixelBuffer::from_rgba8(canvas.width, canvas.height, vec![200; len])
    }
}

struct FailingRaster;

impl RasterBackend for FailingRaster {
    fn rasterize(&mut self, _layers: &LayerStack, _canvas: Canvas) -> BackdropResult<PixelBuffer> {
        Err(BackdropError::render("boom"))
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "backdrop_session_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn small_request() -> RenderRequest {
    RenderRequest {
        width: 64,
        height: 96,
        ..RenderRequest::default()
    }
}

fn names(session: &ExportSession<impl RasterBackend, impl ImageEncoder>) -> Vec<&'static str> {
    session.history().iter().map(ExportState::name).collect()
}

#[test]
fn successful_export_walks_every_state() {
    let dir = temp_dir("walk");
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), SolidRaster, DefaultEncoder);
    let out = session
        .export(&small_request(), OutputFormat::Png, &dir.join("wall"))
        .unwrap();

    assert_eq!(out, dir.join("wall.png"));
    assert_eq!(
        names(&session),
        [
            "idle",
            "validating",
            "composing",
            "rasterizing",
            "encoding",
            "saved"
        ]
    );
    assert_eq!(session.state(), &ExportState::Saved(out));
}

#[test]
fn directory_destination_uses_default_file_name() {
    let dir = temp_dir("dir");
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), SolidRaster, DefaultEncoder);
    let out = session
        .export(&small_request(), OutputFormat::Jpeg, &dir)
        .unwrap();
    assert_eq!(out, dir.join("Wallpaper_64x96.jpg"));
    assert!(out.is_file());
}

#[test]
fn preview_mode_fails_during_validation() {
    let dir = temp_dir("preview");
    let cfg = ExportConfig::default().with_preview_mode(true);
    let mut session = ExportSession::with_backends(cfg, SolidRaster, DefaultEncoder);
    let err = session
        .export(&small_request(), OutputFormat::Png, &dir.join("x.png"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PreviewModeUnavailable);
    assert_eq!(names(&session), ["idle", "validating", "failed"]);
    assert!(!dir.join("x.png").exists());
    assert_eq!(
        session.state(),
        &ExportState::Failed {
            kind: ErrorKind::PreviewModeUnavailable,
            message: "File saving is not available in Preview.".to_string(),
        }
    );
}

#[test]
fn out_of_bounds_dimensions_fail_before_composing() {
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), SolidRaster, DefaultEncoder);
    let request = RenderRequest {
        width: 20_000,
        ..small_request()
    };
    let err = session
        .export(&request, OutputFormat::Png, Path::new("unused.png"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    assert_eq!(names(&session), ["idle", "validating", "failed"]);
}

#[test]
fn unsupported_format_and_bad_quality_fail_early() {
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), SolidRaster, DefaultEncoder);

    let err = session
        .export(&small_request(), OutputFormat::Heic, Path::new("unused"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert_eq!(names(&session), ["idle", "validating", "failed"]);

    let err = session
        .export_with_quality(&small_request(), OutputFormat::Jpeg, 1.5, Path::new("unused"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(names(&session), ["idle", "validating", "failed"]);
}

#[test]
fn raster_failure_is_reported_after_rasterizing() {
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), FailingRaster, DefaultEncoder);
    let err = session
        .export(&small_request(), OutputFormat::Png, Path::new("unused.png"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RenderFailure);
    assert_eq!(
        names(&session),
        ["idle", "validating", "composing", "rasterizing", "failed"]
    );
}

#[test]
fn job_quality_overrides_config() {
    let dir = temp_dir("job_quality");
    let mut session =
        ExportSession::with_backends(ExportConfig::default(), SolidRaster, DefaultEncoder);
    let job = ExportJob {
        request: small_request(),
        format: OutputFormat::Jpeg,
        quality: Some(0.0),
        out: dir.join("q"),
    };
    let err = session.export_job(&job).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);

    let job = ExportJob {
        quality: Some(0.5),
        ..job
    };
    assert_eq!(session.export_job(&job).unwrap(), dir.join("q.jpg"));
}
