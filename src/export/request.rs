use std::path::{Path, PathBuf};

use crate::compose::{BackgroundSpec, ColorScheme};
use crate::encode::format::OutputFormat;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Everything needed to render one background, independent of where it is saved.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub background: BackgroundSpec,
    #[serde(default = "default_overlay")]
    pub add_material_overlay: bool,
}

fn default_overlay() -> bool {
    true
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            width: 1170,
            height: 2532,
            color_scheme: ColorScheme::Light,
            background: BackgroundSpec::default(),
            add_material_overlay: true,
        }
    }
}

impl RenderRequest {
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Same request with width and height exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            ..self.clone()
        }
    }

    /// `Wallpaper_{w}x{h}.{ext}`
    pub fn default_file_name(&self, format: OutputFormat) -> String {
        format!(
            "Wallpaper_{}x{}.{}",
            self.width,
            self.height,
            format.extension()
        )
    }
}

/// One entry of a batch file: a request plus where and how to save it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub request: RenderRequest,
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    /// Overrides the configured lossy quality.
    #[serde(default)]
    pub quality: Option<f64>,
    /// File path, or an existing directory to place the default file name in.
    pub out: PathBuf,
}

fn default_format() -> OutputFormat {
    OutputFormat::Png
}

impl ExportJob {
    /// Parse a JSON array of jobs.
    pub fn list_from_reader<R: std::io::Read>(r: R) -> BackdropResult<Vec<Self>> {
        serde_json::from_reader(r)
            .map_err(|e| BackdropError::invalid_request(format!("parse export jobs JSON: {e}")))
    }

    pub fn list_from_path(path: impl AsRef<Path>) -> BackdropResult<Vec<Self>> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            BackdropError::invalid_request(format!(
                "open export jobs JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::list_from_reader(std::io::BufReader::new(f))
    }
}
