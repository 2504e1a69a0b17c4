use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::encode::format::OutputFormat;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Append the format's canonical extension when `path` has none.
pub fn with_default_extension(path: &Path, format: OutputFormat) -> PathBuf {
    match path.extension() {
        Some(ext) if !ext.is_empty() => path.to_path_buf(),
        _ => path.with_extension(format.extension()),
    }
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling of `dest`, unique per call within this process.
fn temp_path(dest: &Path, file_name: &std::ffi::OsStr) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.{seq}.tmp", std::process::id()));
    dest.with_file_name(tmp_name)
}

/// Write `bytes` to `path` all-or-nothing and return the final path.
///
/// Bytes go to a hidden sibling temp file that is renamed over the destination once fully
/// flushed. On failure the temp file is removed and the destination is left untouched. The
/// parent directory must already exist.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn save(bytes: &[u8], path: &Path, format: OutputFormat) -> BackdropResult<PathBuf> {
    let dest = with_default_extension(path, format);
    let Some(file_name) = dest.file_name() else {
        return Err(BackdropError::write(
            dest.clone(),
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination has no file name",
            ),
        ));
    };

    let tmp = temp_path(&dest, file_name);

    let written = write_synced(&tmp, bytes).and_then(|()| fs::rename(&tmp, &dest));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp);
        tracing::warn!(path = %dest.display(), error = %source, "save failed");
        return Err(BackdropError::write(dest, source));
    }

    tracing::debug!(path = %dest.display(), "saved image");
    Ok(dest)
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create_new(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}
