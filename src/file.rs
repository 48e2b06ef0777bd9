// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::ReportSettings;
use crate::error::{ReportError, Result};

/// What `publish` left on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishSummary {
    pub document: PathBuf,
    pub stylesheet: PathBuf,
}

/// Write the rendered report and its stylesheet into the output directory.
///
/// The directory is created if missing and an existing report is overwritten.
/// Any failure here (write or copy) is returned; nothing already written is
/// cleaned up.
pub fn publish(document: &str, settings: &ReportSettings) -> Result<PublishSummary> {
    let outdir = settings.output_dir();
    ensure_directory(&outdir)?;

    let doc_path = write_document(&outdir.join(&settings.output_filename), document)?;
    let css_path = copy_stylesheet(&settings.css_source(), &outdir)?;

    Ok(PublishSummary { document: doc_path, stylesheet: css_path })
}

/// Create/truncate `path` and write `contents`.
pub fn write_document(path: &Path, contents: &str) -> Result<PathBuf> {
    fs::write(path, contents).map_err(|e| ReportError::io(path, e))?;
    log::debug!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Copy `source` into `dir`, keeping its file name.
pub fn copy_stylesheet(source: &Path, dir: &Path) -> Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        ReportError::Configuration(format!("stylesheet path has no file name: {}", source.display()))
    })?;
    let dest = dir.join(name);
    // Copying a file onto itself truncates it.
    if let (Ok(a), Ok(b)) = (source.canonicalize(), dest.canonicalize()) {
        if a == b {
            log::debug!("Stylesheet already in place: {}", dest.display());
            return Ok(dest);
        }
    }
    fs::copy(source, &dest).map_err(|e| ReportError::io(source, e))?;
    log::debug!("Copied {} -> {}", source.display(), dest.display());
    Ok(dest)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ReportError::io(
            dir,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;
        log::debug!("Created {}", dir.display());
    }
    Ok(())
}
