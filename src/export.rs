//! Saving the current figure in several formats
//!
//! Files land at `<directory>/<filename>.<extension>`, one per extension, in
//! the order given. The first failure stops the loop; files already written
//! for earlier extensions stay on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{FigureError, Warning};
use crate::renderer::{RenderError, Renderer};
use crate::style::StyleState;

/// Default output directory
pub const DEFAULT_DIRECTORY: &str = "img";

/// Default output extensions
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["pgf", "png"];

/// What to save and where
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Base file name without extension
    pub filename: String,
    pub directory: PathBuf,
    /// Extensions without the leading dot
    pub extensions: Vec<String>,
    /// Create the directory (and parents) if missing
    pub create_missing_directory: bool,
    /// Set when called from a figure session; only changes log output
    pub from_session: bool,
}

impl ExportRequest {
    /// Request with default directory and extensions
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            create_missing_directory: true,
            from_session: false,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_extensions<S: Into<String>>(
        mut self,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mkdir(mut self, create: bool) -> Self {
        self.create_missing_directory = create;
        self
    }

    pub fn in_session(mut self, from_session: bool) -> Self {
        self.from_session = from_session;
        self
    }

    /// Target path for one extension
    pub fn path_for(&self, extension: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", self.filename, extension))
    }
}

/// Outcome of a successful export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    /// Files written, in extension order
    pub written: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

/// Save the renderer's current figure for every requested extension
pub fn export<R: Renderer + ?Sized>(
    renderer: &mut R,
    style: &StyleState,
    request: &ExportRequest,
) -> Result<ExportReport, FigureError> {
    if request.filename.is_empty() {
        log::error!("Cannot save a figure without a filename");
        return Err(FigureError::EmptyFilename);
    }

    let mut report = ExportReport::default();
    let directory = request.directory.as_path();

    if !request.from_session {
        log::info!("Saving {}...", request.filename);
    }

    match renderer.tight_layout(0.0) {
        Ok(()) => {}
        Err(RenderError::NoFigure) => {
            log::warn!("{}", Warning::NoFigure);
            report.warnings.push(Warning::NoFigure);
        }
        Err(e) => {
            log::error!("Layout failed before saving {}: {}", request.filename, e);
            return Err(FigureError::Render {
                path: directory.to_path_buf(),
                source: e,
            });
        }
    }

    if request.create_missing_directory {
        prepare_directory(directory)?;
    }

    for extension in &request.extensions {
        if request.from_session {
            log::info!("  Saving {}...", extension);
        }
        let path = request.path_for(extension);
        renderer
            .save(&path, extension, style)
            .map_err(|e| classify_write_error(e, request, extension))?;
        report.written.push(path);
    }

    Ok(report)
}

fn prepare_directory(directory: &Path) -> Result<(), FigureError> {
    if directory.is_file() {
        log::error!("Directory set to file: {}", directory.display());
        return Err(FigureError::DirectoryIsFile {
            path: directory.to_path_buf(),
        });
    }

    std::fs::create_dir_all(directory).map_err(|e| {
        if e.kind() == ErrorKind::PermissionDenied {
            log::error!("Permission denied for directory: {:?}", directory.display().to_string());
            FigureError::PermissionDenied {
                path: directory.to_path_buf(),
                file: None,
            }
        } else {
            log::error!("Could not create directory {}: {}", directory.display(), e);
            FigureError::Io {
                path: directory.to_path_buf(),
                source: e,
            }
        }
    })
}

fn classify_write_error(
    error: RenderError,
    request: &ExportRequest,
    extension: &str,
) -> FigureError {
    let directory = &request.directory;
    let file = format!("{}.{}", request.filename, extension);

    match error {
        RenderError::UnsupportedFormat(_) => {
            log::error!("Unsupported file format: {}", extension);
            FigureError::unsupported_format(extension)
        }
        RenderError::Io(e) if e.kind() == ErrorKind::NotFound => {
            log::error!(
                "Directory does not exist: {:?}. Please create it or enable directory creation.",
                directory.display().to_string()
            );
            FigureError::DirectoryNotFound {
                path: directory.clone(),
            }
        }
        RenderError::Io(e) if e.kind() == ErrorKind::PermissionDenied => {
            log::error!(
                "Permission denied for file ({:?}) in directory: {:?}",
                file,
                directory.display().to_string()
            );
            FigureError::PermissionDenied {
                path: directory.clone(),
                file: Some(file),
            }
        }
        other => {
            let path = request.path_for(extension);
            log::error!("Failed to save {} as {}: {}", path.display(), extension, other);
            FigureError::Render { path, source: other }
        }
    }
}
