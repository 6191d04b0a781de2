//! Integration tests for multi-format export

mod common;

#[cfg(unix)]
use std::fs::Permissions;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
#[cfg(unix)]
use std::path::Path;

use pretty_assertions::assert_eq;

use common::{Call, RecordingRenderer};
use texfigure::{export, Canvas, ExportRequest, FigureError, StyleState, Warning};

#[test]
fn test_writes_every_extension_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::with_figure();
    let style = StyleState::default();
    let request = ExportRequest::new("plot")
        .with_directory(dir.path())
        .with_extensions(["pgf", "png", "svg"]);

    let report = export(&mut renderer, &style, &request).unwrap();

    let expected: Vec<_> = ["pgf", "png", "svg"]
        .iter()
        .map(|ext| dir.path().join(format!("plot.{}", ext)))
        .collect();
    assert_eq!(report.written, expected);
    assert_eq!(renderer.saves(), expected);
    assert_eq!(renderer.calls[0], Call::TightLayout(0.0));
    assert!(report.warnings.is_empty());
    for path in &expected {
        assert!(path.is_file());
    }
}

#[test]
fn test_missing_directory_without_mkdir() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missingdir");
    let mut renderer = RecordingRenderer::with_figure();

    let err = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(&missing)
            .with_mkdir(false),
    )
    .unwrap_err();

    match err {
        FigureError::DirectoryNotFound { path } => assert_eq!(path, missing),
        other => panic!("expected DirectoryNotFound, got {:?}", other),
    }
    // Stopped at the first extension
    assert_eq!(renderer.saves().len(), 1);
    assert!(!missing.exists());
}

#[test]
fn test_missing_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut renderer = RecordingRenderer::with_figure();

    let report = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(&nested)
            .with_extensions(["pgf"]),
    )
    .unwrap();

    assert!(nested.is_dir());
    assert_eq!(report.written, vec![nested.join("f.pgf")]);
}

#[test]
fn test_directory_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir");
    std::fs::write(&file, "x").unwrap();
    let mut renderer = RecordingRenderer::with_figure();

    let err = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f").with_directory(&file),
    )
    .unwrap_err();

    assert!(matches!(err, FigureError::DirectoryIsFile { ref path } if *path == file));
    assert!(renderer.saves().is_empty());
}

#[test]
fn test_unsupported_extension_keeps_earlier_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new();
    canvas.figure_mut().plot(&[0.0, 1.0], &[1.0, 2.0]);

    let err = export(
        &mut canvas,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(["pgf", "bogusext", "png"]),
    )
    .unwrap_err();

    match err {
        FigureError::UnsupportedFormat { extension } => assert_eq!(extension, "bogusext"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
    assert!(dir.path().join("f.pgf").is_file());
    assert!(!dir.path().join("f.bogusext").exists());
    assert!(!dir.path().join("f.png").exists());
}

#[test]
fn test_empty_extensions_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::with_figure();

    let report = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(Vec::<String>::new()),
    )
    .unwrap();

    assert!(report.written.is_empty());
    assert_eq!(renderer.calls, vec![Call::TightLayout(0.0)]);
}

#[test]
fn test_no_figure_is_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::default();

    let report = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(["pgf"]),
    )
    .unwrap();

    assert_eq!(report.warnings, vec![Warning::NoFigure]);
    assert_eq!(report.written.len(), 1);
}

#[test]
fn test_empty_filename() {
    let mut renderer = RecordingRenderer::with_figure();
    let err = export(&mut renderer, &StyleState::default(), &ExportRequest::new("")).unwrap_err();
    assert!(matches!(err, FigureError::EmptyFilename));
    assert!(renderer.calls.is_empty());
}

#[test]
fn test_export_uses_live_style() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::with_figure();
    let mut style = StyleState::default();
    style.latexify().unwrap();

    export(
        &mut renderer,
        &style,
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(["pgf"]),
    )
    .unwrap();

    assert_eq!(renderer.saved_font_sizes, vec![Some(8.0)]);
    assert_eq!(renderer.saved_backends, vec!["pgf".to_string()]);
}

#[test]
fn test_reverted_backend_reaches_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::with_figure();
    let mut style = StyleState::default();
    style.latexify().unwrap();
    style.revert();

    export(
        &mut renderer,
        &style,
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(["pgf"]),
    )
    .unwrap();

    assert_eq!(renderer.saved_backends, vec!["agg".to_string()]);
}

#[test]
fn test_write_permission_denied_stops_loop() {
    let dir = tempfile::tempdir().unwrap();
    let mut renderer = RecordingRenderer::with_figure();
    renderer.deny_writes = true;

    let err = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(dir.path())
            .with_extensions(["pgf", "png"]),
    )
    .unwrap_err();

    match err {
        FigureError::PermissionDenied { path, file } => {
            assert_eq!(path, dir.path().to_path_buf());
            assert_eq!(file.as_deref(), Some("f.pgf"));
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert_eq!(renderer.saves(), vec![dir.path().join("f.pgf")]);
}

/// Make `path` read-only; returns false when the process can still write
/// there (running as root), in which case the caller skips.
#[cfg(unix)]
fn make_read_only(path: &Path) -> bool {
    std::fs::set_permissions(path, Permissions::from_mode(0o555)).unwrap();
    let check = path.join(".write_check");
    if std::fs::write(&check, b"").is_ok() {
        let _ = std::fs::remove_file(&check);
        restore_permissions(path);
        return false;
    }
    true
}

#[cfg(unix)]
fn restore_permissions(path: &Path) {
    std::fs::set_permissions(path, Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_permission_denied_creating_directory() {
    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    if !make_read_only(&locked) {
        return;
    }
    let target = locked.join("figs");
    let mut renderer = RecordingRenderer::with_figure();

    let result = export(
        &mut renderer,
        &StyleState::default(),
        &ExportRequest::new("f").with_directory(&target),
    );
    restore_permissions(&locked);

    match result.unwrap_err() {
        FigureError::PermissionDenied { path, file } => {
            assert_eq!(path, target);
            assert_eq!(file, None);
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert!(renderer.saves().is_empty());
    assert!(!target.exists());
}

#[cfg(unix)]
#[test]
fn test_permission_denied_writing_into_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    if !make_read_only(&locked) {
        return;
    }
    let mut canvas = Canvas::new();
    canvas.figure_mut().plot(&[0.0, 1.0], &[0.0, 1.0]);

    let result = export(
        &mut canvas,
        &StyleState::default(),
        &ExportRequest::new("f")
            .with_directory(&locked)
            .with_extensions(["pgf", "png"]),
    );
    restore_permissions(&locked);

    match result.unwrap_err() {
        FigureError::PermissionDenied { path, file } => {
            assert_eq!(path, locked);
            assert_eq!(file.as_deref(), Some("f.pgf"));
        }
        other => panic!("expected PermissionDenied, got {:?}", other),
    }
    assert!(!locked.join("f.png").exists());
}

#[test]
fn test_canvas_pgf_output_carries_latex_text() {
    let dir = tempfile::tempdir().unwrap();
    let mut canvas = Canvas::new();
    canvas.figure_mut().plot(&[0.0, 1.0], &[0.0, 1.0]);
    canvas.figure_mut().xlabel(r"$\theta$");
    let mut style = StyleState::default();
    style.latexify().unwrap();

    export(
        &mut canvas,
        &style,
        &ExportRequest::new("theta")
            .with_directory(dir.path())
            .with_extensions(["pgf"]),
    )
    .unwrap();

    let pgf = std::fs::read_to_string(dir.path().join("theta.pgf")).unwrap();
    assert!(pgf.contains(r"\selectfont $\theta$"));
    assert!(pgf.contains("%% Intended TeX system: xelatex"));
}
