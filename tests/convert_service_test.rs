//! Tests for ConvertService

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use outline2spec::application::services::{ConvertOptions, ConvertService};
use outline2spec::application::ApplicationError;
use outline2spec::config::Settings;
use outline2spec::domain::{DomainError, RenderTarget, Template};
use outline2spec::infrastructure::traits::{FileSystem, InputStream, RealFileSystem};
use outline2spec::util::testing;

/// In-memory filesystem keyed by path.
#[derive(Default)]
struct MemoryFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFs {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }

    fn content(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl FileSystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Filesystem whose writes always fail.
struct ReadOnlyFs;

impl FileSystem for ReadOnlyFs {
    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        Err(io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::PermissionDenied))
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Stdin stand-in returning fixed text.
struct FixedInput(String);

impl InputStream for FixedInput {
    fn read_all(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

fn service_with(settings: Settings, fs: Arc<dyn FileSystem>, stdin: &str) -> ConvertService {
    testing::init_test_setup();
    ConvertService::new(
        Arc::new(settings),
        fs,
        Arc::new(FixedInput(stdin.to_string())),
    )
}

fn service(settings: Settings) -> ConvertService {
    service_with(settings, Arc::new(MemoryFs::default()), "")
}

// ============================================================
// Conversion
// ============================================================

#[test]
fn given_default_settings_when_converting_then_renders_rspec() {
    // Arrange
    let service = service(Settings::default());

    // Act
    let result = service
        .convert("- d: a\n    - i: b", &ConvertOptions::default())
        .unwrap();

    // Assert
    assert_eq!(result.target, "rspec");
    assert_eq!(result.text, "describe 'a' do\n  xit 'b' do\n  end\nend");
    assert_eq!(result.attached, 2);
    assert_eq!(result.blocks, 2);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn given_target_option_when_converting_then_overrides_default_target() {
    let service = service(Settings::default());
    let options = ConvertOptions {
        target: Some("jest".into()),
        ..ConvertOptions::default()
    };

    let result = service.convert("- i: works", &options).unwrap();

    assert_eq!(result.target, "jest");
    assert_eq!(result.text, "it('works', () => {\n}");
}

#[test]
fn given_unknown_target_when_converting_then_lists_available_targets() {
    let service = service(Settings::default());
    let options = ConvertOptions {
        target: Some("pytest".into()),
        ..ConvertOptions::default()
    };

    let err = service.convert("- i: x", &options).unwrap_err();

    match err {
        ApplicationError::Domain(DomainError::UnknownTarget { name, available }) => {
            assert_eq!(name, "pytest");
            assert_eq!(available, vec!["jest".to_string(), "rspec".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn given_misaligned_outline_when_not_strict_then_converts_and_reports() {
    let service = service(Settings::default());

    let result = service
        .convert("- d: a\n  - i: b", &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.text, "describe 'a' do\nend\nxit 'b' do\nend");
    assert_eq!(result.diagnostics.len(), 1);
}

#[test]
fn given_strict_option_when_outline_has_diagnostics_then_fails() {
    let service = service(Settings::default());
    let options = ConvertOptions {
        strict: true,
        ..ConvertOptions::default()
    };

    let err = service.convert("- d: a\n  - i: b", &options).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::StrictViolation { count: 1, .. })
    ));
}

#[test]
fn given_strict_setting_when_outline_is_clean_then_converts() {
    let settings = Settings {
        strict: true,
        ..Settings::default()
    };
    let service = service(settings);

    let result = service.convert("- d: a\n    - i: b", &ConvertOptions::default());

    assert!(result.is_ok());
}

#[test]
fn given_strict_setting_when_outline_has_level_jump_then_fails() {
    let settings = Settings {
        strict: true,
        ..Settings::default()
    };
    let service = service(settings);

    let err = service
        .convert("- d: a\n            - i: deep", &ConvertOptions::default())
        .unwrap_err();

    assert!(err.to_string().contains("strict mode"));
}

#[test]
fn given_indent_settings_when_converting_then_input_and_output_widths_follow_them() {
    let settings = Settings {
        indent_unit: 2,
        render_indent: 4,
        ..Settings::default()
    };
    let service = service(settings);

    let result = service
        .convert("- d: a\n  - i: b", &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.text, "describe 'a' do\n    xit 'b' do\n    end\nend");
    assert!(result.diagnostics.is_empty());
}

#[test]
fn given_configured_target_when_converting_then_it_is_available_by_key() {
    let mocha = RenderTarget::new("", Template::new("// {body}"), "});")
        .with_symbol("i", Template::new("it('{body}', function () {"));
    let settings = Settings {
        default_target: "mocha".into(),
        targets: BTreeMap::from([("mocha".to_string(), mocha)]),
        ..Settings::default()
    };
    let service = service(settings);

    let result = service
        .convert("- i: works\nnote", &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.target, "mocha");
    assert_eq!(result.text, "it('works', function () {\n});\n// note");
    assert_eq!(
        service.catalog().names(),
        vec!["jest".to_string(), "mocha".to_string(), "rspec".to_string()]
    );
}

#[test]
fn given_configured_target_named_like_builtin_when_converting_then_replaces_builtin() {
    let custom = RenderTarget::new("", Template::new("# {body}"), "end")
        .with_symbol("i", Template::new("it '{body}' do"));
    let settings = Settings {
        targets: BTreeMap::from([("rspec".to_string(), custom)]),
        ..Settings::default()
    };
    let service = service(settings);

    let result = service
        .convert("- i: runs", &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.text, "it 'runs' do\nend");
}

// ============================================================
// Input and output
// ============================================================

#[test]
fn given_outline_file_when_converting_input_then_reads_from_filesystem() {
    let fs = Arc::new(MemoryFs::with_file("plan.outline", "- d: from file"));
    let service = service_with(Settings::default(), fs, "- d: from stdin");

    let result = service
        .convert_input(Some(Path::new("plan.outline")), &ConvertOptions::default())
        .unwrap();

    assert_eq!(result.text, "describe 'from file' do\nend");
}

#[test]
fn given_dash_or_no_input_when_reading_then_uses_stdin() {
    let fs = Arc::new(MemoryFs::with_file("-", "- d: not this"));
    let service = service_with(Settings::default(), fs, "- d: from stdin");

    assert_eq!(service.read_input(None).unwrap(), "- d: from stdin");
    assert_eq!(
        service.read_input(Some(Path::new("-"))).unwrap(),
        "- d: from stdin"
    );
}

#[test]
fn given_missing_input_file_when_reading_then_error_names_path() {
    let service = service(Settings::default());

    let err = service
        .read_input(Some(Path::new("missing.outline")))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("missing.outline"));
}

#[test]
fn given_rendered_text_when_writing_output_then_file_ends_with_newline() {
    let fs = Arc::new(MemoryFs::default());
    let service = service_with(Settings::default(), fs.clone(), "");

    service
        .write_output(Path::new("spec/plan_spec.rb"), "describe 'a' do\nend")
        .unwrap();

    assert_eq!(
        fs.content("spec/plan_spec.rb").as_deref(),
        Some("describe 'a' do\nend\n")
    );
}

#[test]
fn given_unwritable_output_when_writing_then_write_failed_names_path() {
    let service = service_with(Settings::default(), Arc::new(ReadOnlyFs), "");

    let err = service
        .write_output(Path::new("spec/plan_spec.rb"), "xit 'a' do\nend")
        .unwrap_err();

    match &err {
        ApplicationError::WriteFailed { path, source } => {
            assert_eq!(path, Path::new("spec/plan_spec.rb"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("spec/plan_spec.rb"));
}

#[test]
fn given_nested_output_path_when_writing_to_disk_then_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("spec").join("nested").join("plan_spec.rb");
    let service = service_with(Settings::default(), Arc::new(RealFileSystem), "");

    service.write_output(&out, "xit 'a' do\nend").unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "xit 'a' do\nend\n");
}

#[test]
fn given_zero_indent_unit_when_parsing_then_fails_with_domain_error() {
    let settings = Settings {
        indent_unit: 0,
        ..Settings::default()
    };
    let service = service(settings);

    let err = service.parse("- d: a").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidIndentUnit(0))
    ));
}

#[test]
fn given_outline_when_building_tree_view_then_lines_appear_under_root_label() {
    let service = service(Settings::default());

    let tree = service.tree("- d: a\n    - i: b").unwrap().to_string();

    assert!(tree.starts_with("(outline)"));
    assert!(tree.contains("[d] a"));
    assert!(tree.contains("[i] b"));
}
