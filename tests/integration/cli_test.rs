//! Command-line parsing and end-to-end command runs on a model written to disk

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use modulith::{
    cli::{
        args::{Depth, OutputFormat},
        commands::{self, with_modules},
        Args, Command,
    },
    config::{self, CliArgs},
    error::ModulithError,
    models::{config::OutputFormat as SettingsFormat, DependencyDepth, Settings},
    parsers::ClassModelLoader,
};

use crate::fixtures::sample_app::{self, ROOT_PACKAGE, ROOT_TYPE};

fn settings_for(model_path: PathBuf) -> Settings {
    Settings {
        model_path,
        root_package: Some(ROOT_PACKAGE.to_string()),
        show_progress: false,
        use_colors: false,
        ..Default::default()
    }
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["modulith"]);
    assert_eq!(args.model, None);
    assert!(args.exclude.is_empty());
    assert_eq!(args.output, None);
    assert!(matches!(args.depth, Depth::Immediate));
    assert!(!args.describe);
    assert!(!args.quiet);

    let args = Args::parse_from([
        "modulith",
        "--model",
        "build/model",
        "--root",
        ROOT_TYPE,
        "--exclude",
        "*.tmp.json",
        "--output",
        "json",
        "--output-file",
        "report.json",
        "--no-fail",
        "--threads",
        "2",
    ]);

    assert_eq!(args.model, Some(PathBuf::from("build/model")));
    assert_eq!(args.root.as_deref(), Some(ROOT_TYPE));
    assert_eq!(args.exclude, vec!["*.tmp.json".to_string()]);
    assert!(matches!(args.output, Some(OutputFormat::Json)));
    assert_eq!(args.output_file, Some(PathBuf::from("report.json")));
    assert!(args.no_fail);
    assert_eq!(args.threads, Some(2));
}

#[test]
fn test_conflicting_arguments_are_rejected() {
    assert!(Args::try_parse_from(["modulith", "--root", ROOT_TYPE, "--root-package", ROOT_PACKAGE]).is_err());
    assert!(Args::try_parse_from(["modulith", "--quiet", "--verbose"]).is_err());
    assert!(Args::try_parse_from(["modulith", "--describe", "--dependencies", "moduleA"]).is_err());
}

#[test]
fn test_command_line_builds_settings() {
    let dir = tempdir().unwrap();
    let model_path = sample_app::write_model(dir.path());
    let config_path = dir.path().join("modulith.toml");
    fs::write(
        &config_path,
        format!(
            "root_package = \"{}\"\noutput_format = \"csv\"\n\n[modules.moduleA]\ndisplay_name = \"Alpha\"\n",
            ROOT_PACKAGE
        ),
    )
    .unwrap();

    let args = Args::parse_from([
        "modulith",
        "--config",
        config_path.to_str().unwrap(),
        "--model",
        model_path.to_str().unwrap(),
        "--output",
        "json",
    ]);

    let settings = config::load_config_with_env_prefix(CliArgs::from(&args), "MODULITH_CLI_TEST").unwrap();

    assert_eq!(settings.model_path, model_path);
    assert_eq!(settings.root_package.as_deref(), Some(ROOT_PACKAGE));
    assert_eq!(settings.output_format, SettingsFormat::Json);
    assert_eq!(settings.modules["moduleA"].display_name.as_deref(), Some("Alpha"));
}

#[test]
fn test_loads_split_model_directory() {
    let dir = tempdir().unwrap();
    let model_dir = sample_app::write_split_model(dir.path());

    let model = ClassModelLoader::new().load(&model_dir).unwrap();
    assert_eq!(model.len(), sample_app::types().len());

    let settings = settings_for(model_dir);
    let count = with_modules(&settings, |modules| Ok(modules.len())).unwrap();
    assert_eq!(count, 6);
}

#[test]
fn test_excluded_model_files_are_skipped() {
    let dir = tempdir().unwrap();
    let model_dir = sample_app::write_split_model(dir.path());

    let loader = ClassModelLoader::with_exclude_patterns(&["type-*.json".to_string()]).unwrap();
    let model = loader.load(&model_dir).unwrap();

    assert!(model.is_empty());
}

#[test]
fn test_verify_writes_report_and_fails_on_violations() {
    let dir = tempdir().unwrap();
    let model_path = sample_app::write_model(dir.path());
    let output = dir.path().join("report.json");

    let settings = Settings {
        output_format: SettingsFormat::Json,
        output_file: Some(output.clone()),
        ..settings_for(model_path)
    };

    match commands::verify(&settings) {
        Err(ModulithError::Violations(violations)) => assert_eq!(violations.len(), 4),
        other => panic!("expected violations, got {:?}", other),
    }

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["root_package"], ROOT_PACKAGE);
    assert_eq!(report["violations"].as_array().unwrap().len(), 4);
    assert_eq!(report["violations"][0]["origin_module"], "invalid");
    assert_eq!(report["cycles"][0][0], "cycleA");
}

#[test]
fn test_verify_without_failing() {
    let dir = tempdir().unwrap();
    let model_path = sample_app::write_model(dir.path());
    let output = dir.path().join("report.txt");

    let settings = Settings {
        fail_on_violation: false,
        output_file: Some(output.clone()),
        ..settings_for(model_path)
    };

    commands::verify(&settings).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Module Verification Summary"));
    assert!(text.contains("Violations: 4"));
    assert!(text.contains("cycleA <-> cycleB"));
}

#[test]
fn test_verify_by_root_type() {
    let dir = tempdir().unwrap();
    let model_path = sample_app::write_model(dir.path());

    let settings = Settings {
        root: Some(ROOT_TYPE.to_string()),
        root_package: None,
        ..settings_for(model_path)
    };

    let root = with_modules(&settings, |modules| Ok(modules.root_package().to_string())).unwrap();
    assert_eq!(root, ROOT_PACKAGE);
}

#[test]
fn test_unknown_root_is_critical() {
    let dir = tempdir().unwrap();
    let model_path = sample_app::write_model(dir.path());

    let settings = Settings {
        root_package: Some("org.unknown".to_string()),
        ..settings_for(model_path)
    };

    let err = commands::verify(&settings).unwrap_err();
    assert!(matches!(err, ModulithError::RootNotFound { .. }));
    assert!(err.is_critical());
}

#[test]
fn test_dependencies_command_selection() {
    let args = Args::parse_from(["modulith", "--dependencies", "cycleA", "--depth", "all"]);

    match Command::from_args(args) {
        Command::Dependencies { module, depth, .. } => {
            assert_eq!(module, "cycleA");
            assert_eq!(depth, DependencyDepth::All);
        }
        other => panic!("unexpected command {:?}", other),
    }
}
