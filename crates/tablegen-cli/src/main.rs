//! `tablegen` command-line driver.
//!
//! Exit status: 0 on success, 1 on any schema, config or I/O failure, 2 when
//! `--check` finds generated files out of date.

mod args;

use args::Cli;
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};
use tablegen_build::{
    CheckWriter, CompileError, CompileReport, DirWriter, EmitOptions, InvalidRuntimeCrate, compile_to,
};
use tablegen_config::{ConfigError, TablegenConfig, load_schema};
use thiserror::Error as ThisError;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_FAILURE: u8 = 1;
const EXIT_STALE: u8 = 2;

///
/// CliError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
enum CliError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidRuntimeCrate(#[from] InvalidRuntimeCrate),

    #[error("no {0} given; pass --{0} or set it in tablegen.toml")]
    Missing(&'static str),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(report) if report.is_stale() => {
            for path in &report.stale {
                eprintln!("stale: {}", path.display());
            }
            eprintln!("generated files are out of date; rerun tablegen without --check");
            ExitCode::from(EXIT_STALE)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(CliError::Compile(CompileError::Schema(errs))) => {
            error!(count = errs.len(), "schema validation failed");
            for err in &errs {
                eprintln!("error: {err}");
            }
            ExitCode::from(EXIT_FAILURE)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

// init_tracing
// RUST_LOG wins; otherwise info and above, on stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<CompileReport, CliError> {
    let config = match &cli.config {
        Some(path) => TablegenConfig::load(path)?,
        None => TablegenConfig::discover(Path::new("."))?,
    };
    let settings = Settings::resolve(cli, config)?;
    debug!(?settings, "resolved settings");

    let raw = load_schema(&settings.schema)?;
    info!(
        schema = %settings.schema.display(),
        tables = raw.tables.len(),
        enums = raw.enums.len(),
        "loaded schema"
    );

    let report = if cli.check {
        let mut writer = CheckWriter::new(&settings.out_dir);
        compile_to(&raw, &settings.options, &mut writer)?
    } else {
        let mut writer = DirWriter::new(&settings.out_dir);
        compile_to(&raw, &settings.options, &mut writer)?
    };

    Ok(report)
}

///
/// Settings
/// command-line flags layered over the config file
///

#[derive(Debug)]
struct Settings {
    schema: PathBuf,
    out_dir: PathBuf,
    options: EmitOptions,
}

impl Settings {
    fn resolve(cli: &Cli, config: TablegenConfig) -> Result<Self, CliError> {
        let schema = cli
            .schema
            .clone()
            .or(config.schema)
            .ok_or(CliError::Missing("schema"))?;
        let out_dir = cli
            .out_dir
            .clone()
            .or(config.out_dir)
            .ok_or(CliError::Missing("out-dir"))?;

        let options = EmitOptions::with_runtime_crate(&config.codegen.runtime_crate)?;

        Ok(Self {
            schema,
            out_dir,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SCHEMA: &str = r#"{
        "tables": {
            "Table1": {
                "primaryKeys": { "k1": "uint256" },
                "schema": { "v1": "bool", "v2": "Enum1" }
            }
        },
        "enums": { "Enum1": ["E1", "E2", "E3"] }
    }"#;

    fn cli(dir: &Path, check: bool) -> Cli {
        Cli {
            config: None,
            schema: Some(dir.join("schema.json")),
            out_dir: Some(dir.join("out")),
            check,
        }
    }

    #[test]
    fn flags_override_config_values() {
        let config = TablegenConfig {
            schema: Some(PathBuf::from("from-config.json")),
            out_dir: Some(PathBuf::from("config-out")),
            ..TablegenConfig::default()
        };
        let cli = Cli {
            config: None,
            schema: Some(PathBuf::from("from-flag.json")),
            out_dir: None,
            check: false,
        };

        let settings = Settings::resolve(&cli, config).expect("resolves");

        assert_eq!(settings.schema, PathBuf::from("from-flag.json"));
        assert_eq!(settings.out_dir, PathBuf::from("config-out"));
    }

    #[test]
    fn missing_schema_is_reported() {
        let cli = Cli {
            config: None,
            schema: None,
            out_dir: Some(PathBuf::from("out")),
            check: false,
        };

        let err = Settings::resolve(&cli, TablegenConfig::default()).expect_err("no schema");
        assert!(matches!(err, CliError::Missing("schema")));
    }

    #[test]
    fn check_mode_detects_stale_output() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("schema.json"), SCHEMA).expect("write schema");

        let before = run(&cli(dir.path(), true)).expect("check runs");
        assert!(before.is_stale());
        assert!(!dir.path().join("out").exists());

        let written = run(&cli(dir.path(), false)).expect("generate runs");
        assert_eq!(written.written.len(), 3);

        let after = run(&cli(dir.path(), true)).expect("check runs");
        assert!(!after.is_stale());
    }
}
