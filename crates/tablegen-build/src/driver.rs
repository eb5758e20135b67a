//! Compiler driver: validate, plan, emit, then write.
//!
//! Validation runs to completion before anything else happens, so a schema
//! with any defect never produces a partial artifact set.

use crate::{
    emit::{Artifact, EmitOptions, emit_enums, emit_index, emit_table},
    writer::{ArtifactWriter, WriteOutcome},
};
use std::{io, path::PathBuf};
use tablegen_schema::{
    doc::RawSchema,
    error::ErrorList,
    layout::plan,
    node::ValidatedSchema,
    validate::validate,
};
use thiserror::Error as ThisError;
use tracing::{debug, info};

///
/// CompileError
///

#[derive(Debug, ThisError)]
pub enum CompileError {
    #[error("schema is invalid:\n{0}")]
    Schema(ErrorList),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<ErrorList> for CompileError {
    fn from(errs: ErrorList) -> Self {
        Self::Schema(errs)
    }
}

impl From<CompileError> for io::Error {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Schema(errs) => Self::new(io::ErrorKind::InvalidData, errs.to_string()),
            CompileError::Write { source, .. } => source,
        }
    }
}

///
/// CompileReport
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileReport {
    pub tables: usize,
    pub enums: usize,
    pub written: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
    pub stale: Vec<PathBuf>,
}

impl CompileReport {
    #[must_use]
    pub fn artifact_count(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.stale.len()
    }

    #[must_use]
    pub fn is_stale(&self) -> bool {
        !self.stale.is_empty()
    }
}

/// Validate a raw document and emit every artifact, without any I/O.
pub fn compile(raw: &RawSchema, options: &EmitOptions) -> Result<Vec<Artifact>, ErrorList> {
    let schema = validate(raw)?;

    Ok(generate(&schema, options))
}

/// Emit artifacts for an already validated schema.
///
/// Order is fixed: tables in declaration order, then `enums.rs`, then `mod.rs`.
#[must_use]
pub fn generate(schema: &ValidatedSchema, options: &EmitOptions) -> Vec<Artifact> {
    let mut artifacts = Vec::with_capacity(schema.tables().len() + 2);

    for table in schema.tables() {
        let layout = plan(table);
        debug!(
            table = %table.name,
            key_width = layout.key_width(),
            static_data_width = layout.static_data_width(),
            dynamic_fields = layout.dynamic.len(),
            "planned layout"
        );

        artifacts.push(emit_table(table, &layout, options));
    }

    artifacts.push(emit_enums(schema, options));
    artifacts.push(emit_index(schema));

    artifacts
}

/// Validate, emit and hand every artifact to `writer` in order.
pub fn compile_to<W: ArtifactWriter>(
    raw: &RawSchema,
    options: &EmitOptions,
    writer: &mut W,
) -> Result<CompileReport, CompileError> {
    let schema = validate(raw)?;
    let artifacts = generate(&schema, options);

    let mut report = CompileReport {
        tables: schema.tables().len(),
        enums: schema.enums().len(),
        ..CompileReport::default()
    };

    for artifact in &artifacts {
        let outcome = writer.write(artifact).map_err(|source| CompileError::Write {
            path: artifact.path.clone(),
            source,
        })?;

        let path = artifact.path.clone();
        match outcome {
            WriteOutcome::Written => report.written.push(path),
            WriteOutcome::Unchanged => report.unchanged.push(path),
            WriteOutcome::Stale => report.stale.push(path),
        }
    }

    info!(
        tables = report.tables,
        enums = report.enums,
        written = report.written.len(),
        unchanged = report.unchanged.len(),
        stale = report.stale.len(),
        "tablegen finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{DirWriter, MemoryWriter};
    use std::path::Path;
    use tablegen_schema::{doc::RawTable, error::SchemaError};
    use tempfile::tempdir;

    fn example() -> RawSchema {
        RawSchema::new()
            .table(
                "Table1",
                RawTable::new()
                    .key("k1", "uint256")
                    .value("v1", "bool")
                    .value("v2", "Enum1"),
            )
            .enumeration("Enum1", ["E1", "E2", "E3"])
    }

    fn paths(artifacts: &[Artifact]) -> Vec<&Path> {
        artifacts.iter().map(|a| a.path.as_path()).collect()
    }

    #[test]
    fn artifacts_come_out_in_fixed_order() {
        let raw = example().table("Position", RawTable::new().key("id", "uint64").value("x", "int32"));
        let artifacts = compile(&raw, &EmitOptions::default()).expect("compiles");

        assert_eq!(
            paths(&artifacts),
            [
                Path::new("table1.rs"),
                Path::new("position.rs"),
                Path::new("enums.rs"),
                Path::new("mod.rs"),
            ]
        );
    }

    #[test]
    fn compile_is_deterministic() {
        let options = EmitOptions::default();

        assert_eq!(
            compile(&example(), &options).expect("compiles"),
            compile(&example(), &options).expect("compiles")
        );
    }

    #[test]
    fn runtime_crate_can_be_renamed() {
        let options = EmitOptions::with_runtime_crate("my_runtime").expect("valid path");
        let artifacts = compile(&example(), &options).expect("compiles");

        assert!(artifacts[0].contents.contains(":: my_runtime :: StaticCodec"));
        assert!(!artifacts[0].contents.contains("tablegen_runtime"));
        assert!(EmitOptions::with_runtime_crate("not a path").is_err());
    }

    #[test]
    fn invalid_schema_writes_nothing() {
        let raw = example().table(
            "Table2",
            RawTable::new().key("k1", "uint256").value("v2", "Enum9"),
        );

        let mut writer = MemoryWriter::new();
        let err = compile_to(&raw, &EmitOptions::default(), &mut writer).expect_err("must fail");

        let CompileError::Schema(errs) = err else {
            panic!("expected a schema error");
        };
        assert_eq!(
            errs.as_slice(),
            [SchemaError::UnknownType {
                table: "Table2".to_string(),
                field: "v2".to_string(),
                type_name: "Enum9".to_string(),
            }]
        );
        assert!(writer.is_empty());
    }

    #[test]
    fn rerunning_into_a_directory_changes_nothing() {
        let dir = tempdir().expect("tempdir");
        let options = EmitOptions::default();

        let mut writer = DirWriter::new(dir.path());
        let first = compile_to(&example(), &options, &mut writer).expect("first run");
        let second = compile_to(&example(), &options, &mut writer).expect("second run");

        assert_eq!(first.written.len(), 3);
        assert!(second.written.is_empty());
        assert_eq!(second.unchanged.len(), 3);
        assert!(dir.path().join("table1.rs").exists());
        assert_eq!((first.tables, first.enums), (1, 1));
    }
}
