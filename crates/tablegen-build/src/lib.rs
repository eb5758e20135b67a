//! Code generation for tablegen schemas.
//!
//! [`compile`] turns a raw schema document into source artifacts without
//! touching the filesystem; [`compile_to`] also hands them to an
//! [`ArtifactWriter`]. Build scripts normally go through [`build!`].

pub mod driver;
pub mod emit;
pub mod writer;

mod macros;

pub use driver::{CompileError, CompileReport, compile, compile_to, generate};
pub use emit::{Artifact, EmitOptions, InvalidRuntimeCrate};
pub use writer::{ArtifactWriter, CheckWriter, DirWriter, MemoryWriter, WriteOutcome};

use std::{io, path::Path};

/// Load `schema` and write every artifact into `out_dir`.
pub fn build_into(schema: &Path, out_dir: &Path, options: &EmitOptions) -> io::Result<CompileReport> {
    let raw = tablegen_config::load_schema(schema)?;
    let mut writer = DirWriter::new(out_dir);

    Ok(compile_to(&raw, options, &mut writer)?)
}
