//! Source emission.
//!
//! Everything here is pure: a validated schema and its layouts go in, artifact
//! text comes out. Output depends only on the input, so regenerating from an
//! unchanged schema reproduces the same bytes.

mod enums;
mod index;
mod table;
mod ty;

pub use enums::{emit_enum, emit_enums};
pub use index::{INDEX_ARTIFACT, emit_index};
pub use table::emit_table;

use proc_macro2::{Literal, TokenStream};
use std::path::PathBuf;
use syn::{Path, parse_str};
use thiserror::Error as ThisError;

/// First line of every artifact.
pub const GENERATED_HEADER: &str = "// @generated by tablegen. Do not edit by hand.";

/// File stem of the shared enum artifact.
pub const ENUMS_ARTIFACT: &str = "enums";

///
/// InvalidRuntimeCrate
///

#[derive(Debug, ThisError)]
#[error("'{name}' is not a valid runtime crate path: {source}")]
pub struct InvalidRuntimeCrate {
    pub name: String,
    #[source]
    pub source: syn::Error,
}

///
/// EmitOptions
///

#[derive(Clone, Debug)]
pub struct EmitOptions {
    /// Path the generated code uses to reach the runtime crate.
    pub runtime: Path,
}

impl EmitOptions {
    /// Point generated code at a runtime crate re-exported under another name.
    pub fn with_runtime_crate(name: &str) -> Result<Self, InvalidRuntimeCrate> {
        let runtime =
            parse_str::<Path>(&format!("::{name}")).map_err(|source| InvalidRuntimeCrate {
                name: name.to_string(),
                source,
            })?;

        Ok(Self { runtime })
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime: syn::parse_quote!(::tablegen_runtime),
        }
    }
}

///
/// Artifact
///
/// One generated file, relative to the output directory.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, tokens: &TokenStream) -> Self {
        Self {
            path: path.into(),
            contents: format!("{GENERATED_HEADER}\n\n{tokens}\n"),
        }
    }
}

// lit
// unsuffixed integer literal, so offsets read as `0..32` rather than `0usize..32usize`
pub(crate) fn lit(value: usize) -> Literal {
    Literal::usize_unsuffixed(value)
}
