use crate::emit::{Artifact, ENUMS_ARTIFACT};
use quote::{format_ident, quote};
use tablegen_schema::node::ValidatedSchema;

/// File name of the module index.
pub const INDEX_ARTIFACT: &str = "mod.rs";

/// Emit `mod.rs`, declaring the enum module and one module per table.
///
/// Only useful when artifacts are written into a source directory; build
/// scripts that `include!` from `OUT_DIR` wire the modules up themselves.
#[must_use]
pub fn emit_index(schema: &ValidatedSchema) -> Artifact {
    let enums = format_ident!("{ENUMS_ARTIFACT}");
    let tables = schema
        .tables()
        .iter()
        .map(|table| format_ident!("{}", table.artifact_name()));

    let tokens = quote! {
        pub mod #enums;
        #(pub mod #tables;)*
    };

    Artifact::new(INDEX_ARTIFACT, &tokens)
}
