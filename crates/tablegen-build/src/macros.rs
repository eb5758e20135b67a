//! Build-script helper that compiles a schema file into `OUT_DIR`.
//!
//! Expands inside a `fn main() -> std::io::Result<()>` build script; every
//! failure is returned through `?`.

#[macro_export]
macro_rules! build {
    ($schema:expr) => {
        $crate::build!($schema, $crate::emit::EmitOptions::default())
    };

    ($schema:expr, $options:expr) => {{
        use std::{env::var, path::PathBuf};

        //
        // CARGO
        //

        let schema_path = PathBuf::from($schema);
        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", schema_path.display());

        let out_dir = var("OUT_DIR")
            .map(PathBuf::from)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;

        //
        // ARTIFACTS
        //

        $crate::build_into(&schema_path, &out_dir, &$options)?;
    }};
}
