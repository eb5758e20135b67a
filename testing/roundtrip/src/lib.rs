//! Generated table modules for the round-trip fixture schema.
//!
//! `build.rs` writes one artifact per table plus `enums.rs` into `OUT_DIR`;
//! each is mounted here under its artifact name.

#![allow(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod enums {
    include!(concat!(env!("OUT_DIR"), "/enums.rs"));
}

pub mod table1 {
    include!(concat!(env!("OUT_DIR"), "/table1.rs"));
}

pub mod simple {
    include!(concat!(env!("OUT_DIR"), "/simple.rs"));
}

pub mod profile {
    include!(concat!(env!("OUT_DIR"), "/profile.rs"));
}
