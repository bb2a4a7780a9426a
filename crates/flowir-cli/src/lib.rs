#![forbid(unsafe_code)]
//! flowir-cli: argument handling shared by the `flowir` binary and tests.

pub mod queryflags;

pub use queryflags::{input_sources, QueryFlags};
