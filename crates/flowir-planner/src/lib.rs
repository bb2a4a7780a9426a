#![forbid(unsafe_code)]
//! flowir-planner: the textual front door for pipelines.
//!
//! A pipeline document is the serde form of `flowir_core::dag::Sequential`
//! written as YAML. Queries may pull in include files whose declarations
//! and operators are spliced in ahead of the query's own.

pub mod dsl;
pub mod error;

pub use dsl::yaml::{load_query, parse_yaml_pipeline};
pub use error::{PlanError, Result};
