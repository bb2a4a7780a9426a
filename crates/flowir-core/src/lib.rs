#![forbid(unsafe_code)]
//! flowir-core: the intermediate representation handed from a query
//! compiler's front end to its execution back end.
//!
//! - `dag`: pipeline operators (`Op`, `Sequential`, `Trunk`, ...)
//! - `expr`: the recursive expression tree operators are built from
//! - `source`: data-intake descriptors attached to `from` trunks
//! - `types`: first-class type values and sort order/layout
//!
//! The tree is built once by a front end and treated as immutable afterwards;
//! nothing in this crate mutates a node after construction.

pub mod config;
pub mod dag;
pub mod error;
pub mod expr;
pub mod hash;
pub mod prelude;
pub mod source;
pub mod types;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
