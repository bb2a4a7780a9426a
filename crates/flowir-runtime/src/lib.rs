#![forbid(unsafe_code)]
//! flowir-runtime: values flowing between operators and the per-record
//! functions the runtime applies to them.

pub mod error;
pub mod nest_dotted;
pub mod value;

pub use error::{Error, Result};
pub use nest_dotted::{NestDotted, RecordShape};
pub use value::Value;
