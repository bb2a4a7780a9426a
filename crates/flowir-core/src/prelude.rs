//! Convenient re-exports for downstream crates.

pub use crate::config::IrConfig;
pub use crate::dag::{Case, Const, Func, Op, Sequential, Trunk};
pub use crate::error::{Error, Result};
pub use crate::expr::{Assignment, BinaryOp, Expr, UnaryOp};
pub use crate::hash::Hash256;
pub use crate::source::Source;
pub use crate::types::{Layout, Order, PrimitiveType, Type, TypeField};
