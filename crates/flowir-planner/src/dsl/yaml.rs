//! YAML → `Sequential` loader.
//!
//! Example:
//! ```yaml
//! consts:
//!   - { name: limit, expr: { kind: literal, type: int64, text: "10" } }
//! ops:
//!   - op: from
//!     trunks:
//!       - source: { kind: pool, id: logs }
//!   - op: where
//!     expr:
//!       kind: binary
//!       op: ">"
//!       lhs: { kind: this, path: [x] }
//!       rhs: { kind: literal, type: int64, text: "5" }
//!   - { op: head, count: 10 }
//! ```
//!
//! `steps` is accepted in place of `ops`.
//!
//! A document that is a single expression (a mapping with a `kind` key) is
//! shorthand for a one-operator pipeline: `where e` when `e` is a predicate,
//! `yield e` otherwise.

use std::path::{Path, PathBuf};

use flowir_core::dag::{Op, Sequential};
use flowir_core::expr::{BinaryOp, Expr, UnaryOp};
use flowir_core::types::PrimitiveType;

use crate::error::{PlanError, Result};

/// Parse one pipeline document. A blank document is an empty pipeline.
pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<Sequential> {
    if yaml_src.trim().is_empty() {
        return Ok(Sequential::default());
    }
    let doc: serde_yaml::Value = serde_yaml::from_str(yaml_src)?;
    if doc.get("kind").is_some() {
        let expr: Expr = serde_yaml::from_value(doc)?;
        return Ok(Sequential::new(vec![bare_expr_op(expr)]));
    }
    let seq: Sequential = serde_yaml::from_value(doc)?;
    Ok(seq)
}

fn bare_expr_op(expr: Expr) -> Op {
    if is_predicate(&expr) {
        Op::Filter { expr }
    } else {
        Op::Yield { exprs: vec![expr] }
    }
}

/// Searches, boolean literals, negations and comparisons.
fn is_predicate(expr: &Expr) -> bool {
    match expr {
        Expr::Search { .. } => true,
        Expr::Literal { ty, .. } => *ty == PrimitiveType::Bool,
        Expr::Unary { op, .. } => *op == UnaryOp::Not,
        Expr::Binary { op, .. } => matches!(
            op,
            BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge
                | BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::In
        ),
        _ => false,
    }
}

/// Parse `src` preceded by each include file, in order.
///
/// Declarations and operators are concatenated: everything from the first
/// include, then the next, and finally `src` itself.
pub fn load_query(src: &str, includes: &[PathBuf]) -> Result<Sequential> {
    let mut out = Sequential::default();
    for path in includes {
        let text = read_include(path)?;
        append(&mut out, parse_yaml_pipeline(&text)?);
    }
    append(&mut out, parse_yaml_pipeline(src)?);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        includes = includes.len(),
        consts = out.consts.len(),
        funcs = out.funcs.len(),
        ops = out.ops.len(),
        "loaded query"
    );

    Ok(out)
}

fn read_include(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn append(dst: &mut Sequential, src: Sequential) {
    dst.consts.extend(src.consts);
    dst.funcs.extend(src.funcs);
    dst.ops.extend(src.ops);
}
