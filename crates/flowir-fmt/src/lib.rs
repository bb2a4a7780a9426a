//! flowir-fmt: canonical text rendering for flowir DAGs.
//!
//! The same tree always renders to the same bytes, so the output doubles
//! as a diff target and, through [`fingerprint`], as a plan identity.
//! Rendering never fails: unknown node kinds become visible placeholders.

#![forbid(unsafe_code)]

mod expr;
mod formatter;
mod op;
mod precedence;
mod source;

use flowir_core::config::IrConfig;
use flowir_core::dag::{Op, Sequential};
use flowir_core::expr::Expr;
use flowir_core::hash::{hash_str, Hash256};

use crate::formatter::Canon;
use crate::precedence::Parent;

pub use crate::source::source;

/// Render an operator tree with the default configuration.
pub fn dag(op: &Op) -> String {
    dag_with(op, &IrConfig::default())
}

/// Render an operator tree using `cfg.tab_width` spaces per nesting level.
pub fn dag_with(op: &Op, cfg: &IrConfig) -> String {
    let mut c = Canon::new(cfg.tab_width);
    c.op(op);
    let text = c.finish();

    #[cfg(feature = "tracing")]
    tracing::trace!(root = op.name(), ops = op.size(), bytes = text.len(), "rendered dag");

    text
}

/// Render a pipeline body: declarations first, then its operators.
pub fn dag_sequential(seq: &Sequential) -> String {
    let mut c = Canon::new(IrConfig::default().tab_width);
    c.sequential(seq);
    c.finish()
}

pub fn dag_expr(e: &Expr) -> String {
    dag_expr_with(e, &IrConfig::default())
}

pub fn dag_expr_with(e: &Expr, cfg: &IrConfig) -> String {
    let mut c = Canon::new(cfg.tab_width);
    c.expr(e, Parent::Top);
    c.finish()
}

/// Like [`dag_expr`], but an absent expression renders as `null`.
pub fn dag_opt_expr(e: Option<&Expr>) -> String {
    match e {
        Some(e) => dag_expr(e),
        None => "null".to_string(),
    }
}

/// Content hash of the canonical rendering.
pub fn fingerprint(op: &Op) -> Hash256 {
    hash_str(&dag(op))
}
