//! Binary operator precedence and the parenthesization rule built on it.

use flowir_core::expr::BinaryOp;

/// Position of an expression relative to the operator that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parent {
    /// Statement level or a delimited slot (call argument, index, ...).
    Top,
    /// Operand of a unary operator.
    Unary,
    Left(BinaryOp),
    Right(BinaryOp),
}

/// Lower binds tighter.
pub(crate) fn precedence(op: BinaryOp) -> u8 {
    use BinaryOp::*;
    match op {
        Dot | Index => 0,
        Mul | Div | Mod => 1,
        Add | Sub => 2,
        Eq | Ne | Lt | Le | Gt | Ge | In => COMPARISON,
        And => 4,
        Or => 5,
    }
}

/// Comparisons do not chain: `a<b==c` has no reading.
const COMPARISON: u8 = 3;

/// `a op (b op c)` means the same as `a op b op c`.
fn is_associative(op: BinaryOp) -> bool {
    use BinaryOp::*;
    matches!(op, Add | Mul | And | Or)
}

/// Word operators are set off by spaces; symbols are written tight.
pub(crate) fn is_keyword(op: BinaryOp) -> bool {
    use BinaryOp::*;
    matches!(op, And | Or | In)
}

pub(crate) fn needs_parens(parent: Parent, op: BinaryOp) -> bool {
    match parent {
        Parent::Top => false,
        Parent::Unary => true,
        Parent::Left(p) => {
            let (child, outer) = (precedence(op), precedence(p));
            child > outer || (child == outer && outer == COMPARISON)
        }
        Parent::Right(p) => {
            let (child, outer) = (precedence(op), precedence(p));
            child > outer || (child == outer && !(op == p && is_associative(p)))
        }
    }
}
