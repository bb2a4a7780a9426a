//! Expression tree shared by every operator.
//!
//! Expressions are finite trees; optional slots are `Option<Expr>` and an
//! absent slot means "null". `Extension` is the escape hatch for kinds a
//! front end adds before downstream consumers learn about them.

use serde::{Deserialize, Serialize};

use crate::types::{PrimitiveType, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "-")]
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "in")]
    In,
    /// Field selection `lhs.rhs`.
    #[serde(rename = ".")]
    Dot,
    /// Indexing `lhs[rhs]`.
    #[serde(rename = "[")]
    Index,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Eq => "==",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            And => "and",
            Or => "or",
            In => "in",
            Dot => ".",
            Index => "[",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Literal {
        #[serde(rename = "type")]
        ty: PrimitiveType,
        text: String,
    },
    TypeValue {
        value: Type,
    },
    /// Path relative to the current input value; empty is the value itself.
    This {
        #[serde(default)]
        path: Vec<String>,
    },
    Var {
        name: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        #[serde(rename = "else")]
        els: Box<Expr>,
    },
    Call {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Agg {
        name: String,
        #[serde(default)]
        expr: Option<Box<Expr>>,
        #[serde(default, rename = "where")]
        filter: Option<Box<Expr>>,
    },
    Search {
        value: String,
    },
    /// Serialized as `{kind: extension, name: K}`.
    Extension {
        #[serde(rename = "name")]
        kind: String,
    },
}

impl Expr {
    pub fn literal(ty: PrimitiveType, text: impl Into<String>) -> Self {
        Expr::Literal {
            ty,
            text: text.into(),
        }
    }

    pub fn int(v: i64) -> Self {
        Self::literal(PrimitiveType::Int64, v.to_string())
    }

    pub fn boolean(v: bool) -> Self {
        Self::literal(PrimitiveType::Bool, v.to_string())
    }

    pub fn string(v: impl Into<String>) -> Self {
        Self::literal(PrimitiveType::String, v)
    }

    /// The implicit receiver.
    pub fn this() -> Self {
        Expr::This { path: Vec::new() }
    }

    pub fn path<S: AsRef<str>>(steps: &[S]) -> Self {
        Expr::This {
            path: steps.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var { name: name.into() }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn conditional(cond: Expr, then: Expr, els: Expr) -> Self {
        Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            els: Box::new(els),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    pub fn agg(name: impl Into<String>, expr: Option<Expr>, filter: Option<Expr>) -> Self {
        Expr::Agg {
            name: name.into(),
            expr: expr.map(Box::new),
            filter: filter.map(Box::new),
        }
    }

    /// True for the zero-step field path.
    pub fn is_this(&self) -> bool {
        matches!(self, Expr::This { path } if path.is_empty())
    }

    /// True for the boolean literal `true`.
    pub fn is_true(&self) -> bool {
        matches!(
            self,
            Expr::Literal { ty: PrimitiveType::Bool, text } if text == "true"
        )
    }
}

/// `lhs:=rhs`; a missing `lhs` assigns into the name inferred from `rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub lhs: Option<Expr>,
    pub rhs: Expr,
}

impl Assignment {
    pub fn new(lhs: Option<Expr>, rhs: Expr) -> Self {
        Self { lhs, rhs }
    }
}
