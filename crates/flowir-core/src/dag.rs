//! Pipeline operators: the DAG handed from the compiler to the runtime.
//!
//! A program is a tree rooted at a `Sequential`. Fan-out (`Parallel`,
//! `Switch`, `From` trunks) nests further `Sequential`s; expressions hang
//! off the operators that evaluate them.

use serde::{Deserialize, Serialize};

use crate::expr::{Assignment, Expr};
use crate::source::Source;
use crate::types::Order;

/// Pipeline-scoped constant, emitted once before the operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,
    pub expr: Expr,
}

/// Pipeline-scoped function declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub expr: Expr,
}

/// Linear pipeline: declarations followed by operators chained in order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sequential {
    #[serde(default)]
    pub consts: Vec<Const>,
    #[serde(default)]
    pub funcs: Vec<Func>,
    #[serde(default, alias = "steps")]
    pub ops: Vec<Op>,
}

impl Sequential {
    pub fn new(ops: Vec<Op>) -> Self {
        Self {
            consts: Vec::new(),
            funcs: Vec::new(),
            ops,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.funcs.is_empty() && self.ops.is_empty()
    }
}

/// One arm of a `switch`; `expr == None` is the default arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default)]
    pub expr: Option<Expr>,
    pub op: Op,
}

/// One intake branch of a `from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trunk {
    pub source: Source,
    /// Work the planner moved into the source itself.
    #[serde(default)]
    pub pushdown: Option<Box<Op>>,
    /// Processing applied to this branch before it joins the pipeline.
    #[serde(default)]
    pub seq: Option<Sequential>,
}

impl Trunk {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            pushdown: None,
            seq: None,
        }
    }

    /// True when the trunk is nothing but its source.
    pub fn is_bare(&self) -> bool {
        self.pushdown.is_none() && self.seq.as_ref().map_or(true, |s| s.ops.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Sequential(Sequential),
    Parallel {
        branches: Vec<Sequential>,
    },
    Switch {
        #[serde(default)]
        expr: Option<Expr>,
        cases: Vec<Case>,
    },
    Merge {
        expr: Expr,
        #[serde(default)]
        order: Order,
    },
    Summarize {
        #[serde(default)]
        aggs: Vec<Assignment>,
        #[serde(default)]
        keys: Vec<Assignment>,
        #[serde(default)]
        limit: usize,
        #[serde(default)]
        partials_in: bool,
        #[serde(default)]
        partials_out: bool,
        /// 0 when the input order is unknown, otherwise -1 or 1.
        #[serde(default)]
        input_sort_dir: i32,
    },
    Cut {
        args: Vec<Assignment>,
    },
    Drop {
        args: Vec<Expr>,
    },
    Put {
        args: Vec<Assignment>,
    },
    Rename {
        args: Vec<Assignment>,
    },
    Sort {
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        order: Order,
        #[serde(default)]
        nulls_first: bool,
    },
    Head {
        count: usize,
    },
    Tail {
        count: usize,
    },
    Uniq {
        #[serde(default)]
        cflag: bool,
    },
    Pass,
    #[serde(rename = "where")]
    Filter {
        expr: Expr,
    },
    Top {
        #[serde(default)]
        args: Vec<Expr>,
        limit: usize,
        #[serde(default)]
        flush: bool,
    },
    Fuse,
    Join {
        left_key: Expr,
        right_key: Expr,
        #[serde(default)]
        args: Vec<Assignment>,
    },
    From {
        trunks: Vec<Trunk>,
    },
    Over {
        exprs: Vec<Expr>,
    },
    Yield {
        exprs: Vec<Expr>,
    },
    Extension {
        kind: String,
    },
}

impl Op {
    /// Stable operator keyword, used in logs and diagnostics.
    pub fn name(&self) -> &str {
        use Op::*;
        match self {
            Op::Sequential(_) => "sequential",
            Parallel { .. } => "fork",
            Switch { .. } => "switch",
            Merge { .. } => "merge",
            Summarize { .. } => "summarize",
            Cut { .. } => "cut",
            Drop { .. } => "drop",
            Put { .. } => "put",
            Rename { .. } => "rename",
            Sort { .. } => "sort",
            Head { .. } => "head",
            Tail { .. } => "tail",
            Uniq { .. } => "uniq",
            Pass => "pass",
            Filter { .. } => "where",
            Top { .. } => "top",
            Fuse => "fuse",
            Join { .. } => "join",
            From { .. } => "from",
            Over { .. } => "over",
            Yield { .. } => "yield",
            Extension { kind } => kind.as_str(),
        }
    }

    /// Returns the number of operators in this subtree, including itself.
    pub fn size(&self) -> usize {
        use Op::*;
        let nested = match self {
            Op::Sequential(seq) => return seq.ops.iter().map(Op::size).sum(),
            Parallel { branches } => branches
                .iter()
                .flat_map(|b| b.ops.iter())
                .map(Op::size)
                .sum(),
            Switch { cases, .. } => cases.iter().map(|c| c.op.size()).sum(),
            From { trunks } => trunks
                .iter()
                .map(|t| {
                    t.pushdown.as_ref().map_or(0, |p| p.size())
                        + t.seq
                            .as_ref()
                            .map_or(0, |s| s.ops.iter().map(Op::size).sum())
                })
                .sum(),
            _ => 0,
        };
        nested + 1
    }
}

impl From<Sequential> for Op {
    fn from(seq: Sequential) -> Self {
        Op::Sequential(seq)
    }
}
