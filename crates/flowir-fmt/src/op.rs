//! Operator rendering. Every operator except `Sequential` starts its own
//! line through `Canon::next`; nested pipelines go through `branch`.

use flowir_core::dag::{Case, Op, Sequential, Trunk};
use flowir_core::types::Order;

use crate::formatter::Canon;
use crate::precedence::Parent;
use crate::source::source;

impl Canon {
    pub(crate) fn sequential(&mut self, seq: &Sequential) {
        for d in &seq.consts {
            self.start_line();
            self.write_args(format_args!("const {} = ", d.name));
            self.expr(&d.expr, Parent::Top);
        }
        for f in &seq.funcs {
            self.start_line();
            self.write_args(format_args!("func {}({}): (", f.name, f.params.join(", ")));
            self.block(|c| {
                c.ret();
                c.expr(&f.expr, Parent::Top);
            });
            self.ret();
            self.write(")");
        }
        for op in &seq.ops {
            self.op(op);
        }
    }

    pub(crate) fn op(&mut self, op: &Op) {
        match op {
            Op::Sequential(seq) => self.sequential(seq),
            Op::Parallel { branches } => {
                self.next();
                self.write("fork (");
                self.block(|c| {
                    for branch in branches {
                        c.ret();
                        c.write("=>");
                        c.branch(|c| c.sequential(branch));
                    }
                });
                self.ret();
                self.write(")");
            }
            Op::Switch { expr, cases } => {
                self.next();
                self.write("switch ");
                if let Some(e) = expr {
                    self.expr(e, Parent::Top);
                    self.write(" ");
                }
                self.write("(");
                self.block(|c| {
                    for case in cases {
                        c.case(case);
                    }
                });
                self.ret();
                self.write(")");
            }
            Op::Merge { expr, order } => {
                self.next();
                self.write("merge ");
                self.expr(expr, Parent::Top);
                self.write_args(format_args!(":{}", order));
            }
            Op::Summarize {
                aggs,
                keys,
                limit,
                partials_in,
                partials_out,
                input_sort_dir,
            } => {
                self.next();
                self.write("summarize");
                if *partials_in {
                    self.write(" partials-in");
                }
                if *partials_out {
                    self.write(" partials-out");
                }
                if *input_sort_dir != 0 {
                    self.write_args(format_args!(" sort-dir {}", input_sort_dir));
                }
                self.block(|c| {
                    c.block(|c| {
                        c.ret();
                        c.assignments(aggs);
                        let mut sep = if aggs.is_empty() { "" } else { " " };
                        if !keys.is_empty() {
                            c.write_args(format_args!("{}by ", sep));
                            c.assignments(keys);
                            sep = " ";
                        }
                        if *limit != 0 {
                            c.write_args(format_args!("{}-with limit {}", sep, limit));
                        }
                    })
                });
            }
            Op::Cut { args } => {
                self.next();
                self.write("cut ");
                self.assignments(args);
            }
            Op::Drop { args } => {
                self.next();
                self.write("drop ");
                self.exprs(args);
            }
            Op::Put { args } => {
                self.next();
                self.write("put ");
                self.assignments(args);
            }
            Op::Rename { args } => {
                self.next();
                self.write("rename ");
                self.assignments(args);
            }
            Op::Sort {
                args,
                order,
                nulls_first,
            } => {
                self.next();
                self.write("sort");
                if *order == Order::Desc {
                    self.write(" -r");
                }
                if *nulls_first {
                    self.write(" -nulls first");
                }
                if !args.is_empty() {
                    self.write(" ");
                    self.exprs(args);
                }
            }
            Op::Head { count } => {
                self.next();
                self.write_args(format_args!("head {}", count));
            }
            Op::Tail { count } => {
                self.next();
                self.write_args(format_args!("tail {}", count));
            }
            Op::Uniq { cflag } => {
                self.next();
                self.write("uniq");
                if *cflag {
                    self.write(" -c");
                }
            }
            Op::Pass => {
                self.next();
                self.write("pass");
            }
            Op::Filter { expr } => {
                self.next();
                self.write("where ");
                if expr.is_true() {
                    self.write("*");
                } else {
                    self.expr(expr, Parent::Top);
                }
            }
            Op::Top { args, limit, flush } => {
                self.next();
                self.write_args(format_args!("top limit={} flush={}", limit, flush));
                if !args.is_empty() {
                    self.write(" ");
                    self.exprs(args);
                }
            }
            Op::Fuse => {
                self.next();
                self.write("fuse");
            }
            Op::Join {
                left_key,
                right_key,
                args,
            } => {
                self.next();
                self.write("join on ");
                self.expr(left_key, Parent::Top);
                self.write("=");
                self.expr(right_key, Parent::Top);
                if !args.is_empty() {
                    self.write(" ");
                    self.assignments(args);
                }
            }
            Op::From { trunks } => self.from(trunks),
            Op::Over { exprs } => {
                self.next();
                self.write("over ");
                self.exprs(exprs);
            }
            Op::Yield { exprs } => {
                self.next();
                self.write("yield ");
                self.exprs(exprs);
            }
            Op::Extension { kind } => {
                self.next();
                self.write_args(format_args!("unknown op: {}", kind));
            }
        }
    }

    fn case(&mut self, case: &Case) {
        self.ret();
        match &case.expr {
            Some(e) => {
                self.write("case ");
                self.expr(e, Parent::Top);
            }
            None => self.write("default"),
        }
        self.write(" =>");
        self.branch(|c| c.op(&case.op));
    }

    fn from(&mut self, trunks: &[Trunk]) {
        self.next();
        if let [trunk] = trunks {
            if trunk.is_bare() {
                self.write_args(format_args!("from ({})", source(&trunk.source)));
                return;
            }
        }
        self.write("from (");
        self.block(|c| {
            for trunk in trunks {
                c.ret();
                if let Some(pushdown) = &trunk.pushdown {
                    c.write("(pushdown");
                    c.branch(|c| c.op(pushdown));
                    c.write(")");
                    c.ret();
                }
                c.write(&source(&trunk.source));
                if let Some(seq) = trunk.seq.as_ref().filter(|s| !s.ops.is_empty()) {
                    c.write(" =>");
                    c.branch(|c| c.sequential(seq));
                }
            }
        });
        self.ret();
        self.write(")");
    }
}
