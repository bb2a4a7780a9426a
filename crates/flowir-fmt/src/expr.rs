//! Expression rendering.

use flowir_core::expr::{Assignment, BinaryOp, Expr};
use flowir_core::types::{PrimitiveType, Type};

use crate::formatter::Canon;
use crate::precedence::{is_keyword, needs_parens, Parent};

impl Canon {
    pub(crate) fn expr(&mut self, e: &Expr, parent: Parent) {
        match e {
            Expr::Literal { ty, text } => self.literal(*ty, text),
            Expr::TypeValue { value } => {
                self.write("type<");
                self.typ(value);
                self.write(">");
            }
            Expr::This { path } => self.field_path(path),
            Expr::Var { name } => self.write(name),
            Expr::Unary { op, operand } => {
                let parens = is_selection(parent);
                self.maybe_write("(", parens);
                self.write(op.symbol());
                self.expr(operand, Parent::Unary);
                self.maybe_write(")", parens);
            }
            Expr::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs, parent),
            Expr::Conditional { cond, then, els } => {
                let parens = parent != Parent::Top;
                self.maybe_write("(", parens);
                self.write("(");
                self.expr(cond, Parent::Top);
                self.write(") ? ");
                self.expr(then, Parent::Top);
                self.write(" : ");
                self.expr(els, Parent::Top);
                self.maybe_write(")", parens);
            }
            Expr::Call { name, args } => {
                self.write_args(format_args!("{}(", name));
                self.exprs(args);
                self.write(")");
            }
            Expr::Agg { name, expr, filter } => {
                let parens = filter.is_some() && parent != Parent::Top;
                self.maybe_write("(", parens);
                self.write_args(format_args!("{}(", name));
                if let Some(e) = expr {
                    self.expr(e, Parent::Top);
                }
                self.write(")");
                if let Some(w) = filter {
                    self.write(" where ");
                    self.expr(w, Parent::Top);
                }
                self.maybe_write(")", parens);
            }
            Expr::Search { value } => self.write_args(format_args!("search({})", value)),
            Expr::Extension { kind } => self.write_args(format_args!("(unknown expr {})", kind)),
        }
    }

    fn binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr, parent: Parent) {
        match op {
            BinaryOp::Dot => {
                if !lhs.is_this() {
                    self.expr(lhs, Parent::Left(op));
                    self.write(".");
                }
                self.expr(rhs, Parent::Right(op));
            }
            BinaryOp::Index => {
                if !lhs.is_this() {
                    self.expr(lhs, Parent::Left(op));
                }
                self.write("[");
                self.expr(rhs, Parent::Top);
                self.write("]");
            }
            _ => {
                let parens = needs_parens(parent, op);
                self.maybe_write("(", parens);
                self.expr(lhs, Parent::Left(op));
                if is_keyword(op) {
                    self.write_args(format_args!(" {} ", op.symbol()));
                } else {
                    self.write(op.symbol());
                }
                self.expr(rhs, Parent::Right(op));
                self.maybe_write(")", parens);
            }
        }
    }

    fn maybe_write(&mut self, s: &str, doit: bool) {
        if doit {
            self.write(s);
        }
    }

    fn literal(&mut self, ty: PrimitiveType, text: &str) {
        match ty {
            PrimitiveType::String => self.write(&quote(text)),
            PrimitiveType::Regexp => self.write_args(format_args!("/{}/", text)),
            _ => self.write(text),
        }
    }

    fn field_path(&mut self, path: &[String]) {
        if path.is_empty() {
            self.write("this");
            return;
        }
        for (k, step) in path.iter().enumerate() {
            if is_identifier(step) {
                if k > 0 {
                    self.write(".");
                }
                self.write(step);
            } else {
                if k == 0 {
                    self.write("this");
                }
                self.write_args(format_args!("[{}]", quote(step)));
            }
        }
    }

    fn typ(&mut self, t: &Type) {
        match t {
            Type::Primitive { name } | Type::Named { name } => self.write(name),
            Type::Record { fields } => {
                self.write("{");
                for (k, f) in fields.iter().enumerate() {
                    if k > 0 {
                        self.write(",");
                    }
                    self.field_name(&f.name);
                    self.write(":");
                    self.typ(&f.ty);
                }
                self.write("}");
            }
            Type::Array { elem } => {
                self.write("[");
                self.typ(elem);
                self.write("]");
            }
            Type::Set { elem } => {
                self.write("|[");
                self.typ(elem);
                self.write("]|");
            }
            Type::Map { key, value } => {
                self.write("|{");
                self.typ(key);
                self.write(":");
                self.typ(value);
                self.write("}|");
            }
            Type::Union { types } => {
                self.write("(");
                for (k, t) in types.iter().enumerate() {
                    if k > 0 {
                        self.write(",");
                    }
                    self.typ(t);
                }
                self.write(")");
            }
            Type::Enum { symbols } => {
                self.write("enum(");
                for (k, s) in symbols.iter().enumerate() {
                    if k > 0 {
                        self.write(",");
                    }
                    self.field_name(s);
                }
                self.write(")");
            }
            Type::Error { inner } => {
                self.write("error(");
                self.typ(inner);
                self.write(")");
            }
            Type::Def { name, ty } => {
                self.write_args(format_args!("{}=(", name));
                self.typ(ty);
                self.write(")");
            }
        }
    }

    fn field_name(&mut self, name: &str) {
        if is_identifier(name) {
            self.write(name);
        } else {
            self.write(&quote(name));
        }
    }

    pub(crate) fn exprs(&mut self, exprs: &[Expr]) {
        for (k, e) in exprs.iter().enumerate() {
            if k > 0 {
                self.write(", ");
            }
            self.expr(e, Parent::Top);
        }
    }

    pub(crate) fn assignments(&mut self, assignments: &[Assignment]) {
        for (k, a) in assignments.iter().enumerate() {
            if k > 0 {
                self.write(",");
            }
            if let Some(lhs) = &a.lhs {
                self.expr(lhs, Parent::Top);
                self.write(":=");
            }
            self.expr(&a.rhs, Parent::Top);
        }
    }
}

/// Receiver slot of `.` or `[`, which binds tighter than any prefix operator.
fn is_selection(parent: Parent) -> bool {
    matches!(
        parent,
        Parent::Left(BinaryOp::Dot) | Parent::Left(BinaryOp::Index)
    )
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s))
}

#[cfg(test)]
mod tests {
    use flowir_core::expr::{Assignment, BinaryOp::*, Expr, UnaryOp};
    use flowir_core::types::{PrimitiveType, Type, TypeField};

    use crate::{dag_expr, dag_opt_expr};

    fn p(name: &str) -> Expr {
        Expr::path(&[name])
    }

    #[test]
    fn implicit_receiver() {
        assert_eq!(dag_expr(&Expr::this()), "this");
        assert_eq!(dag_expr(&Expr::binary(Dot, Expr::this(), p("a"))), "a");
        assert_eq!(dag_expr(&Expr::binary(Index, Expr::this(), Expr::int(0))), "[0]");
    }

    #[test]
    fn selection_and_indexing() {
        let call = Expr::call("f", vec![]);
        assert_eq!(dag_expr(&Expr::binary(Dot, call, p("b"))), "f().b");
        let idx = Expr::binary(Index, p("a"), Expr::string("k"));
        assert_eq!(dag_expr(&idx), r#"a["k"]"#);
        let sum = Expr::binary(Add, p("a"), p("b"));
        assert_eq!(dag_expr(&Expr::binary(Dot, sum, p("c"))), "(a+b).c");
    }

    #[test]
    fn field_paths() {
        assert_eq!(dag_expr(&Expr::path(&["a", "b"])), "a.b");
        assert_eq!(dag_expr(&Expr::path(&["a b"])), r#"this["a b"]"#);
        assert_eq!(dag_expr(&Expr::path(&["a", "b.c"])), r#"a["b.c"]"#);
    }

    #[test]
    fn arithmetic_precedence() {
        let mul_in_add = Expr::binary(Add, Expr::binary(Mul, p("a"), p("b")), p("c"));
        assert_eq!(dag_expr(&mul_in_add), "a*b+c");
        let add_in_mul = Expr::binary(Mul, Expr::binary(Add, p("a"), p("b")), p("c"));
        assert_eq!(dag_expr(&add_in_mul), "(a+b)*c");
        let right_sub = Expr::binary(Sub, p("a"), Expr::binary(Sub, p("b"), p("c")));
        assert_eq!(dag_expr(&right_sub), "a-(b-c)");
        let left_sub = Expr::binary(Sub, Expr::binary(Sub, p("a"), p("b")), p("c"));
        assert_eq!(dag_expr(&left_sub), "a-b-c");
        let right_add = Expr::binary(Add, p("a"), Expr::binary(Add, p("b"), p("c")));
        assert_eq!(dag_expr(&right_add), "a+b+c");
    }

    #[test]
    fn logical_operators_are_spaced() {
        let e = Expr::binary(
            And,
            Expr::binary(Or, p("a"), p("b")),
            Expr::binary(Gt, p("x"), Expr::int(1)),
        );
        assert_eq!(dag_expr(&e), "(a or b) and x>1");
        let e = Expr::binary(Or, p("a"), Expr::binary(And, p("b"), p("c")));
        assert_eq!(dag_expr(&e), "a or b and c");
        let e = Expr::binary(In, p("a"), Expr::var("set"));
        assert_eq!(dag_expr(&e), "a in set");
    }

    #[test]
    fn unary_wraps_binary_operand() {
        let not = Expr::unary(UnaryOp::Not, Expr::binary(And, p("a"), p("b")));
        assert_eq!(dag_expr(&not), "!(a and b)");
        assert_eq!(dag_expr(&Expr::unary(UnaryOp::Neg, p("x"))), "-x");
    }

    #[test]
    fn conditional_is_wrapped_inside_operators() {
        let cond = Expr::conditional(
            Expr::binary(Gt, p("x"), Expr::int(1)),
            Expr::string("y"),
            Expr::string("n"),
        );
        assert_eq!(dag_expr(&cond), r#"(x>1) ? "y" : "n""#);
        let sum = Expr::binary(Add, cond, Expr::int(1));
        assert_eq!(dag_expr(&sum), r#"((x>1) ? "y" : "n")+1"#);
    }

    #[test]
    fn literals() {
        assert_eq!(dag_expr(&Expr::string(r#"say "hi""#)), r#""say \"hi\"""#);
        assert_eq!(dag_expr(&Expr::literal(PrimitiveType::Regexp, "a.*")), "/a.*/");
        assert_eq!(dag_expr(&Expr::literal(PrimitiveType::Ip, "10.0.0.1")), "10.0.0.1");
        assert_eq!(dag_expr(&Expr::boolean(false)), "false");
    }

    #[test]
    fn type_values() {
        let rec = Type::Record {
            fields: vec![
                TypeField {
                    name: "a".into(),
                    ty: Type::primitive("int64"),
                },
                TypeField {
                    name: "b c".into(),
                    ty: Type::Array {
                        elem: Box::new(Type::primitive("string")),
                    },
                },
            ],
        };
        let e = Expr::TypeValue { value: rec };
        assert_eq!(dag_expr(&e), r#"type<{a:int64,"b c":[string]}>"#);

        let map = Type::Map {
            key: Box::new(Type::primitive("string")),
            value: Box::new(Type::Union {
                types: vec![Type::primitive("int64"), Type::Named { name: "port".into() }],
            }),
        };
        assert_eq!(
            dag_expr(&Expr::TypeValue { value: map }),
            "type<|{string:(int64,port)}|>"
        );
        let def = Type::Def {
            name: "port".into(),
            ty: Box::new(Type::Set {
                elem: Box::new(Type::primitive("uint16")),
            }),
        };
        assert_eq!(dag_expr(&Expr::TypeValue { value: def }), "type<port=(|[uint16]|)>");
    }

    #[test]
    fn calls_aggs_and_search() {
        let call = Expr::call("add", vec![Expr::var("x"), Expr::int(2)]);
        assert_eq!(dag_expr(&call), "add(x, 2)");
        assert_eq!(dag_expr(&Expr::agg("count", None, None)), "count()");
        let sum = Expr::agg(
            "sum",
            Some(p("x")),
            Some(Expr::binary(Gt, p("y"), Expr::int(1))),
        );
        assert_eq!(dag_expr(&sum), "sum(x) where y>1");
        let search = Expr::Search {
            value: "foo".into(),
        };
        assert_eq!(dag_expr(&search), "search(foo)");
    }

    #[test]
    fn absent_and_unknown() {
        assert_eq!(dag_opt_expr(None), "null");
        let ext = Expr::Extension {
            kind: "lambda".into(),
        };
        assert_eq!(dag_expr(&ext), "(unknown expr lambda)");
        let nested = Expr::binary(Add, ext, Expr::int(1));
        assert_eq!(dag_expr(&nested), "(unknown expr lambda)+1");
    }

    #[test]
    fn equivalent_trees_render_identically() {
        let build = || {
            Expr::binary(
                Or,
                Expr::binary(Eq, p("a"), Expr::int(1)),
                Expr::binary(
                    And,
                    Expr::binary(Lt, Expr::binary(Add, p("b"), p("c")), Expr::int(10)),
                    Expr::unary(UnaryOp::Not, p("d")),
                ),
            )
        };
        let (a, b) = (build(), build());
        assert_eq!(dag_expr(&a), dag_expr(&b));
        assert_eq!(dag_expr(&a), "a==1 or b+c<10 and !d");
    }

    #[test]
    fn assignment_lists() {
        use crate::formatter::Canon;
        let mut c = Canon::new(2);
        c.assignments(&[
            Assignment::new(Some(p("a")), p("b")),
            Assignment::new(None, p("c")),
        ]);
        assert_eq!(c.finish(), "a:=b,c");
    }

    #[test]
    fn chained_comparisons_are_wrapped() {
        let cmp = Expr::binary(Eq, Expr::binary(Lt, p("a"), p("b")), p("c"));
        assert_eq!(dag_expr(&cmp), "(a<b)==c");
        let cmp = Expr::binary(Eq, p("a"), Expr::binary(Lt, p("b"), p("c")));
        assert_eq!(dag_expr(&cmp), "a==(b<c)");
        let member = Expr::binary(In, Expr::binary(Eq, p("a"), p("b")), p("s"));
        assert_eq!(dag_expr(&member), "(a==b) in s");
    }

    #[test]
    fn prefix_operator_under_selection() {
        let neg_of_dot = Expr::unary(UnaryOp::Neg, Expr::binary(Dot, p("a"), p("b")));
        let dot_of_neg = Expr::binary(Dot, Expr::unary(UnaryOp::Neg, p("a")), p("b"));
        assert_eq!(dag_expr(&neg_of_dot), "-a.b");
        assert_eq!(dag_expr(&dot_of_neg), "(-a).b");
        let idx = Expr::binary(Index, Expr::unary(UnaryOp::Not, p("a")), Expr::int(0));
        assert_eq!(dag_expr(&idx), "(!a)[0]");
    }

    #[test]
    fn filtered_agg_as_operand() {
        let agg = Expr::agg("sum", Some(p("x")), Some(p("ok")));
        assert_eq!(dag_expr(&Expr::binary(Dot, agg.clone(), p("y"))), "(sum(x) where ok).y");
        assert_eq!(dag_expr(&Expr::binary(Add, agg, Expr::int(1))), "(sum(x) where ok)+1");
        let plain = Expr::agg("count", None, None);
        assert_eq!(dag_expr(&Expr::binary(Add, plain, Expr::int(1))), "count()+1");
    }
}
