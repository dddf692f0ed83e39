//! Surface-syntax printing for expressions and declarations.
use crate::{
    decls::{Decl, SymbolDecl},
    expr::{Binder, Expr, NaryOp, Quantifier, UnaryOp},
};

/// Binding strength of the outermost operator of `e`. Higher binds tighter.
fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Quantifier { .. } | Expr::IfThenElse { .. } => 1,
        Expr::Binary { op, .. } if op.is_implies() || op.is_iff() => 2,
        Expr::Nary { args, .. } if args.is_empty() => 7,
        Expr::Nary { op: NaryOp::Or, .. } => 3,
        Expr::Nary { op: NaryOp::And, .. } => 4,
        Expr::Binary { .. } => 5,
        Expr::Unary { op: UnaryOp::Not, .. } => 6,
        Expr::Bool(_) | Expr::Id(_) | Expr::App { .. } | Expr::Unary { .. } => 7,
    }
}

/// Print `e`, parenthesized unless it binds strictly tighter than `min`.
fn fmt_operand(e: &Expr, min: u8, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if precedence(e) > min {
        write!(f, "{}", e)
    } else {
        write!(f, "({})", e)
    }
}

fn fmt_args(args: &[Expr], f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", a)?;
    }
    Ok(())
}

impl std::fmt::Display for Binder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.vs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", v.name, v.sort)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Bool(b) => write!(f, "{}", b),
            Expr::Id(name) => write!(f, "{}", name),
            Expr::App { callee, args } => {
                write!(f, "{}(", callee)?;
                fmt_args(args, f)?;
                write!(f, ")")
            }
            Expr::Unary {
                op: UnaryOp::Old,
                arg,
            } => write!(f, "old({})", arg),
            Expr::Unary {
                op: UnaryOp::Not,
                arg,
            } => {
                write!(f, "!")?;
                fmt_operand(arg, precedence(self) - 1, f)
            }
            Expr::Binary { op, lhs, rhs } => {
                let op: &'static str = (*op).into();
                fmt_operand(lhs, precedence(self), f)?;
                write!(f, " {} ", op)?;
                fmt_operand(rhs, precedence(self), f)
            }
            Expr::Nary { op, args } if args.is_empty() => match op {
                NaryOp::And => write!(f, "true"),
                NaryOp::Or => write!(f, "false"),
            },
            Expr::Nary { op, args } => {
                let sep: &'static str = (*op).into();
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", sep)?;
                    }
                    fmt_operand(a, precedence(self), f)?;
                }
                Ok(())
            }
            Expr::Quantifier {
                quant,
                binder,
                body,
            } => {
                let quant: &'static str = (*quant).into();
                write!(f, "{} {}. {}", quant, binder, body)
            }
            Expr::IfThenElse { branch, then, els } => {
                write!(f, "if {} then {} else {}", branch, then, els)
            }
        }
    }
}

impl std::fmt::Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for SymbolDecl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_mutable() {
            write!(f, "mutable ")?;
        } else {
            write!(f, "immutable ")?;
        }

        let sorts = |f: &mut std::fmt::Formatter<'_>| -> std::fmt::Result {
            for (i, s) in self.arity().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", s)?;
            }
            Ok(())
        };

        match self {
            SymbolDecl::Constant(c) => write!(f, "constant {}: {}", c.name, c.sort),
            SymbolDecl::Relation(r) => {
                if r.is_derived() {
                    write!(f, "derived ")?;
                }
                write!(f, "relation {}(", r.name)?;
                sorts(f)?;
                write!(f, ")")
            }
            SymbolDecl::Function(func) => {
                write!(f, "function {}(", func.name)?;
                sorts(f)?;
                write!(f, "): {}", func.sort)
            }
        }
    }
}

impl std::fmt::Display for Decl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decl::Sort(s) => write!(f, "sort {}", s.name),
            Decl::Definition(d) => {
                if d.two_state {
                    write!(f, "transition ")?;
                } else {
                    write!(f, "definition ")?;
                }
                write!(f, "{}({})", d.name, d.binder)?;
                if !d.mods.is_empty() {
                    write!(f, " modifies ")?;
                    for (i, m) in d.mods.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", m.name)?;
                    }
                }
                write!(f, " = {}", d.body)
            }
            Decl::Constant(c) => write!(f, "{}", SymbolDecl::Constant(c)),
            Decl::Relation(r) => write!(f, "{}", SymbolDecl::Relation(r)),
            Decl::Function(func) => write!(f, "{}", SymbolDecl::Function(func)),
        }
    }
}
