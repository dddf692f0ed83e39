//! RcDoc-based pretty-printer with termcolor annotations for `Formula` and `Term`.
//!
//! Role
//! - Convert a formula into an annotated document suitable for rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Layout
//! - Formulas are printed on a single line. Quantifiers extend as far right as
//!   possible, so a quantifier body is never parenthesized.
//! - `Not(Equal(a, b))` is printed as `a != b`; the empty conjunction and the
//!   empty disjunction are printed as `true` and `false`.

use crate::formula::{Formula, FormulaKind, Term};
use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, colons, periods
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // forall, exists, true, false
    Operator, // &, |, !, ->, <->, =, !=
    Ident,    // variables and constants
    Symbol,   // relations and functions
    Sort,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Symbol => {
                s.set_fg(Some(Color::Blue)).set_bold(true);
            }
            Style::Sort => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

fn styled(style: Style, s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Operator, s)
}

fn ident(v: &str) -> RcDoc<'static, Style> {
    RcDoc::as_string(v).annotate(Style::Ident)
}

fn symbol(v: &str) -> RcDoc<'static, Style> {
    RcDoc::as_string(v).annotate(Style::Symbol)
}

fn sort(v: &str) -> RcDoc<'static, Style> {
    RcDoc::as_string(v).annotate(Style::Sort)
}

/// Printing category of a formula. Disequalities are printed like equalities.
fn kind_of(f: &Formula) -> FormulaKind {
    match f {
        Formula::And(args) | Formula::Or(args) if args.is_empty() => FormulaKind::Relation,
        Formula::Not(inner) if inner.is_equal() => FormulaKind::Equal,
        _ => FormulaKind::from(f),
    }
}

fn calculate_precedence(k: FormulaKind) -> u8 {
    use FormulaKind::*;

    match k {
        Forall | Exists => 1,
        Implies | Iff => 2,
        Or => 3,
        And => 4,
        Equal => 5,
        Not => 6,
        Relation => 255,
    }
}

#[inline]
fn requires_parens(current: FormulaKind, parent: FormulaKind) -> bool {
    let allow_self = !matches!(
        current,
        FormulaKind::Implies | FormulaKind::Iff | FormulaKind::Equal
    );
    let current_prec = calculate_precedence(current);
    let parent_prec = calculate_precedence(parent);
    (parent_prec > current_prec)
        || (parent_prec == current_prec && current != parent)
        || (parent_prec == current_prec && !allow_self)
}

#[inline]
fn to_doc_parenthesized_with_depth(
    f: &Formula,
    parent: FormulaKind,
    depth: u8,
) -> RcDoc<'static, Style> {
    if requires_parens(kind_of(f), parent) {
        lparen(depth)
            .append(to_doc_with_depth(f, depth + 1))
            .append(rparen(depth))
    } else {
        to_doc_with_depth(f, depth)
    }
}

fn args_doc(args: &[Term], depth: u8) -> RcDoc<'static, Style> {
    lparen(depth)
        .append(RcDoc::intersperse(
            args.iter().map(|a| term_doc(a, depth + 1)),
            punct(", "),
        ))
        .append(rparen(depth))
}

fn term_doc(t: &Term, depth: u8) -> RcDoc<'static, Style> {
    match t {
        Term::Var(v) => ident(v),
        Term::Func { name, args } => symbol(name).append(args_doc(args, depth)),
    }
}

fn infix(
    lhs: &Formula,
    operator: &'static str,
    rhs: &Formula,
    kind: FormulaKind,
    depth: u8,
) -> RcDoc<'static, Style> {
    to_doc_parenthesized_with_depth(lhs, kind, depth)
        .append(RcDoc::space())
        .append(op(operator))
        .append(RcDoc::space())
        .append(to_doc_parenthesized_with_depth(rhs, kind, depth))
}

fn nary(args: &[Formula], operator: &'static str, depth: u8) -> RcDoc<'static, Style> {
    let kind = if operator == "&" {
        FormulaKind::And
    } else {
        FormulaKind::Or
    };
    RcDoc::intersperse(
        args.iter()
            .map(|a| to_doc_parenthesized_with_depth(a, kind, depth)),
        RcDoc::space().append(op(operator)).append(RcDoc::space()),
    )
}

fn quantifier(
    keyword: &'static str,
    var: &str,
    s: &str,
    body: &Formula,
    depth: u8,
) -> RcDoc<'static, Style> {
    kw(keyword)
        .append(RcDoc::space())
        .append(ident(var))
        .append(punct(":"))
        .append(sort(s))
        .append(punct("."))
        .append(RcDoc::space())
        .append(to_doc_with_depth(body, depth))
}

/// Depth-aware conversion that colors parentheses by nesting level.
fn to_doc_with_depth(f: &Formula, depth: u8) -> RcDoc<'static, Style> {
    match f {
        Formula::And(args) if args.is_empty() => kw("true"),
        Formula::Or(args) if args.is_empty() => kw("false"),
        Formula::And(args) => nary(args, "&", depth),
        Formula::Or(args) => nary(args, "|", depth),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Equal(a, b) => term_doc(a, depth)
                .append(RcDoc::space())
                .append(op("!="))
                .append(RcDoc::space())
                .append(term_doc(b, depth)),
            _ => op("!").append(to_doc_parenthesized_with_depth(
                inner,
                FormulaKind::Not,
                depth,
            )),
        },
        Formula::Implies(a, b) => infix(a, "->", b, FormulaKind::Implies, depth),
        Formula::Iff(a, b) => infix(a, "<->", b, FormulaKind::Iff, depth),
        Formula::Equal(a, b) => term_doc(a, depth)
            .append(RcDoc::space())
            .append(op("="))
            .append(RcDoc::space())
            .append(term_doc(b, depth)),
        Formula::Relation { name, args } if args.is_empty() => symbol(name),
        Formula::Relation { name, args } => symbol(name).append(args_doc(args, depth)),
        Formula::Forall { var, sort, body } => quantifier("forall", var, sort, body, depth),
        Formula::Exists { var, sort, body } => quantifier("exists", var, sort, body, depth),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for formulas and terms.
pub trait PrettyFormula {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    /// Print to stdout with colors (TTY-aware), at auto-detected width (or 80 if not a TTY).
    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(terminal_width(), &mut stdout)?;
        writeln!(stdout)
    }

    /// Format into a plain string (no colors).
    fn pretty_string(&self) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(80, &mut buf);
        buf
    }
}

impl PrettyFormula for Formula {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }
}

impl PrettyFormula for Term {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        term_doc(self, 0)
    }
}

macro_rules! impl_display_for_type {
    ($t:ident) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut w = FmtWrite::new(f);
                let doc = self.pretty_doc();
                doc.render_raw(80, &mut w)
            }
        }
    };
}

impl_display_for_type!(Formula);
impl_display_for_type!(Term);

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &str, v: &str) -> Formula {
        Formula::relation(name, [Term::var(v)])
    }

    #[test]
    fn quantifier_body_is_not_parenthesized() {
        let f = Formula::forall("n", "Node", Formula::iff(r("R'", "n"), Formula::not(r("R", "n"))));
        assert_eq!(f.to_string(), "forall n:Node. R'(n) <-> !R(n)");
    }

    #[test]
    fn connectives_and_disequality() {
        let f = Formula::and([
            Formula::or([r("p", "x"), r("q", "x")]),
            Formula::not(Formula::equal(Term::var("x"), Term::var("y"))),
            Formula::not(Formula::and([r("p", "x"), r("q", "y")])),
            Formula::implies(Formula::top(), Formula::bottom()),
        ]);
        assert_eq!(
            f.to_string(),
            "(p(x) | q(x)) & x != y & !(p(x) & q(y)) & (true -> false)"
        );
    }

    #[test]
    fn nested_quantifiers_in_conjunctions() {
        let f = Formula::and([
            Formula::exists("x", "Node", Formula::forall("y", "Node", r("R", "y"))),
            Formula::relation("flag", []),
        ]);
        assert_eq!(f.to_string(), "(exists x:Node. forall y:Node. R(y)) & flag");
        assert_eq!(f.pretty_string(), f.to_string());
    }

    #[test]
    fn terms() {
        let t = Term::func("f", [Term::var("x"), Term::func("g", [Term::var("c")])]);
        assert_eq!(t.to_string(), "f(x, g(c))");
    }
}
