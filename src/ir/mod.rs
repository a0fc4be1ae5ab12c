//! Annotated lambda-calculus terms.
//!
//! `Term<A>` carries one annotation of type `A` at every node. The core
//! never looks inside annotations: parsers produce `Term<()>`, later passes
//! re-annotate through [`Term::map_annotations`] or pair annotations with
//! scoping information through [`adorn_names`].
//!
//! Every traversal in this module is pre-order: a node's own annotation is
//! visited before its children, and children are visited left to right
//! (function before argument, bound term before let body, scrutinee before
//! alternatives).

pub mod adorn;
pub mod literal;
pub mod pattern;
pub mod subst;

#[cfg(test)]
pub(crate) mod strategies;

use std::fmt;

use crate::interner::Name;

pub use adorn::{adorn_names, NameAdornment};
pub use literal::Literal;
pub use pattern::Pattern;

/// Built-in constructors that have no user-visible definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hardwired {
    /// N-ary tuple constructor.
    Tuple(usize),
    /// List cons `(:)`.
    Cons,
    /// Empty list `[]`.
    Nil,
}

impl fmt::Display for Hardwired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hardwired::Tuple(arity) => {
                f.write_str("(")?;
                for _ in 1..*arity {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Hardwired::Cons => f.write_str("(:)"),
            Hardwired::Nil => f.write_str("[]"),
        }
    }
}

/// A term of the intermediate language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term<A> {
    Literal {
        ann: A,
        lit: Literal,
    },
    /// `marked` is opaque to this crate and survives every transformation.
    Variable {
        ann: A,
        marked: bool,
        name: Name,
    },
    Hardwired {
        ann: A,
        value: Hardwired,
    },
    Application {
        ann: A,
        func: Box<Term<A>>,
        arg: Box<Term<A>>,
    },
    Abstraction {
        ann: A,
        param: Name,
        body: Box<Term<A>>,
    },
    LetIn {
        ann: A,
        name: Name,
        bound: Box<Term<A>>,
        body: Box<Term<A>>,
    },
    Case {
        ann: A,
        scrutinee: Box<Term<A>>,
        alts: Vec<(Pattern, Term<A>)>,
    },
    /// Explicit fixed point. Only the recursion linearizer introduces these.
    Fix {
        ann: A,
        body: Box<Term<A>>,
    },
}

impl<A> Term<A> {
    pub fn lit(ann: A, lit: Literal) -> Self {
        Term::Literal { ann, lit }
    }

    pub fn var(ann: A, name: Name) -> Self {
        Term::Variable {
            ann,
            marked: false,
            name,
        }
    }

    pub fn marked_var(ann: A, name: Name) -> Self {
        Term::Variable {
            ann,
            marked: true,
            name,
        }
    }

    pub fn hardwired(ann: A, value: Hardwired) -> Self {
        Term::Hardwired { ann, value }
    }

    pub fn app(ann: A, func: Term<A>, arg: Term<A>) -> Self {
        Term::Application {
            ann,
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    pub fn abs(ann: A, param: Name, body: Term<A>) -> Self {
        Term::Abstraction {
            ann,
            param,
            body: Box::new(body),
        }
    }

    pub fn let_in(ann: A, name: Name, bound: Term<A>, body: Term<A>) -> Self {
        Term::LetIn {
            ann,
            name,
            bound: Box::new(bound),
            body: Box::new(body),
        }
    }

    pub fn case(ann: A, scrutinee: Term<A>, alts: Vec<(Pattern, Term<A>)>) -> Self {
        Term::Case {
            ann,
            scrutinee: Box::new(scrutinee),
            alts,
        }
    }

    pub fn fix(ann: A, body: Term<A>) -> Self {
        Term::Fix {
            ann,
            body: Box::new(body),
        }
    }

    pub fn annotation(&self) -> &A {
        match self {
            Term::Literal { ann, .. }
            | Term::Variable { ann, .. }
            | Term::Hardwired { ann, .. }
            | Term::Application { ann, .. }
            | Term::Abstraction { ann, .. }
            | Term::LetIn { ann, .. }
            | Term::Case { ann, .. }
            | Term::Fix { ann, .. } => ann,
        }
    }

    pub fn annotation_mut(&mut self) -> &mut A {
        match self {
            Term::Literal { ann, .. }
            | Term::Variable { ann, .. }
            | Term::Hardwired { ann, .. }
            | Term::Application { ann, .. }
            | Term::Abstraction { ann, .. }
            | Term::LetIn { ann, .. }
            | Term::Case { ann, .. }
            | Term::Fix { ann, .. } => ann,
        }
    }

    /// Direct subterms in traversal order.
    pub fn children(&self) -> Vec<&Term<A>> {
        match self {
            Term::Literal { .. } | Term::Variable { .. } | Term::Hardwired { .. } => Vec::new(),
            Term::Application { func, arg, .. } => vec![func.as_ref(), arg.as_ref()],
            Term::Abstraction { body, .. } | Term::Fix { body, .. } => vec![body.as_ref()],
            Term::LetIn { bound, body, .. } => vec![bound.as_ref(), body.as_ref()],
            Term::Case {
                scrutinee, alts, ..
            } => {
                let mut children = Vec::with_capacity(alts.len() + 1);
                children.push(scrutinee.as_ref());
                children.extend(alts.iter().map(|(_, term)| term));
                children
            }
        }
    }

    /// Replace every annotation, calling `f` once per node in pre-order.
    /// The shape and every non-annotation payload are kept as they are.
    pub fn map_annotations<B, F: FnMut(A) -> B>(self, mut f: F) -> Term<B> {
        self.map_with(&mut f)
    }

    fn map_with<B, F: FnMut(A) -> B>(self, f: &mut F) -> Term<B> {
        match self {
            Term::Literal { ann, lit } => Term::Literal { ann: f(ann), lit },
            Term::Variable { ann, marked, name } => Term::Variable {
                ann: f(ann),
                marked,
                name,
            },
            Term::Hardwired { ann, value } => Term::Hardwired { ann: f(ann), value },
            Term::Application { ann, func, arg } => {
                let ann = f(ann);
                let func = (*func).map_with(f);
                let arg = (*arg).map_with(f);
                Term::app(ann, func, arg)
            }
            Term::Abstraction { ann, param, body } => {
                let ann = f(ann);
                Term::abs(ann, param, (*body).map_with(f))
            }
            Term::LetIn {
                ann,
                name,
                bound,
                body,
            } => {
                let ann = f(ann);
                let bound = (*bound).map_with(f);
                let body = (*body).map_with(f);
                Term::let_in(ann, name, bound, body)
            }
            Term::Case {
                ann,
                scrutinee,
                alts,
            } => {
                let ann = f(ann);
                let scrutinee = (*scrutinee).map_with(f);
                let mut mapped = Vec::with_capacity(alts.len());
                for (pat, term) in alts {
                    mapped.push((pat, term.map_with(f)));
                }
                Term::case(ann, scrutinee, mapped)
            }
            Term::Fix { ann, body } => {
                let ann = f(ann);
                Term::fix(ann, (*body).map_with(f))
            }
        }
    }

    /// Left fold over annotations in pre-order.
    pub fn fold<'a, B, F: FnMut(B, &'a A) -> B>(&'a self, init: B, mut f: F) -> B {
        self.fold_with(init, &mut f)
    }

    fn fold_with<'a, B, F: FnMut(B, &'a A) -> B>(&'a self, acc: B, f: &mut F) -> B {
        let mut acc = f(acc, self.annotation());
        for child in self.children() {
            acc = child.fold_with(acc, f);
        }
        acc
    }

    /// All annotations, in pre-order.
    pub fn annotations(&self) -> Vec<&A> {
        self.fold(Vec::new(), |mut acc, ann| {
            acc.push(ann);
            acc
        })
    }

    pub fn contains_fix(&self) -> bool {
        matches!(self, Term::Fix { .. }) || self.children().iter().any(|c| c.contains_fix())
    }

    /// `f -1` would read as subtraction.
    fn is_negative_literal(&self) -> bool {
        matches!(self, Term::Literal { lit, .. } if lit.is_negative())
    }

    fn is_atomic(&self) -> bool {
        matches!(
            self,
            Term::Literal { .. } | Term::Variable { .. } | Term::Hardwired { .. }
        )
    }
}

impl<A: Clone> Term<A> {
    /// `head arg1 arg2 ...`, every new application node annotated with `ann`.
    pub fn apply_all(ann: A, head: Term<A>, args: impl IntoIterator<Item = Term<A>>) -> Self {
        args.into_iter()
            .fold(head, |func, arg| Term::app(ann.clone(), func, arg))
    }
}

fn write_parenthesized<A>(term: &Term<A>, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({})", term)
    } else {
        write!(f, "{}", term)
    }
}

impl<A> fmt::Display for Term<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal { lit, .. } => write!(f, "{}", lit),
            Term::Variable { name, .. } => write!(f, "{}", name),
            Term::Hardwired { value, .. } => write!(f, "{}", value),
            Term::Application { func, arg, .. } => {
                let func_parens = func.is_negative_literal()
                    || (!func.is_atomic() && !matches!(**func, Term::Application { .. }));
                write_parenthesized(func, f, func_parens)?;
                f.write_str(" ")?;
                write_parenthesized(arg, f, !arg.is_atomic() || arg.is_negative_literal())
            }
            Term::Abstraction { param, body, .. } => write!(f, "\\{} -> {}", param, body),
            Term::LetIn {
                name, bound, body, ..
            } => write!(f, "let {} = {} in {}", name, bound, body),
            Term::Case {
                scrutinee, alts, ..
            } => {
                write!(f, "case {} of {{", scrutinee)?;
                for (i, (pat, term)) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, " {} -> {}", pat, term)?;
                }
                if alts.is_empty() {
                    f.write_str("}")
                } else {
                    f.write_str(" }")
                }
            }
            Term::Fix { body, .. } => {
                f.write_str("fix ")?;
                write_parenthesized(body, f, !body.is_atomic())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Term<()> {
        Term::var((), Name::new(name))
    }

    fn sample() -> Term<u32> {
        // let f = \x -> x in case f 1 of { y -> y }
        Term::let_in(
            0,
            Name::new("f"),
            Term::abs(1, Name::new("x"), Term::var(2, Name::new("x"))),
            Term::case(
                3,
                Term::app(4, Term::var(5, Name::new("f")), Term::lit(6, Literal::int(1))),
                vec![(Pattern::Variable(Name::new("y")), Term::var(7, Name::new("y")))],
            ),
        )
    }

    #[test]
    fn test_annotations_are_preorder() {
        let anns: Vec<u32> = sample().annotations().into_iter().copied().collect();
        assert_eq!(anns, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_map_visits_in_preorder() {
        let mut seen = Vec::new();
        let mapped = sample().map_annotations(|ann| {
            seen.push(ann);
            ann.to_string()
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(mapped.annotation(), "0");
        assert_eq!(mapped.to_string(), sample().to_string());
    }

    #[test]
    fn test_map_preserves_variable_flag() {
        let term = Term::marked_var(1u8, Name::new("k"));
        match term.map_annotations(|a| a as u32 * 2) {
            Term::Variable { ann, marked, name } => {
                assert_eq!(ann, 2);
                assert!(marked);
                assert_eq!(name, Name::new("k"));
            }
            other => panic!("expected variable, got {}", other),
        }
    }

    #[test]
    fn test_fold_sums() {
        assert_eq!(sample().fold(0, |acc, ann| acc + ann), 28);
    }

    #[test]
    fn test_render_application_spine() {
        let term = Term::apply_all((), var("f"), vec![var("x"), Term::app((), var("g"), var("y"))]);
        assert_eq!(term.to_string(), "f x (g y)");

        let lam = Term::app((), Term::abs((), Name::new("x"), var("x")), var("z"));
        assert_eq!(lam.to_string(), "(\\x -> x) z");
    }

    #[test]
    fn test_render_negative_operands() {
        let neg = Term::app((), var("f"), Term::lit((), Literal::int(-1)));
        assert_eq!(neg.to_string(), "f (-1)");

        let half = Literal::ratio(-1, 2).unwrap();
        let term = Term::apply_all((), var("g"), vec![Term::lit((), half), Term::lit((), Literal::int(2))]);
        assert_eq!(term.to_string(), "g (-0.5) 2");

        let head = Term::app((), Term::lit((), Literal::int(-4)), var("x"));
        assert_eq!(head.to_string(), "(-4) x");
        assert_eq!(Term::<()>::lit((), Literal::int(-4)).to_string(), "-4");
    }

    #[test]
    fn test_render_binders() {
        assert_eq!(
            sample().to_string(),
            "let f = \\x -> x in case f 1 of { y -> y }"
        );
        let fixed = Term::fix((), Term::abs((), Name::new("s"), var("s")));
        assert_eq!(fixed.to_string(), "fix (\\s -> s)");
        assert_eq!(Term::case((), var("s"), vec![]).to_string(), "case s of {}");
    }

    #[test]
    fn test_render_hardwired() {
        assert_eq!(Hardwired::Tuple(3).to_string(), "(,,)");
        assert_eq!(Hardwired::Tuple(2).to_string(), "(,)");
        let list = Term::apply_all(
            (),
            Term::hardwired((), Hardwired::Cons),
            vec![Term::lit((), Literal::int(1)), Term::hardwired((), Hardwired::Nil)],
        );
        assert_eq!(list.to_string(), "(:) 1 []");
    }

    #[test]
    fn test_contains_fix() {
        assert!(!sample().contains_fix());
        let nested = Term::app((), var("f"), Term::fix((), var("g")));
        assert!(nested.contains_fix());
    }

    mod proptests {
        use super::*;
        use crate::ir::strategies::arb_term;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_identity_map_is_identity(term in arb_term()) {
                prop_assert_eq!(term.clone().map_annotations(|ann| ann), term);
            }

            #[test]
            fn prop_traversal_order_is_deterministic(term in arb_term()) {
                let first = term.annotations();
                let second = term.annotations();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn prop_map_and_fold_agree_on_order(term in arb_term()) {
                let mut counter = 0usize;
                let numbered = term.map_annotations(|_| {
                    counter += 1;
                    counter - 1
                });
                let order: Vec<usize> = numbered.annotations().into_iter().copied().collect();
                prop_assert_eq!(order, (0..counter).collect::<Vec<_>>());
            }
        }
    }
}
