//! Binding-group analysis and recursion removal.
//!
//! A let group goes through three steps:
//! 1. [`build_graph`] records which names each binding's body references.
//! 2. [`fix_recursion`] splits the graph into strongly connected components
//!    and rewrites every recursive component into `Fix` terms, producing an
//!    ordered list in which no binding refers to a later one.
//! 3. [`let_group`] nests that list into `LetIn` terms around a body.

pub mod fix;
pub mod graph;

use crate::interner::Name;
use crate::ir::Term;

pub use fix::fix_recursion;
pub use graph::{build_graph, CallGraph, CallNode, Component};

/// Linearize `bindings` and wrap them around `body` as nested lets.
///
/// The first binding of the linearized order is the outermost let, so
/// every binding is in scope for the ones after it and for `body`. Each
/// let node takes the annotation of the term it binds.
pub fn let_group<A: Clone>(bindings: Vec<(Name, Term<A>)>, body: Term<A>) -> Term<A> {
    fix_recursion(build_graph(bindings))
        .into_iter()
        .rev()
        .fold(body, |inner, (name, bound)| {
            let ann = bound.annotation().clone();
            Term::let_in(ann, name, bound, inner)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Literal;

    fn n(name: &str) -> Name {
        Name::new(name)
    }

    #[test]
    fn test_empty_group_is_body() {
        let body = Term::lit((), Literal::int(3));
        assert_eq!(let_group(vec![], body.clone()), body);
    }

    #[test]
    fn test_first_binding_is_outermost() {
        let bindings = vec![
            (n("y"), Term::var((), n("x"))),
            (n("x"), Term::lit((), Literal::int(1))),
        ];
        let term = let_group(bindings, Term::var((), n("y")));
        assert_eq!(term.to_string(), "let x = 1 in let y = x in y");
        assert!(term.free_references().is_empty());
    }

    #[test]
    fn test_recursive_group_is_closed() {
        let bindings = vec![
            (n("ping"), Term::abs((), n("k"), Term::app((), Term::var((), n("pong")), Term::var((), n("k"))))),
            (n("pong"), Term::abs((), n("k"), Term::app((), Term::var((), n("ping")), Term::var((), n("k"))))),
        ];
        let term = let_group(bindings, Term::var((), n("ping")));
        assert!(term.free_references().is_empty());
        assert!(term.contains_fix());
    }
}
