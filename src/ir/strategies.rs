//! Proptest generators shared by the term and recursion tests.

use proptest::prelude::*;

use crate::interner::Name;
use crate::ir::{Hardwired, Literal, Pattern, Term};

pub(crate) fn arb_name() -> impl Strategy<Value = Name> {
    prop::sample::select(vec!["x", "y", "z", "f", "g"]).prop_map(Name::new)
}

pub(crate) fn arb_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        arb_name().prop_map(Pattern::Variable),
        prop::collection::vec(arb_name(), 0..3)
            .prop_map(|args| Pattern::Constructor(Name::new("Con"), args)),
    ]
}

pub(crate) fn arb_term() -> impl Strategy<Value = Term<u32>> {
    let leaf = prop_oneof![
        (any::<u32>(), any::<i64>()).prop_map(|(ann, n)| Term::lit(ann, Literal::int(n))),
        (any::<u32>(), any::<bool>(), arb_name())
            .prop_map(|(ann, marked, name)| Term::Variable { ann, marked, name }),
        any::<u32>().prop_map(|ann| Term::hardwired(ann, Hardwired::Nil)),
    ];
    leaf.prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (any::<u32>(), inner.clone(), inner.clone())
                .prop_map(|(ann, func, arg)| Term::app(ann, func, arg)),
            (any::<u32>(), arb_name(), inner.clone())
                .prop_map(|(ann, param, body)| Term::abs(ann, param, body)),
            (any::<u32>(), arb_name(), inner.clone(), inner.clone())
                .prop_map(|(ann, name, bound, body)| Term::let_in(ann, name, bound, body)),
            (
                any::<u32>(),
                inner.clone(),
                prop::collection::vec((arb_pattern(), inner.clone()), 0..3)
            )
                .prop_map(|(ann, scrutinee, alts)| Term::case(ann, scrutinee, alts)),
            (any::<u32>(), inner).prop_map(|(ann, body)| Term::fix(ann, body)),
        ]
    })
}
