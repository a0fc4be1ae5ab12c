//! Recursion removal for a single let group.
//!
//! A cyclic component `m0 .. m(k-1)` becomes, for each member `mi`:
//!
//! ```text
//! @mi@ = \m0@mi -> .. -> \m(k-1)@mi -> body_i[mj := mj@mi]
//! mi   = fix (\@Fi@mi -> let solvers in let values in @mi@ m0 .. m(i-1) @Fi@mi @F(i+1)@m(i+1) .. @F(k-1)@m(k-1))
//! ```
//!
//! Members before `mi` are already emitted and passed by name. Later
//! members are solved inside the knot: the solver
//!
//! ```text
//! @Sj@mj = \@F0@m0 -> .. -> \@F(j-1)@m(j-1) -> fix (\@Fj@mj -> let values in lifted_j ..)
//! ```
//!
//! yields `mj` once every earlier member is fixed, and each value
//! `@Fl@ml = @Sl@ml @F0@m0 .. @F(l-1)@m(l-1)` is let-bound once. Solvers
//! inline the lifted body of their member, because its helper binding is
//! only emitted later. Every solver and value is bound exactly once, so a
//! group of `k` members produces `O(k^2)` solver copies and `O(k^4)` nodes
//! of application spine in total.

use crate::interner::Name;
use crate::ir::Term;
use crate::recursion::graph::CallGraph;

fn helper_name(member: Name) -> Name {
    Name::new(&format!("@{}@", member))
}

fn lifted_param(member: Name, owner: Name) -> Name {
    Name::new(&format!("{}@{}", member, owner))
}

fn self_param(index: usize, member: Name) -> Name {
    Name::new(&format!("@F{}@{}", index, member))
}

fn solver_name(index: usize, member: Name) -> Name {
    Name::new(&format!("@S{}@{}", index, member))
}

/// Turn the bindings of a call graph into an ordered, acyclic list.
///
/// No binding in the result references a binding of the same group that
/// comes later in the list; all recursion inside the group goes through
/// `Fix` nodes. Acyclic bindings pass through unchanged.
pub fn fix_recursion<A: Clone>(graph: CallGraph<A>) -> Vec<(Name, Term<A>)> {
    let components = graph.components();
    log::debug!(
        "fix_recursion: {} bindings in {} components",
        graph.len(),
        components.len()
    );

    let mut slots: Vec<Option<(Name, Term<A>)>> = graph
        .into_nodes()
        .into_iter()
        .map(|node| Some((node.name, node.term)))
        .collect();
    let mut ordered = Vec::with_capacity(slots.len());

    for component in components {
        let members: Vec<(Name, Term<A>)> = component
            .members
            .iter()
            .filter_map(|&i| slots[i].take())
            .collect();
        if component.cyclic {
            log::debug!(
                "tying recursive group [{}]",
                members
                    .iter()
                    .map(|(name, _)| name.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            ordered.extend(KnotGroup::new(members).linearize());
        } else {
            for (name, term) in members {
                log::trace!("{} is not recursive", name);
                ordered.push((name, term));
            }
        }
    }
    ordered
}

/// A cyclic component after lambda lifting.
struct KnotGroup<A> {
    names: Vec<Name>,
    /// Root annotation of each member's original body; reused for every
    /// node synthesized on that member's behalf.
    anns: Vec<A>,
    lifted: Vec<Term<A>>,
}

impl<A: Clone> KnotGroup<A> {
    fn new(members: Vec<(Name, Term<A>)>) -> Self {
        let names: Vec<Name> = members.iter().map(|(name, _)| *name).collect();
        let anns = members
            .iter()
            .map(|(_, term)| term.annotation().clone())
            .collect();
        let lifted = members
            .into_iter()
            .map(|(owner, body)| lambda_lift(&names, owner, body))
            .collect();
        KnotGroup {
            names,
            anns,
            lifted,
        }
    }

    fn linearize(self) -> Vec<(Name, Term<A>)> {
        let k = self.names.len();
        let mut out = Vec::with_capacity(2 * k);
        for i in 0..k {
            let emitted = (0..i)
                .map(|j| Term::var(self.anns[j].clone(), self.names[j]))
                .collect();
            let helper = Term::var(self.anns[i].clone(), helper_name(self.names[i]));
            let (param, body) = self.knot(i, helper, emitted);
            let body = (i + 1..k).fold(body, |inner, later| {
                Term::let_in(
                    self.anns[later].clone(),
                    solver_name(later, self.names[later]),
                    self.solver(later),
                    inner,
                )
            });
            let ann = &self.anns[i];
            let fixed = Term::fix(ann.clone(), Term::abs(ann.clone(), param, body));
            out.push((helper_name(self.names[i]), self.lifted[i].clone()));
            out.push((self.names[i], fixed));
        }
        out
    }

    /// Self-parameter and body of the knot for `member`, where `scope`
    /// holds the values of every earlier member. The body let-binds the
    /// values of later members through their solvers, then applies `head`
    /// to all `k` values.
    fn knot(&self, member: usize, head: Term<A>, mut scope: Vec<Term<A>>) -> (Name, Term<A>) {
        let param = self_param(member, self.names[member]);
        scope.push(Term::var(self.anns[member].clone(), param));

        let mut values = Vec::new();
        for later in member + 1..self.names.len() {
            let ann = &self.anns[later];
            let solver = Term::var(ann.clone(), solver_name(later, self.names[later]));
            let value = Term::apply_all(ann.clone(), solver, scope.iter().cloned());
            let value_name = self_param(later, self.names[later]);
            values.push((value_name, value));
            scope.push(Term::var(ann.clone(), value_name));
        }

        let body = Term::apply_all(self.anns[member].clone(), head, scope);
        let body = values.into_iter().rev().fold(body, |inner, (name, value)| {
            Term::let_in(value.annotation().clone(), name, value, inner)
        });
        (param, body)
    }

    /// `\@F0@m0 -> .. -> \@F(j-1)@m(j-1) -> fix (..)`: the value of member
    /// `j` given the values of the members before it.
    fn solver(&self, member: usize) -> Term<A> {
        let ann = &self.anns[member];
        let params: Vec<Name> = (0..member)
            .map(|j| self_param(j, self.names[j]))
            .collect();
        let scope = (0..member)
            .map(|j| Term::var(self.anns[j].clone(), params[j]))
            .collect();
        let (param, body) = self.knot(member, self.lifted[member].clone(), scope);
        let fixed = Term::fix(ann.clone(), Term::abs(ann.clone(), param, body));
        params
            .into_iter()
            .rev()
            .fold(fixed, |inner, param| Term::abs(ann.clone(), param, inner))
    }
}

/// Abstract every group member out of `owner`'s body. The outermost
/// parameter stands for the first member.
fn lambda_lift<A: Clone>(names: &[Name], owner: Name, body: Term<A>) -> Term<A> {
    let ann = body.annotation().clone();
    let params: Vec<Name> = names.iter().map(|&m| lifted_param(m, owner)).collect();
    let renamed = names
        .iter()
        .zip(&params)
        .fold(body, |term, (&member, &param)| term.rename(member, param));
    params
        .iter()
        .rev()
        .fold(renamed, |term, &param| Term::abs(ann.clone(), param, term))
}
