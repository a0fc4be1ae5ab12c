//! Free references, renaming and substitution.
//!
//! Binders scope as follows: an abstraction parameter over the body, a let
//! name over both the bound term and the body, and a case pattern's
//! variables over that alternative only. Once a binder shadows a name, the
//! whole subtree it scopes over is left alone.
//!
//! `replace` is shadow-aware but does not avoid capture: a free variable
//! of the replacement can be captured by a binder between the root and the
//! replaced occurrence. Callers that cannot rule this out should pre-rename
//! or use [`Term::replace_avoiding_capture`].

use std::collections::HashSet;

use crate::interner::Name;
use crate::ir::{Pattern, Term};

impl<A> Term<A> {
    /// Variable names referenced by this term that are not bound inside it,
    /// in pre-order, duplicates included.
    pub fn free_references(&self) -> Vec<Name> {
        let mut refs = Vec::new();
        collect_free(self, &mut refs);
        refs
    }

    pub fn references(&self, name: Name) -> bool {
        self.free_references().contains(&name)
    }

    /// Shadow-aware renaming of free occurrences of `target`. Each renamed
    /// occurrence keeps its annotation and flag.
    pub fn rename(self, target: Name, new_name: Name) -> Term<A> {
        self.substitute_free(target, &mut |ann: A, marked: bool, _: Name| Term::Variable {
            ann,
            marked,
            name: new_name,
        })
    }

    fn substitute_free<F>(self, target: Name, on_occurrence: &mut F) -> Term<A>
    where
        F: FnMut(A, bool, Name) -> Term<A>,
    {
        match self {
            Term::Variable { ann, marked, name } if name == target => {
                on_occurrence(ann, marked, name)
            }
            Term::Application { ann, func, arg } => {
                let func = (*func).substitute_free(target, on_occurrence);
                let arg = (*arg).substitute_free(target, on_occurrence);
                Term::app(ann, func, arg)
            }
            Term::Abstraction { ann, param, body } => {
                if param == target {
                    return Term::Abstraction { ann, param, body };
                }
                Term::abs(ann, param, (*body).substitute_free(target, on_occurrence))
            }
            Term::LetIn {
                ann,
                name,
                bound,
                body,
            } => {
                if name == target {
                    return Term::LetIn {
                        ann,
                        name,
                        bound,
                        body,
                    };
                }
                let bound = (*bound).substitute_free(target, on_occurrence);
                let body = (*body).substitute_free(target, on_occurrence);
                Term::let_in(ann, name, bound, body)
            }
            Term::Case {
                ann,
                scrutinee,
                alts,
            } => {
                let scrutinee = (*scrutinee).substitute_free(target, on_occurrence);
                let mut substituted = Vec::with_capacity(alts.len());
                for (pat, term) in alts {
                    if pat.binds(target) {
                        substituted.push((pat, term));
                    } else {
                        substituted.push((pat, term.substitute_free(target, on_occurrence)));
                    }
                }
                Term::case(ann, scrutinee, substituted)
            }
            Term::Fix { ann, body } => {
                Term::fix(ann, (*body).substitute_free(target, on_occurrence))
            }
            leaf => leaf,
        }
    }

    fn collect_names(&self, names: &mut HashSet<Name>) {
        match self {
            Term::Variable { name, .. } => {
                names.insert(*name);
            }
            Term::Abstraction { param, .. } => {
                names.insert(*param);
            }
            Term::LetIn { name, .. } => {
                names.insert(*name);
            }
            Term::Case { alts, .. } => {
                for (pat, _) in alts {
                    names.extend(pat.bound_names().iter().copied());
                }
            }
            _ => {}
        }
        for child in self.children() {
            child.collect_names(names);
        }
    }
}

impl<A: Clone> Term<A> {
    /// Replace every free occurrence of `target` with `replacement`.
    pub fn replace(self, target: Name, replacement: &Term<A>) -> Term<A> {
        self.substitute_free(target, &mut |_: A, _: bool, _: Name| replacement.clone())
    }

    /// Like [`Term::replace`], but a binder that would capture a free
    /// variable of `replacement` is first renamed to a fresh `name'<n>`.
    pub fn replace_avoiding_capture(self, target: Name, replacement: &Term<A>) -> Term<A> {
        let captured: HashSet<Name> = replacement.free_references().into_iter().collect();
        self.replace_avoiding(target, replacement, &captured)
    }

    fn replace_avoiding(self, target: Name, replacement: &Term<A>, captured: &HashSet<Name>) -> Term<A> {
        match self {
            Term::Variable { name, .. } if name == target => replacement.clone(),
            Term::Application { ann, func, arg } => {
                let func = (*func).replace_avoiding(target, replacement, captured);
                let arg = (*arg).replace_avoiding(target, replacement, captured);
                Term::app(ann, func, arg)
            }
            Term::Abstraction { ann, param, body } => {
                if param == target {
                    return Term::Abstraction { ann, param, body };
                }
                let mut body = *body;
                let mut param = param;
                if captured.contains(&param) && body.references(target) {
                    let fresh = fresh_name(param, captured, &[&body]);
                    body = body.rename(param, fresh);
                    param = fresh;
                }
                Term::abs(ann, param, body.replace_avoiding(target, replacement, captured))
            }
            Term::LetIn {
                ann,
                name,
                bound,
                body,
            } => {
                if name == target {
                    return Term::LetIn {
                        ann,
                        name,
                        bound,
                        body,
                    };
                }
                let (mut bound, mut body, mut name) = (*bound, *body, name);
                if captured.contains(&name) && (bound.references(target) || body.references(target)) {
                    let fresh = fresh_name(name, captured, &[&bound, &body]);
                    bound = bound.rename(name, fresh);
                    body = body.rename(name, fresh);
                    name = fresh;
                }
                let bound = bound.replace_avoiding(target, replacement, captured);
                let body = body.replace_avoiding(target, replacement, captured);
                Term::let_in(ann, name, bound, body)
            }
            Term::Case {
                ann,
                scrutinee,
                alts,
            } => {
                let scrutinee = (*scrutinee).replace_avoiding(target, replacement, captured);
                let mut substituted = Vec::with_capacity(alts.len());
                for (pat, term) in alts {
                    if pat.binds(target) {
                        substituted.push((pat, term));
                        continue;
                    }
                    let (pat, term) = freshen_alternative(pat, term, target, captured);
                    substituted.push((pat, term.replace_avoiding(target, replacement, captured)));
                }
                Term::case(ann, scrutinee, substituted)
            }
            Term::Fix { ann, body } => {
                Term::fix(ann, (*body).replace_avoiding(target, replacement, captured))
            }
            leaf => leaf,
        }
    }
}

fn collect_free<A>(term: &Term<A>, refs: &mut Vec<Name>) {
    match term {
        Term::Variable { name, .. } => refs.push(*name),
        Term::Literal { .. } | Term::Hardwired { .. } => {}
        Term::Application { func, arg, .. } => {
            collect_free(func, refs);
            collect_free(arg, refs);
        }
        Term::Abstraction { param, body, .. } => {
            let start = refs.len();
            collect_free(body, refs);
            drop_bound(refs, start, |name| name == *param);
        }
        Term::LetIn {
            name, bound, body, ..
        } => {
            let start = refs.len();
            collect_free(bound, refs);
            collect_free(body, refs);
            drop_bound(refs, start, |n| n == *name);
        }
        Term::Case {
            scrutinee, alts, ..
        } => {
            collect_free(scrutinee, refs);
            for (pat, alt) in alts {
                let start = refs.len();
                collect_free(alt, refs);
                drop_bound(refs, start, |n| pat.binds(n));
            }
        }
        Term::Fix { body, .. } => collect_free(body, refs),
    }
}

/// Remove every name collected since `start` that the binder shadows.
fn drop_bound(refs: &mut Vec<Name>, start: usize, is_bound: impl Fn(Name) -> bool) {
    let scoped = refs.split_off(start);
    refs.extend(scoped.into_iter().filter(|n| !is_bound(*n)));
}

fn fresh_name<A>(base: Name, captured: &HashSet<Name>, scopes: &[&Term<A>]) -> Name {
    let mut taken = captured.clone();
    for scope in scopes {
        scope.collect_names(&mut taken);
    }
    let base = base.as_string();
    let mut suffix = 1usize;
    loop {
        let candidate = Name::new(&format!("{}'{}", base, suffix));
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn freshen_alternative<A>(
    mut pat: Pattern,
    mut term: Term<A>,
    target: Name,
    captured: &HashSet<Name>,
) -> (Pattern, Term<A>) {
    if !term.references(target) {
        return (pat, term);
    }
    let clashing: Vec<Name> = pat
        .bound_names()
        .iter()
        .copied()
        .filter(|n| captured.contains(n))
        .collect();
    for old in clashing {
        let mut reserved = captured.clone();
        reserved.extend(pat.bound_names().iter().copied());
        let fresh = fresh_name(old, &reserved, &[&term]);
        pat = pat.rename_binder(old, fresh);
        term = term.rename(old, fresh);
    }
    (pat, term)
}
