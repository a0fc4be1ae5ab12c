use std::collections::HashMap;

use crate::interner::Name;
use crate::ir::Term;

/// One binding of a let group and the names its body references.
///
/// `references` is not filtered against the group: names bound outside
/// the group stay in the list and are ignored by the SCC pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode<A> {
    pub term: Term<A>,
    pub name: Name,
    pub references: Vec<Name>,
}

/// Call graph of a single let group, nodes in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CallGraph<A> {
    nodes: Vec<CallNode<A>>,
}

/// A strongly connected component, members as node indices in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub members: Vec<usize>,
    /// More than one member, or a single member that references itself.
    pub cyclic: bool,
}

/// Build the call graph for a binding group.
pub fn build_graph<A>(bindings: Vec<(Name, Term<A>)>) -> CallGraph<A> {
    let nodes = bindings
        .into_iter()
        .map(|(name, term)| {
            let references = term.free_references();
            log::trace!("binding {} references {} names", name, references.len());
            CallNode {
                term,
                name,
                references,
            }
        })
        .collect();
    CallGraph { nodes }
}

impl<A> CallGraph<A> {
    pub fn nodes(&self) -> &[CallNode<A>] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<CallNode<A>> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges restricted to the group, as node indices. Each target appears
    /// once, in order of first reference.
    fn edges(&self) -> Vec<Vec<usize>> {
        let idx_of: HashMap<Name, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.name, i))
            .collect();
        self.nodes
            .iter()
            .map(|node| {
                let mut targets = Vec::new();
                for name in &node.references {
                    if let Some(&w) = idx_of.get(name) {
                        if !targets.contains(&w) {
                            targets.push(w);
                        }
                    }
                }
                targets
            })
            .collect()
    }

    /// Strongly connected components in reverse topological order:
    /// every component comes after the components it depends on.
    pub fn components(&self) -> Vec<Component> {
        let edges = self.edges();
        tarjan_scc(&edges)
            .into_iter()
            .map(|mut members| {
                members.sort_unstable();
                let cyclic = members.len() > 1 || edges[members[0]].contains(&members[0]);
                Component { members, cyclic }
            })
            .collect()
    }
}

/// Compute strongly connected components using Tarjan's algorithm.
/// Returns SCCs in reverse topological order (leaves first).
fn tarjan_scc(edges: &[Vec<usize>]) -> Vec<Vec<usize>> {
    struct Tarjan<'a> {
        edges: &'a [Vec<usize>],
        index_counter: usize,
        stack: Vec<usize>,
        on_stack: Vec<bool>,
        index: Vec<usize>,
        lowlink: Vec<usize>,
        sccs: Vec<Vec<usize>>,
    }

    impl Tarjan<'_> {
        fn strongconnect(&mut self, v: usize) {
            self.index[v] = self.index_counter;
            self.lowlink[v] = self.index_counter;
            self.index_counter += 1;
            self.stack.push(v);
            self.on_stack[v] = true;

            let edges = self.edges;
            for &w in &edges[v] {
                if self.index[w] == usize::MAX {
                    self.strongconnect(w);
                    self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                } else if self.on_stack[w] {
                    self.lowlink[v] = self.lowlink[v].min(self.index[w]);
                }
            }

            if self.lowlink[v] == self.index[v] {
                let mut scc = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                self.sccs.push(scc);
            }
        }
    }

    let n = edges.len();
    let mut state = Tarjan {
        edges,
        index_counter: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        index: vec![usize::MAX; n],
        lowlink: vec![0; n],
        sccs: Vec::new(),
    };
    for v in 0..n {
        if state.index[v] == usize::MAX {
            state.strongconnect(v);
        }
    }
    state.sccs
}
