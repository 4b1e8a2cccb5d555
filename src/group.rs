//! The chip-firing group, enumerated once as a Cayley graph.
//!
//! The group has 162 elements, the equivalence classes of configurations, and each element is stored under its
//! nice representative (see [`canonical`](crate::canonical)).
//!
//! Moves act trivially on classes: a move never changes the class of the configuration it is applied to.
//! What a sequence of moves does determine is its firing script, the per-vertex sum of the letters' units
//! (see [`Letter::unit`](crate::Letter::unit)), and the script is itself a configuration with a class.
//! The Cayley graph tracks exactly that: the edge for move `m` at vertex `v` leads from an element to the element
//! one unit `m` at `v` further along. The path to an element is therefore a shortest move sequence whose firing
//! script lies in that element's class, and playing that sequence from the zero configuration produces a
//! configuration that no shorter sequence reaches.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::canonical::nice_representative;
use crate::configuration::{Configuration, Vertex};
use crate::error::{Error, Result};
use crate::moves::Move;

/// Number of elements of the chip-firing group on the pentagon.
pub const GROUP_ORDER: usize = 162;

/// Number of edges leaving every element: five vertices times four letters.
pub const BRANCHING: usize = 20;

/// One element of the group, as stored in the Cayley graph.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Element {
    /// The nice representative of the element's class.
    pub representative: Configuration,
    /// Distance from the identity.
    pub generation: usize,
    /// The element this one was first reached from, and by which move. `None` only for the identity.
    pub parent: Option<(NodeIndex, Move)>,
}

/// The Cayley graph of the chip-firing group, built once and read-only afterwards.
///
/// Lookups by a configuration require a member, i.e. a nice representative with respect to vertex 0; anything else
/// is reported as [`Error::NotMember`]. The `_class` variants reduce their argument first and accept any configuration.
pub struct CayleyGraph {
    graph: DiGraph<Element, Move>,
    index: HashMap<Configuration, NodeIndex>,
    identity: NodeIndex,
}

impl CayleyGraph {
    /// Enumerate the whole group by breadth-first search from the identity, expanding all 20 moves of every element.
    ///
    /// The traversal ends when no new element turns up; it always finds exactly [`GROUP_ORDER`] of them.
    pub fn build() -> Self {
        let mut graph = DiGraph::with_capacity(GROUP_ORDER, GROUP_ORDER * BRANCHING);
        let mut index = HashMap::with_capacity(GROUP_ORDER);

        let identity = graph.add_node(Element {
            representative: Configuration::ZERO,
            generation: 0,
            parent: None,
        });
        index.insert(Configuration::ZERO, identity);

        let mut queue = VecDeque::from([identity]);
        while let Some(node) = queue.pop_front() {
            let Element { representative, generation, .. } = graph[node];

            for mv in Move::all() {
                let next = nice_representative(&(representative + mv.script()), Vertex::DISTINGUISHED);
                let target = match index.get(&next) {
                    Some(&existing) => existing,
                    None => {
                        let added = graph.add_node(Element {
                            representative: next,
                            generation: generation + 1,
                            parent: Some((node, mv)),
                        });
                        index.insert(next, added);
                        queue.push_back(added);
                        added
                    }
                };
                graph.add_edge(node, target, mv);
            }

            tracing::trace!(element = %representative, generation, discovered = graph.node_count(), "expanded group element");
        }

        debug_assert_eq!(graph.node_count(), GROUP_ORDER, "the chip-firing group on the pentagon has 162 elements");
        tracing::info!(
            elements = graph.node_count(),
            edges = graph.edge_count(),
            diameter = graph.node_weights().map(|e| e.generation).max().unwrap_or(0),
            "chip-firing group enumerated",
        );

        Self { graph, index, identity }
    }

    /// Number of elements discovered.
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, i.e. `size() * 20`.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The largest distance from the identity.
    pub fn diameter(&self) -> usize {
        self.elements().map(|e| e.generation).max().unwrap_or(0)
    }

    /// How many elements lie at each distance from the identity, starting with distance 0.
    pub fn generation_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.diameter() + 1];
        for element in self.elements() {
            sizes[element.generation] += 1;
        }
        sizes
    }

    /// Every element in discovery order, identity first.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.graph.node_weights()
    }

    /// Whether `configuration` is the stored representative of some element.
    pub fn contains(&self, configuration: &Configuration) -> bool {
        self.index.contains_key(configuration)
    }

    /// The element of `configuration`'s class.
    pub fn element_of(&self, configuration: &Configuration) -> Configuration {
        nice_representative(configuration, Vertex::DISTINGUISHED)
    }

    fn node(&self, configuration: &Configuration) -> Result<NodeIndex> {
        self.index.get(configuration)
            .copied()
            .ok_or_else(|| Error::NotMember(configuration.to_string()))
    }

    /// Distance of the element `configuration` from the identity.
    pub fn distance_of(&self, configuration: &Configuration) -> Result<usize> {
        Ok(self.graph[self.node(configuration)?].generation)
    }

    /// A shortest move sequence leading from the identity to the element `configuration`.
    pub fn path_to(&self, configuration: &Configuration) -> Result<Vec<Move>> {
        let mut path = Vec::with_capacity(self.distance_of(configuration)?);
        let mut node = self.node(configuration)?;
        while let Some((parent, mv)) = self.graph[node].parent {
            path.push(mv);
            node = parent;
        }
        debug_assert_eq!(node, self.identity);
        path.reverse();
        Ok(path)
    }

    /// [`distance_of`](Self::distance_of) the class of any configuration.
    pub fn distance_of_class(&self, configuration: &Configuration) -> usize {
        self.index.get(&self.element_of(configuration))
            .map(|&node| self.graph[node].generation)
            .unwrap_or_else(|| unreachable!("every class has a nice representative"))
    }

    /// [`path_to`](Self::path_to) the class of any configuration.
    pub fn path_to_class(&self, configuration: &Configuration) -> Vec<Move> {
        self.path_to(&self.element_of(configuration))
            .unwrap_or_else(|_| unreachable!("every class has a nice representative"))
    }

    /// Cayley distance between the elements `from` and `to`.
    ///
    /// This is a distance between firing scripts, not between positions on the board: it counts the moves whose
    /// script carries `from` to `to`. The graph looks the same from every element, so it equals the distance of
    /// the element of `to - from`. Both arguments must be members.
    pub fn distance_between(&self, from: &Configuration, to: &Configuration) -> Result<usize> {
        self.node(from)?;
        self.node(to)?;
        Ok(self.distance_of_class(&(*to - *from)))
    }

    /// A shortest move sequence labelling a path from the element `from` to the element `to`.
    ///
    /// Following it with [`walk`](Self::walk) from `from` ends at `to`. Both arguments must be members.
    pub fn path_between(&self, from: &Configuration, to: &Configuration) -> Result<Vec<Move>> {
        self.node(from)?;
        self.node(to)?;
        Ok(self.path_to_class(&(*to - *from)))
    }

    /// Follow the edge labelled `mv` out of `element`.
    pub fn step(&self, element: &Configuration, mv: Move) -> Result<Configuration> {
        let node = self.node(element)?;
        let edge = self.graph.edges(node)
            .find(|edge| *edge.weight() == mv)
            .unwrap_or_else(|| unreachable!("every element has an edge for every move"));
        Ok(self.graph[edge.target()].representative)
    }

    /// Follow `moves` one edge at a time, starting at `element`.
    pub fn walk<'a>(&self, element: &Configuration, moves: impl IntoIterator<Item = &'a Move>) -> Result<Configuration> {
        moves.into_iter().try_fold(*element, |current, mv| self.step(&current, *mv))
    }

    /// The element reached from the identity by adding `element` to itself `n` times.
    pub fn multiple(&self, element: &Configuration, n: i32) -> Result<Configuration> {
        self.node(element)?;
        // every order divides the group order
        Ok(self.element_of(&element.scaled(n.rem_euclid(GROUP_ORDER as i32))))
    }

    /// The order of `element`: the smallest `n >= 1` with `n * element` equal to the identity.
    pub fn order_of(&self, element: &Configuration) -> Result<usize> {
        self.node(element)?;
        let mut sum = *element;
        let mut order = 1;
        while !self.element_of(&sum).is_zero() {
            sum = sum + *element;
            order += 1;
        }
        Ok(order)
    }
}
