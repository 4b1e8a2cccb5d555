//! One object bundling the solvers for a front end.
//!
//! [`Engine`] owns the analytic solver and, once requested, the group table. The wasm bindings wrap it.

use std::sync::OnceLock;

use crate::analytic::{AnalyticConfig, AnalyticSolver, Suggestion};
use crate::canonical::{canonicalize, Canonicalization};
use crate::configuration::{Configuration, Vertex};
use crate::error::{Error, Result};
use crate::goal::Goal;
use crate::group::CayleyGraph;
use crate::moves::{Letter, Move};
use crate::search::{PathSearch, SearchLimits, SearchOutcome};

/// Everything a front end needs, behind one explicitly constructed value.
///
/// The Cayley graph is only built on request, by [`initialize_group`](Self::initialize_group),
/// or handed in ready-made with [`with_group`](Self::with_group). Group queries fail with
/// [`Error::GroupNotInitialized`] until then.
#[derive(Default)]
pub struct Engine {
    analytic: AnalyticSolver,
    group: OnceLock<CayleyGraph>,
}

impl Engine {
    /// An engine without a group table.
    pub fn new(config: AnalyticConfig) -> Self {
        Self {
            analytic: AnalyticSolver::new(config),
            group: OnceLock::new(),
        }
    }

    /// An engine using a group table built elsewhere.
    pub fn with_group(group: CayleyGraph) -> Self {
        let engine = Self::default();
        // a fresh OnceLock is always empty
        let _ = engine.group.set(group);
        engine
    }

    /// Fire `letter` at `vertex`.
    pub fn apply_move(&self, configuration: &Configuration, vertex: Vertex, letter: Letter) -> Configuration {
        Move::new(vertex, letter).apply(configuration)
    }

    /// Bounded breadth-first search from `start` to `goal`.
    pub fn find_path(&self, start: &Configuration, goal: &Goal, limits: SearchLimits) -> SearchOutcome {
        PathSearch::new(limits).run(start, goal)
    }

    /// Build the group table unless it already exists. Safe to call repeatedly and from several threads;
    /// only the first call does any work.
    pub fn initialize_group(&self) -> &CayleyGraph {
        self.group.get_or_init(CayleyGraph::build)
    }

    /// The group table, if it has been built.
    pub fn group(&self) -> Result<&CayleyGraph> {
        self.group.get().ok_or(Error::GroupNotInitialized)
    }

    /// Cayley distance of the group element `configuration` from the identity.
    pub fn distance_from_identity(&self, configuration: &Configuration) -> Result<usize> {
        self.group()?.distance_of(configuration)
    }

    /// A shortest move sequence from the identity to the group element `configuration`.
    pub fn path_from_identity(&self, configuration: &Configuration) -> Result<Vec<Move>> {
        self.group()?.path_to(configuration)
    }

    /// The analytic solver's next move, or `None` on a plateau.
    pub fn suggest_next_move(&self, current: &Configuration, goal: &Configuration) -> Option<Suggestion> {
        self.analytic.suggest_move(current, goal)
    }

    /// The analytic solver behind [`suggest_next_move`](Self::suggest_next_move).
    pub fn analytic(&self) -> &AnalyticSolver {
        &self.analytic
    }

    /// Reduce `configuration` to its nice representative with respect to `distinguished`.
    pub fn canonicalize(&self, configuration: &Configuration, distinguished: Vertex) -> Canonicalization {
        canonicalize(configuration, distinguished)
    }
}
