//! Bounded breadth-first search over configurations.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Stopwatch;
use crate::configuration::Configuration;
use crate::goal::Goal;
use crate::moves::Move;

/// How far and how long a [`PathSearch`] may look.
///
/// The bounds only keep an interactive front end responsive.
/// Every goal is reachable with enough depth, so running out of either bound says nothing about solvability.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Longest move sequence considered.
    pub max_depth: usize,
    /// Wall-clock budget, checked before every node is expanded.
    pub time_budget: Duration,
    /// If set, configurations with any real or imaginary part outside `-bound..=bound` are never visited.
    pub coefficient_bound: Option<i32>,
}

impl SearchLimits {
    /// Limits for a quick hint: depth 5, 3 seconds, coefficients within ±10.
    pub const fn hint() -> Self {
        Self {
            max_depth: 5,
            time_budget: Duration::from_secs(3),
            coefficient_bound: Some(10),
        }
    }

    /// Limits for a full solution: depth 6, 10 seconds, no coefficient bound.
    pub const fn full_solution() -> Self {
        Self {
            max_depth: 6,
            time_budget: Duration::from_secs(10),
            coefficient_bound: None,
        }
    }

    /// The same limits with another depth bound.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The same limits with another time budget.
    pub const fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }

    /// [`with_time_budget`](Self::with_time_budget) from a host's floating-point seconds.
    ///
    /// Negative or NaN budgets mean no time at all; budgets too large for a [`Duration`] mean no limit.
    pub fn with_time_budget_secs(self, seconds: f64) -> Self {
        self.with_time_budget(Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX))
    }

    /// [`with_time_budget_secs`](Self::with_time_budget_secs) in milliseconds, as browsers count time.
    pub fn with_time_budget_ms(self, milliseconds: f64) -> Self {
        self.with_time_budget_secs(milliseconds / 1000.0)
    }

    /// The same limits with another coefficient bound.
    pub const fn with_coefficient_bound(mut self, coefficient_bound: Option<i32>) -> Self {
        self.coefficient_bound = coefficient_bound;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::hint()
    }
}

/// Why a search stopped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Stop {
    /// The goal was reached.
    Reached,
    /// Every configuration within the depth and coefficient bounds was visited.
    Exhausted,
    /// The time budget ran out first.
    TimedOut,
}

/// What a [`PathSearch`] found.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Whether `moves` reaches the goal.
    pub found: bool,
    /// A shortest sequence reaching the goal if `found`, otherwise empty.
    /// No partial sequence is ever reported.
    pub moves: Vec<Move>,
    /// Configurations taken off the queue.
    pub nodes_explored: usize,
    /// Distinct configurations seen, including the start.
    pub unique_states: usize,
    /// Why the search stopped.
    pub stop: Stop,
}

impl SearchOutcome {
    /// Whether the search gave up because of its time budget rather than its depth bound.
    pub fn timed_out(&self) -> bool {
        self.stop == Stop::TimedOut
    }
}

/// Breadth-first search from a start configuration to a [`Goal`], bounded by [`SearchLimits`].
///
/// Every node has 20 successors, in [`Move::all`] order: vertex ascending, then letter A, B, C, D.
/// Because the goal is tested as successors are generated and configurations are never revisited,
/// the first hit is a shortest sequence, and among equally short ones the first in that order.
pub struct PathSearch<'a> {
    limits: SearchLimits,
    yield_hook: Option<(usize, Box<dyn FnMut(usize) + 'a>)>,
}

impl<'a> PathSearch<'a> {
    /// A search bounded by `limits`.
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits, yield_hook: None }
    }

    /// Call `hook` with the running node count every `every` expanded nodes.
    ///
    /// Hosts without threads use this to hand control back to their event loop; the result is the same either way.
    pub fn with_yield(mut self, every: usize, hook: impl FnMut(usize) + 'a) -> Self {
        self.yield_hook = Some((every.max(1), Box::new(hook)));
        self
    }

    /// The limits this search runs with.
    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    fn within_bound(&self, configuration: &Configuration) -> bool {
        match self.limits.coefficient_bound {
            None => true,
            Some(bound) => configuration.max_component() <= bound,
        }
    }

    /// Search from `start` towards `goal`.
    pub fn run(&mut self, start: &Configuration, goal: &Goal) -> SearchOutcome {
        if goal.is_met(start) {
            return SearchOutcome {
                found: true,
                moves: Vec::new(),
                nodes_explored: 0,
                unique_states: 1,
                stop: Stop::Reached,
            };
        }

        tracing::debug!(start = %start, ?goal, max_depth = self.limits.max_depth, "path search started");
        let stopwatch = Stopwatch::start();

        // every visited configuration maps to the edge it was first reached by; the start has none
        let mut parents: HashMap<Configuration, Option<(Configuration, Move)>> = HashMap::new();
        parents.insert(*start, None);
        let mut queue = VecDeque::from([(*start, 0usize)]);
        let mut nodes_explored = 0;

        while let Some((current, depth)) = queue.pop_front() {
            if stopwatch.elapsed() >= self.limits.time_budget {
                tracing::debug!(nodes_explored, unique_states = parents.len(), "path search timed out");
                return Self::failure(nodes_explored, parents.len(), Stop::TimedOut);
            }

            nodes_explored += 1;
            if let Some((every, hook)) = self.yield_hook.as_mut() {
                if nodes_explored % *every == 0 {
                    hook(nodes_explored);
                }
            }
            if nodes_explored % 500 == 0 {
                tracing::trace!(nodes_explored, unique_states = parents.len(), queued = queue.len(), "path search progress");
            }

            if depth >= self.limits.max_depth {
                continue;
            }

            for mv in Move::all() {
                let next = mv.apply(&current);
                if !self.within_bound(&next) || parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, Some((current, mv)));

                if goal.is_met(&next) {
                    let moves = Self::trace_back(&parents, next);
                    tracing::debug!(length = moves.len(), nodes_explored, elapsed = ?stopwatch.elapsed(), "path search reached goal");
                    return SearchOutcome {
                        found: true,
                        moves,
                        nodes_explored,
                        unique_states: parents.len(),
                        stop: Stop::Reached,
                    };
                }

                queue.push_back((next, depth + 1));
            }
        }

        tracing::debug!(nodes_explored, unique_states = parents.len(), "path search exhausted");
        Self::failure(nodes_explored, parents.len(), Stop::Exhausted)
    }

    fn failure(nodes_explored: usize, unique_states: usize, stop: Stop) -> SearchOutcome {
        SearchOutcome {
            found: false,
            moves: Vec::new(),
            nodes_explored,
            unique_states,
            stop,
        }
    }

    fn trace_back(parents: &HashMap<Configuration, Option<(Configuration, Move)>>, end: Configuration) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = end;
        while let Some(Some((previous, mv))) = parents.get(&current) {
            moves.push(*mv);
            current = *previous;
        }
        moves.reverse();
        moves
    }
}

/// One-shot search from `start` to `goal`.
pub fn find_path(start: &Configuration, goal: &Goal, limits: SearchLimits) -> SearchOutcome {
    PathSearch::new(limits).run(start, goal)
}
