//! Reduction of any configuration to the nice representative of its equivalence class.
//!
//! A nice representative has no imaginary chips, 0 or 3 real chips on the distinguished vertex and
//! 0, 1 or 2 real chips on every other vertex. There are `2 * 3^4 = 162` of them, one per class.
//!
//! The reduction never fires a move explicitly; every stage changes the configuration without leaving its class.
//! An imaginary chip at `k` is worth one real chip at `k` minus one at each neighbor, since the difference is
//! exactly move B at `k`. The all-ones configuration and three chips on any single vertex both lie in the class of
//! the group's only element of order 2, so shifting every vertex by the same amount and reducing modulo 3 can
//! only change the class by that element, and the parity of the total chip count tells whether it did.

use serde::{Deserialize, Serialize};
use strum::{Display, VariantArray};

use crate::configuration::{Configuration, Vertex, VERTEX_COUNT};

/// The stages of the reduction, in order.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, VariantArray, Display, Serialize, Deserialize)]
pub enum Stage {
    /// Read off ψ(k), the number of imaginary chips at every vertex. Changes nothing.
    #[strum(to_string = "count imaginary chips")]
    CountImaginary,
    /// Add ψ(k) - ψ(k+1) - ψ(k-1) real chips at every vertex k.
    #[strum(to_string = "add compensating real chips")]
    Compensate,
    /// Drop every imaginary chip.
    #[strum(to_string = "remove imaginary chips")]
    DropImaginary,
    /// Note the parity of the total number of real chips. Changes nothing.
    #[strum(to_string = "record chip parity")]
    RecordParity,
    /// Subtract the distinguished vertex's chips from every vertex.
    #[strum(to_string = "shift by the distinguished vertex")]
    Shift,
    /// Replace every count by its non-negative remainder modulo 3.
    #[strum(to_string = "reduce modulo 3")]
    ReduceModThree,
    /// Add 3 chips on the distinguished vertex if the parity changed; otherwise nothing.
    #[strum(to_string = "restore chip parity")]
    RestoreParity,
}

/// One stage of a reduction, for step-by-step playback.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReductionStep {
    /// Which stage this was.
    pub stage: Stage,
    /// The configuration entering the stage.
    pub before: Configuration,
    /// The configuration leaving the stage.
    pub after: Configuration,
}

/// Result of [`canonicalize`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Canonicalization {
    /// The nice representative of the input's class.
    pub representative: Configuration,
    /// Every stage with its input and output, in order.
    pub steps: Vec<ReductionStep>,
    /// Whether the total real chip count was even after the imaginary chips were removed.
    pub parity_even: bool,
    /// Whether the final stage had to add 3 chips on the distinguished vertex.
    pub parity_corrected: bool,
}

fn is_even(n: i64) -> bool {
    n.rem_euclid(2) == 0
}

/// Per-vertex `(re, im)` counts wide enough that no stage can overflow, whatever the input.
type Wide = [(i64, i64); VERTEX_COUNT];

fn widen(configuration: &Configuration) -> Wide {
    configuration.values().map(|value| (i64::from(value.re), i64::from(value.im)))
}

/// Snapshot of a stage for the trace. Counts saturate at the `i32` range; the final representative never does.
fn narrow(wide: &Wide) -> Configuration {
    let saturate = |n: i64| n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Configuration::from_pairs(wide.map(|(re, im)| (saturate(re), saturate(im))))
}

/// Reduce `configuration` to the nice representative of its class with respect to `distinguished`.
///
/// Total and deterministic for every input. The returned steps cover every [`Stage`], including those that change
/// nothing. Intermediate counts are computed in `i64`; inputs within [`Configuration::MAX_COMPONENT`] keep every
/// snapshot exact.
pub fn canonicalize(configuration: &Configuration, distinguished: Vertex) -> Canonicalization {
    let mut steps = Vec::with_capacity(Stage::VARIANTS.len());
    let mut record = |stage, before: &Wide, after: Wide| {
        steps.push(ReductionStep { stage, before: narrow(before), after: narrow(&after) });
        after
    };

    let input = widen(configuration);
    let current = record(Stage::CountImaginary, &input, input);
    let psi = current.map(|(_, im)| im);

    let mut compensated = current;
    for k in Vertex::ALL {
        let [previous, next] = k.neighbors();
        compensated[k.index()].0 += psi[k.index()] - psi[next.index()] - psi[previous.index()];
    }
    let current = record(Stage::Compensate, &current, compensated);

    let real = current.map(|(re, _)| (re, 0));
    let current = record(Stage::DropImaginary, &current, real);

    let total = |wide: &Wide| wide.iter().map(|(re, _)| re).sum::<i64>();
    let parity_even = is_even(total(&current));
    let current = record(Stage::RecordParity, &current, current);

    let offset = current[distinguished.index()].0;
    let shifted = current.map(|(re, im)| (re - offset, im));
    let current = record(Stage::Shift, &current, shifted);

    let reduced = current.map(|(re, im)| (re.rem_euclid(3), im));
    let current = record(Stage::ReduceModThree, &current, reduced);

    let parity_corrected = is_even(total(&current)) != parity_even;
    let mut restored = current;
    if parity_corrected {
        restored[distinguished.index()].0 += 3;
    }
    let representative = narrow(&record(Stage::RestoreParity, &current, restored));

    Canonicalization { representative, steps, parity_even, parity_corrected }
}

/// [`canonicalize`] without the step trace.
pub fn nice_representative(configuration: &Configuration, distinguished: Vertex) -> Configuration {
    canonicalize(configuration, distinguished).representative
}

/// Whether `configuration` already is a nice representative with respect to `distinguished`.
pub fn is_nice_representative(configuration: &Configuration, distinguished: Vertex) -> bool {
    NiceProgress::of(configuration, distinguished).is_nice()
}

/// How far a configuration is from being a nice representative, vertex by vertex.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NiceProgress {
    /// The vertex checked against the 0-or-3 rule.
    pub distinguished: Vertex,
    /// Vertices still holding imaginary chips.
    pub imaginary: Vec<Vertex>,
    /// Whether the distinguished vertex holds 0 or 3 real chips.
    pub distinguished_ok: bool,
    /// Other vertices whose real count is outside 0..=2.
    pub out_of_range: Vec<Vertex>,
}

impl NiceProgress {
    /// Inspect `configuration`.
    pub fn of(configuration: &Configuration, distinguished: Vertex) -> Self {
        let imaginary = configuration.iter()
            .filter(|(_, value)| value.im != 0)
            .map(|(vertex, _)| vertex)
            .collect();
        let distinguished_ok = matches!(configuration[distinguished].re, 0 | 3);
        let out_of_range = configuration.iter()
            .filter(|(vertex, value)| *vertex != distinguished && !(0..=2).contains(&value.re))
            .map(|(vertex, _)| vertex)
            .collect();

        Self { distinguished, imaginary, distinguished_ok, out_of_range }
    }

    /// Whether every rule holds.
    pub fn is_nice(&self) -> bool {
        self.imaginary.is_empty() && self.distinguished_ok && self.out_of_range.is_empty()
    }

    /// Human-readable list of the broken rules, empty for a nice representative.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.imaginary.is_empty() {
            issues.push(format!(
                "imaginary chips on {}",
                self.imaginary.iter().map(|v| format!("V{v}")).collect::<Vec<_>>().join(", "),
            ));
        }
        if !self.distinguished_ok {
            issues.push(format!("V{} must hold 0 or 3 real chips", self.distinguished));
        }
        for vertex in &self.out_of_range {
            issues.push(format!("V{vertex} must hold 0, 1 or 2 real chips"));
        }
        issues
    }
}
