//! Vertices, Gaussian integers and whole-pentagon configurations.

use std::fmt::{Display, Formatter};
use std::ops::{Add, Index, IndexMut, Neg, Sub};
use std::str::FromStr;

use itertools::Itertools;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use unordered_pair::UnorderedPair;

use crate::error::{Error, Result};

/// A Gaussian integer `re + im*i`: `re` real chips and `im` imaginary chips on one vertex.
pub type Gaussian = Complex<i32>;

/// Number of vertices on the pentagon.
pub const VERTEX_COUNT: usize = 5;

/// A vertex of the pentagon, guaranteed to be in `0..5`.
///
/// Vertices are numbered around the cycle, so `v` is adjacent to `v - 1` and `v + 1` (mod 5).
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Vertex(usize);

impl Vertex {
    /// All five vertices in index order.
    pub const ALL: [Vertex; VERTEX_COUNT] = [Vertex(0), Vertex(1), Vertex(2), Vertex(3), Vertex(4)];
    /// The vertex that carries the 0-or-3 range in a nice representative, unless another one is asked for.
    pub const DISTINGUISHED: Vertex = Vertex(0);

    /// Returns [`Error::InvalidVertex`] for anything outside `0..5`; indices are never clamped or wrapped.
    pub fn new(index: usize) -> Result<Self> {
        if index < VERTEX_COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidVertex(index))
        }
    }

    /// The index of this vertex, in `0..5`.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// The vertex `steps` positions further around the cycle (negative steps walk backwards).
    pub fn offset_by(self, steps: isize) -> Self {
        Self((self.0 as isize + steps).rem_euclid(VERTEX_COUNT as isize) as usize)
    }

    /// The two neighbors of this vertex, previous one first.
    pub fn neighbors(self) -> [Vertex; 2] {
        [self.offset_by(-1), self.offset_by(1)]
    }

    /// Whether `other` shares an edge with this vertex.
    pub fn is_adjacent_to(self, other: Vertex) -> bool {
        self.neighbors().contains(&other)
    }

    /// The five edges of the cycle: 0-1, 1-2, 2-3, 3-4, 4-0.
    pub fn edges() -> [UnorderedPair<Vertex>; VERTEX_COUNT] {
        Self::ALL.map(|v| UnorderedPair(v, v.offset_by(1)))
    }
}

impl TryFrom<usize> for Vertex {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Vertex> for usize {
    fn from(value: Vertex) -> Self {
        value.0
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An assignment of a Gaussian integer to each vertex of the pentagon.
///
/// Configurations are small `Copy` values; every operation returns a new one.
///
/// The [`Display`] form doubles as the stable lookup key shared with puzzle files:
/// `re,im` per vertex in index order, joined by `|`, e.g. `1,-2|0,0|3,1|0,0|-1,0`.
/// [`FromStr`] accepts exactly that form.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Configuration([Gaussian; VERTEX_COUNT]);

impl Configuration {
    /// Largest absolute component a parsed key may carry.
    ///
    /// Keeps every move and group sum far from `i32` overflow. The constructors below do not check it.
    pub const MAX_COMPONENT: i32 = 1_000_000_000;

    /// The all-zero configuration, the identity of the group.
    pub const ZERO: Self = Self([Complex::new(0, 0); VERTEX_COUNT]);

    /// Wrap five Gaussian integers, vertex 0 first.
    pub const fn new(values: [Gaussian; VERTEX_COUNT]) -> Self {
        Self(values)
    }

    /// Build from `(re, im)` pairs, vertex 0 first.
    pub fn from_pairs(pairs: [(i32, i32); VERTEX_COUNT]) -> Self {
        Self(pairs.map(|(re, im)| Complex::new(re, im)))
    }

    /// Build a configuration with only real chips.
    pub fn from_reals(reals: [i32; VERTEX_COUNT]) -> Self {
        Self(reals.map(|re| Complex::new(re, 0)))
    }

    /// The same configuration with the value at `vertex` replaced.
    pub fn with(mut self, vertex: Vertex, value: Gaussian) -> Self {
        self[vertex] = value;
        self
    }

    /// The same configuration with `value` added at `vertex`.
    pub fn adding(mut self, vertex: Vertex, value: Gaussian) -> Self {
        self[vertex] += value;
        self
    }

    /// The five values, vertex 0 first.
    pub fn values(&self) -> &[Gaussian; VERTEX_COUNT] {
        &self.0
    }

    /// Iterate over `(vertex, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Vertex, Gaussian)> + '_ {
        Vertex::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Whether every vertex holds `0`.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whether no vertex holds imaginary chips.
    pub fn is_real(&self) -> bool {
        self.0.iter().all(|value| value.im == 0)
    }

    /// Sum of the real chips over all vertices.
    pub fn total_real(&self) -> i64 {
        self.0.iter().map(|value| value.re as i64).sum()
    }

    /// The largest absolute real or imaginary component on any vertex.
    pub fn max_component(&self) -> i32 {
        self.0.iter()
            .flat_map(|value| [value.re.saturating_abs(), value.im.saturating_abs()])
            .max()
            .unwrap_or(0)
    }

    /// Euclidean size of the configuration: the sum of the complex moduli of its five values.
    pub fn magnitude(&self) -> f64 {
        self.0.iter()
            .map(|value| (value.re as f64).hypot(value.im as f64))
            .sum()
    }

    /// [`magnitude`](Self::magnitude) of the difference to `goal`.
    pub fn distance_to(&self, goal: &Configuration) -> f64 {
        (*self - *goal).magnitude()
    }

    /// Multiply every value by the integer `factor`.
    pub fn scaled(self, factor: i32) -> Self {
        Self(self.0.map(|value| value * factor))
    }
}

impl Index<Vertex> for Configuration {
    type Output = Gaussian;

    fn index(&self, vertex: Vertex) -> &Self::Output {
        &self.0[vertex.index()]
    }
}

impl IndexMut<Vertex> for Configuration {
    fn index_mut(&mut self, vertex: Vertex) -> &mut Self::Output {
        &mut self.0[vertex.index()]
    }
}

impl Add for Configuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = self;
        for vertex in Vertex::ALL {
            out[vertex] += rhs[vertex];
        }
        out
    }
}

impl Sub for Configuration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Neg for Configuration {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.map(|value| -value))
    }
}

impl From<[Gaussian; VERTEX_COUNT]> for Configuration {
    fn from(value: [Gaussian; VERTEX_COUNT]) -> Self {
        Self(value)
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().map(|value| format!("{},{}", value.re, value.im)).join("|"))
    }
}

impl FromStr for Configuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fail = |reason| Error::ParseConfiguration { input: s.to_owned(), reason };

        let parts = s.split('|').collect_vec();
        if parts.len() != VERTEX_COUNT {
            return Err(fail("expected exactly five `|`-separated vertices"));
        }

        let mut values: [Gaussian; VERTEX_COUNT] = [Complex::new(0, 0); VERTEX_COUNT];
        for (slot, part) in values.iter_mut().zip(parts) {
            let (re, im) = part.split_once(',').ok_or_else(|| fail("expected `re,im` at every vertex"))?;
            // no surrounding whitespace or `+` signs: the key must match byte-for-byte
            if re.starts_with('+') || im.starts_with('+') {
                return Err(fail("components must not carry a `+` sign"));
            }
            *slot = Complex::new(
                re.parse().map_err(|_| fail("real component is not an integer"))?,
                im.parse().map_err(|_| fail("imaginary component is not an integer"))?,
            );
            if slot.re.unsigned_abs() > Self::MAX_COMPONENT.unsigned_abs() || slot.im.unsigned_abs() > Self::MAX_COMPONENT.unsigned_abs() {
                return Err(fail("component is larger than 1000000000 in absolute value"));
            }
        }

        Ok(Self(values))
    }
}

impl TryFrom<String> for Configuration {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Configuration> for String {
    fn from(value: Configuration) -> Self {
        value.to_string()
    }
}
