//! Upper-over-lower readings of the 64 trigram pairs.
//!
//! Only some pairs carry an authored meaning; the rest are open. The
//! analysis reports how much of the 8×8 grid a model covers.

use serde::Serialize;

use crate::trigram::{MathModel, Trigram};

use Trigram::*;

const ABSTRACT: &[(Trigram, Trigram, &str)] = &[
    (Qian, Qian, "completeness of the natural number system"),
    (Qian, Kun, "countable sets and infinity"),
    (Qian, Zhen, "sequences and recurrences"),
    (Qian, Xun, "order and equivalence relations"),
    (Qian, Kan, "counting measure and probability"),
    (Qian, Li, "algebraic structures: groups, rings, fields"),
    (Qian, Gen, "infinite series and convergence"),
    (Qian, Dui, "arithmetic and composition"),
    (Kun, Qian, "cardinality"),
    (Kun, Kun, "union and intersection"),
    (Kun, Zhen, "domain and range"),
    (Kun, Xun, "relations as sets of pairs"),
    (Kun, Kan, "measure theory and probability spaces"),
    (Kun, Li, "topological spaces and connectedness"),
    (Kun, Gen, "limit points and neighbourhoods"),
    (Kun, Dui, "the algebra of set operations"),
    (Zhen, Qian, "degree and complexity of functions"),
    (Zhen, Kun, "images and preimages"),
    (Zhen, Zhen, "composition and inverse functions"),
    (Zhen, Xun, "functional relations and graphs"),
    (Zhen, Kan, "change of measure and integration"),
    (Zhen, Li, "isomorphisms and homomorphisms"),
    (Zhen, Gen, "continuity and limits of functions"),
    (Zhen, Dui, "function spaces"),
];

const CONCRETE: &[(Trigram, Trigram, &str)] = &[
    (Qian, Qian, "the circle and trigonometric functions"),
    (Qian, Kun, "the fast Fourier transform in signal processing"),
    (Qian, Li, "spirals in nature and the Fibonacci sequence"),
    (Qian, Kan, "Monte Carlo estimation of pi"),
    (Qian, Zhen, "derivatives of trigonometric functions and Euler's formula"),
    (Qian, Xun, "the area of a circle by integration"),
    (Qian, Gen, "pi and the distribution of primes"),
    (Qian, Dui, "rotational symmetry and periodic functions"),
    (Kun, Qian, "approximating pi in floating point"),
    (Kun, Kun, "Boolean algebra and logic circuits"),
    (Kun, Li, "binary trees and the golden ratio"),
    (Kun, Kan, "Bernoulli trials and the binomial distribution"),
    (Kun, Zhen, "finite differences"),
    (Kun, Xun, "Riemann sums and numerical integration"),
    (Kun, Gen, "primality testing"),
    (Kun, Dui, "symmetric-key encryption"),
    (Zhen, Xun, "the fundamental theorem of calculus"),
    (Gen, Kan, "the prime number theorem read probabilistically"),
    (Dui, Li, "regular polyhedra and the golden ratio"),
];

impl MathModel {
    fn combinations(self) -> &'static [(Trigram, Trigram, &'static str)] {
        match self {
            Self::Abstract => ABSTRACT,
            Self::Concrete => CONCRETE,
        }
    }

    /// The authored meaning of `upper` stacked over `lower`, if there is one.
    pub fn combination(self, upper: Trigram, lower: Trigram) -> Option<&'static str> {
        self.combinations()
            .iter()
            .find(|&&(u, l, _)| u == upper && l == lower)
            .map(|&(_, _, meaning)| meaning)
    }

    /// How much of the 8×8 grid this model gives a meaning.
    pub fn analyze(self) -> ModelAnalysis {
        let mut covered = 0;
        let mut open = Vec::new();
        for upper in Trigram::ALL {
            for lower in Trigram::ALL {
                match self.combination(upper, lower) {
                    Some(_) => covered += 1,
                    None => open.push((upper, lower)),
                }
            }
        }
        let total = Trigram::ALL.len() * Trigram::ALL.len();
        ModelAnalysis {
            model: self,
            total_trigrams: Trigram::ALL.len(),
            total_hexagrams: total,
            covered,
            coverage: covered as f64 / total as f64 * 100.0,
            duality_pairs: self.duality_pairs(),
            open_combinations: open,
        }
    }
}

/// Coverage report for one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelAnalysis {
    /// The model analysed.
    pub model: MathModel,
    /// Always 8.
    pub total_trigrams: usize,
    /// Always 64.
    pub total_hexagrams: usize,
    /// Pairs with an authored meaning.
    pub covered: usize,
    /// `covered` as a percentage of `total_hexagrams`.
    pub coverage: f64,
    /// The model's complementary pairs.
    pub duality_pairs: [(Trigram, Trigram); 4],
    /// (upper, lower) pairs with no authored meaning, upper-major.
    pub open_combinations: Vec<(Trigram, Trigram)>,
}
