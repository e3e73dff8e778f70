use super::membership::Triangle;

/// A named term of a linguistic variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub label: &'static str,
    pub shape: Triangle,
}

impl Term {
    pub const fn new(label: &'static str, shape: Triangle) -> Self {
        Self { label, shape }
    }
}

/// Universe `[min, max]` sampled every `step`, with an ordered list of terms.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub terms: Vec<Term>,
}

impl FuzzyVariable {
    pub fn new(name: &'static str, min: f64, max: f64, step: f64, terms: Vec<Term>) -> Self {
        Self {
            name,
            min,
            max,
            step,
            terms,
        }
    }

    /// Degree of `x` in every term, in term order.
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        self.terms.iter().map(|t| t.shape.degree(x)).collect()
    }

    /// Universe sample points, both ends included.
    pub fn grid(&self) -> Vec<f64> {
        let points = ((self.max - self.min) / self.step).round() as usize + 1;
        (0..points).map(|i| self.min + i as f64 * self.step).collect()
    }
}
