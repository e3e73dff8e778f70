use serde::Serialize;

use super::membership::Triangle;
use super::rules::{mega_sena_rules, Rule};
use super::variable::{FuzzyVariable, Term};
use crate::features::Variable;

const LOW: Triangle = Triangle::new(0.0, 0.0, 40.0);
const MID: Triangle = Triangle::new(20.0, 50.0, 80.0);
const HIGH: Triangle = Triangle::new(60.0, 100.0, 100.0);

/// One crisp value per antecedent, indexed by `Variable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrispInputs([f64; 5]);

impl CrispInputs {
    pub fn new(values: [f64; 5]) -> Self {
        Self(values)
    }

    pub fn get(&self, variable: Variable) -> f64 {
        self.0[variable.index()]
    }

    pub fn values(&self) -> [f64; 5] {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzification {
    /// Σ x·μ(x) / Σ μ(x) over the consequent grid points.
    #[default]
    GridCentroid,
    /// Centroid of the area under the piecewise-linear curve through the grid points.
    AreaCentroid,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Defuzzified {
    Crisp(f64),
    /// Every rule fired at strength 0; the aggregated set is empty.
    NoRuleFired,
}

impl Defuzzified {
    /// The crisp score, with 0.0 standing in when no rule fired.
    pub fn score(&self) -> f64 {
        match self {
            Defuzzified::Crisp(score) => *score,
            Defuzzified::NoRuleFired => 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Defuzzified::NoRuleFired)
    }
}

/// Static variable and rule configuration. Evaluation borrows it immutably and
/// keeps all scratch state local, so one instance serves any number of threads.
#[derive(Debug, Clone)]
pub struct FuzzySystem {
    antecedents: Vec<FuzzyVariable>,
    consequent: FuzzyVariable,
    rules: Vec<Rule>,
    defuzzification: Defuzzification,
}

impl FuzzySystem {
    pub fn mega_sena() -> Self {
        let antecedents = Variable::ALL
            .iter()
            .map(|&variable| {
                let labels = match variable {
                    Variable::FrequenciaHistorica | Variable::TendenciaSoma => ["baixa", "media", "alta"],
                    Variable::TempoAusencia | Variable::EquilibrioParImpar => ["baixo", "medio", "alto"],
                    Variable::DistribuicaoPosicional => ["ruim", "media", "boa"],
                };
                FuzzyVariable::new(
                    variable.name(),
                    0.0,
                    100.0,
                    1.0,
                    vec![
                        Term::new(labels[0], LOW),
                        Term::new(labels[1], MID),
                        Term::new(labels[2], HIGH),
                    ],
                )
            })
            .collect();

        let consequent = FuzzyVariable::new(
            "score_interesse",
            0.0,
            10.0,
            1.0,
            vec![
                Term::new("muito_baixo", Triangle::new(0.0, 0.0, 2.5)),
                Term::new("baixo", Triangle::new(0.0, 2.5, 5.0)),
                Term::new("medio", Triangle::new(2.5, 5.0, 7.5)),
                Term::new("alto", Triangle::new(5.0, 7.5, 10.0)),
                Term::new("muito_alto", Triangle::new(7.5, 10.0, 10.0)),
            ],
        );

        Self {
            antecedents,
            consequent,
            rules: mega_sena_rules(),
            defuzzification: Defuzzification::default(),
        }
    }

    pub fn with_defuzzification(mut self, method: Defuzzification) -> Self {
        self.defuzzification = method;
        self
    }

    pub fn defuzzification(&self) -> Defuzzification {
        self.defuzzification
    }

    pub fn antecedent(&self, variable: Variable) -> &FuzzyVariable {
        &self.antecedents[variable.index()]
    }

    pub fn consequent(&self) -> &FuzzyVariable {
        &self.consequent
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fuzzify(&self, inputs: &CrispInputs) -> Vec<Vec<f64>> {
        Variable::ALL
            .iter()
            .map(|&v| self.antecedent(v).fuzzify(inputs.get(v)))
            .collect()
    }

    /// Firing strength of every rule, in rule order.
    pub fn rule_strengths(&self, inputs: &CrispInputs) -> Vec<f64> {
        let memberships = self.fuzzify(inputs);
        self.rules
            .iter()
            .map(|rule| rule.firing_strength(&memberships))
            .collect()
    }

    /// Max over rules of each clipped consequent, sampled on the consequent grid.
    pub fn aggregate(&self, inputs: &CrispInputs) -> Vec<f64> {
        let grid = self.consequent.grid();
        let mut aggregated = vec![0.0f64; grid.len()];

        for (rule, strength) in self.rules.iter().zip(self.rule_strengths(inputs)) {
            if strength <= 0.0 {
                continue;
            }
            let shape = &self.consequent.terms[rule.consequent.index()].shape;
            for (mu, &x) in aggregated.iter_mut().zip(&grid) {
                *mu = mu.max(shape.clipped(x, strength));
            }
        }

        aggregated
    }

    pub fn evaluate(&self, inputs: &CrispInputs) -> Defuzzified {
        let grid = self.consequent.grid();
        let aggregated = self.aggregate(inputs);

        let centroid = match self.defuzzification {
            Defuzzification::GridCentroid => grid_centroid(&grid, &aggregated),
            Defuzzification::AreaCentroid => area_centroid(&grid, &aggregated),
        };

        match centroid {
            Some(score) => Defuzzified::Crisp(score),
            None => Defuzzified::NoRuleFired,
        }
    }
}

fn grid_centroid(grid: &[f64], mu: &[f64]) -> Option<f64> {
    let total: f64 = mu.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let moment: f64 = grid.iter().zip(mu).map(|(x, m)| x * m).sum();
    Some(moment / total)
}

fn area_centroid(grid: &[f64], mu: &[f64]) -> Option<f64> {
    if mu.iter().sum::<f64>() <= 0.0 {
        return None;
    }
    let mut area = 0.0;
    let mut moment = 0.0;
    for i in 1..grid.len() {
        let (x0, x1) = (grid[i - 1], grid[i]);
        let (y0, y1) = (mu[i - 1], mu[i]);
        if y0 + y1 <= 0.0 {
            continue;
        }
        let segment = (x1 - x0) * (y0 + y1) / 2.0;
        let centre = x0 + (x1 - x0) * (y0 + 2.0 * y1) / (3.0 * (y0 + y1));
        area += segment;
        moment += segment * centre;
    }
    if area > 0.0 {
        Some(moment / area)
    } else {
        // A lone nonzero point on a one-point grid.
        grid_centroid(grid, mu)
    }
}
