use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::features::{FeatureVector, Variable};
use crate::fuzzy::CrispInputs;

pub const DEFAULT_WEIGHT: f64 = 50.0;

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Per-request attenuation of each variable, in percent (0-100).
///
/// A weight scales the crisp value before fuzzification: `v' = v * w / 100`.
/// A weight of 0 therefore reads as "this variable is 0", which places it
/// fully in its low term rather than removing it from the rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default = "default_weight")]
    pub frequencia_historica: f64,
    #[serde(default = "default_weight")]
    pub tempo_ausencia: f64,
    #[serde(default = "default_weight")]
    pub distribuicao_posicional: f64,
    #[serde(default = "default_weight")]
    pub equilibrio_par_impar: f64,
    #[serde(default = "default_weight")]
    pub tendencia_soma: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self::uniform(DEFAULT_WEIGHT)
    }
}

impl Weights {
    pub fn uniform(weight: f64) -> Self {
        Self {
            frequencia_historica: weight,
            tempo_ausencia: weight,
            distribuicao_posicional: weight,
            equilibrio_par_impar: weight,
            tendencia_soma: weight,
        }
    }

    /// Leaves every value untouched.
    pub fn neutral() -> Self {
        Self::uniform(100.0)
    }

    pub fn get(&self, variable: Variable) -> f64 {
        match variable {
            Variable::FrequenciaHistorica => self.frequencia_historica,
            Variable::TempoAusencia => self.tempo_ausencia,
            Variable::DistribuicaoPosicional => self.distribuicao_posicional,
            Variable::EquilibrioParImpar => self.equilibrio_par_impar,
            Variable::TendenciaSoma => self.tendencia_soma,
        }
    }

    pub fn set(&mut self, variable: Variable, weight: f64) {
        let slot = match variable {
            Variable::FrequenciaHistorica => &mut self.frequencia_historica,
            Variable::TempoAusencia => &mut self.tempo_ausencia,
            Variable::DistribuicaoPosicional => &mut self.distribuicao_posicional,
            Variable::EquilibrioParImpar => &mut self.equilibrio_par_impar,
            Variable::TendenciaSoma => &mut self.tendencia_soma,
        };
        *slot = weight;
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for variable in Variable::ALL {
            let value = self.get(variable);
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::WeightOutOfRange {
                    name: variable.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Weights as fractions in [0, 1], in antecedent order.
    pub fn fractions(&self) -> [f64; 5] {
        Variable::ALL.map(|v| self.get(v) / 100.0)
    }

    pub fn apply(&self, features: &FeatureVector) -> CrispInputs {
        let fractions = self.fractions();
        let values = features.values();
        CrispInputs::new(std::array::from_fn(|i| values[i] * fractions[i]))
    }
}
