pub mod compute;

use serde::Serialize;

use megafuzzy_db::appearance::AppearanceIndex;
use megafuzzy_db::models::POOL_SIZE;
use megafuzzy_db::repository::DrawRepository;

use crate::normalize::min_max;

/// The five indicators fed to the fuzzy system, in antecedent order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    FrequenciaHistorica,
    TempoAusencia,
    DistribuicaoPosicional,
    EquilibrioParImpar,
    TendenciaSoma,
}

impl Variable {
    pub const ALL: [Variable; 5] = [
        Variable::FrequenciaHistorica,
        Variable::TempoAusencia,
        Variable::DistribuicaoPosicional,
        Variable::EquilibrioParImpar,
        Variable::TendenciaSoma,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Variable::FrequenciaHistorica => "frequencia_historica",
            Variable::TempoAusencia => "tempo_ausencia",
            Variable::DistribuicaoPosicional => "distribuicao_posicional",
            Variable::EquilibrioParImpar => "equilibrio_par_impar",
            Variable::TendenciaSoma => "tendencia_soma",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Variable::FrequenciaHistorica => "Frequência com que o número apareceu historicamente",
            Variable::TempoAusencia => "Tempo desde a última aparição do número",
            Variable::DistribuicaoPosicional => "Uniformidade nas 6 posições de sorteio",
            Variable::EquilibrioParImpar => "Balanceamento entre pares e ímpares",
            Variable::TendenciaSoma => "Alinhamento com tendência de soma dos sorteios",
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub number: u8,
    pub frequency_raw: u32,
    pub frequency_norm: f64,
    pub absence_days_raw: i64,
    pub absence_norm: f64,
    pub positional_uniformity: f64,
    pub parity_balance: f64,
    pub sum_tendency: f64,
}

impl FeatureVector {
    /// Crisp value in [0, 100] handed to the fuzzy system.
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::FrequenciaHistorica => self.frequency_norm,
            Variable::TempoAusencia => self.absence_norm,
            Variable::DistribuicaoPosicional => self.positional_uniformity,
            Variable::EquilibrioParImpar => self.parity_balance,
            Variable::TendenciaSoma => self.sum_tendency,
        }
    }

    pub fn values(&self) -> [f64; 5] {
        Variable::ALL.map(|v| self.value(v))
    }
}

/// One vector per number 1..=60, index `n - 1`. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    vectors: Vec<FeatureVector>,
}

impl FeatureTable {
    pub fn derive(repository: &DrawRepository, index: &AppearanceIndex) -> Self {
        let frequency = compute::frequencies(index);
        let absence = compute::absence_days(repository, index);
        let positional = compute::positional_uniformity(index);
        let parity = compute::parity_balance(repository);
        let sum = compute::sum_tendency(repository);

        let frequency_norm = min_max(&frequency.iter().map(|&f| f as f64).collect::<Vec<_>>());
        let absence_norm = min_max(&absence.iter().map(|&d| d as f64).collect::<Vec<_>>());

        let vectors = (0..POOL_SIZE as usize)
            .map(|i| FeatureVector {
                number: i as u8 + 1,
                frequency_raw: frequency[i],
                frequency_norm: frequency_norm[i],
                absence_days_raw: absence[i],
                absence_norm: absence_norm[i],
                positional_uniformity: positional[i],
                parity_balance: parity[i],
                sum_tendency: sum[i],
            })
            .collect();

        Self { vectors }
    }

    pub fn get(&self, number: u8) -> Option<&FeatureVector> {
        match number {
            1..=POOL_SIZE => self.vectors.get((number - 1) as usize),
            _ => None,
        }
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureVector> {
        self.vectors.iter()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
