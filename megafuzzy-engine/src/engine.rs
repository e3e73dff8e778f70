use std::path::Path;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use megafuzzy_db::appearance::AppearanceIndex;
use megafuzzy_db::dataset::read_records;
use megafuzzy_db::error::DataError;
use megafuzzy_db::models::{DrawRecord, POOL_SIZE};
use megafuzzy_db::repository::DrawRepository;

use crate::error::{EngineError, ValidationError};
use crate::features::{FeatureTable, FeatureVector, Variable};
use crate::fuzzy::{CrispInputs, Defuzzification, Defuzzified, FuzzySystem};
use crate::report::{self, NumberScore, Recommendation, RecommendationRequest};
use crate::weights::{Weights, DEFAULT_WEIGHT};

/// One row of the score table: what went into the fuzzy system for a number
/// and what came out.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredNumber {
    pub features: FeatureVector,
    pub inputs: CrispInputs,
    pub rule_strengths: Vec<f64>,
    pub result: Defuzzified,
}

impl ScoredNumber {
    pub fn number(&self) -> u8 {
        self.features.number
    }

    pub fn score(&self) -> f64 {
        self.result.score()
    }

    pub fn to_number_score(&self) -> NumberScore {
        NumberScore {
            number: self.number(),
            score: self.score(),
            fallback: self.result.is_fallback(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub total_draws: usize,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub total_numbers: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultConfig {
    pub variables: Vec<VariableInfo>,
    pub default_weights: Weights,
}

pub fn default_config() -> DefaultConfig {
    DefaultConfig {
        variables: Variable::ALL
            .iter()
            .map(|v| VariableInfo {
                name: v.name(),
                description: v.description(),
            })
            .collect(),
        default_weights: Weights::uniform(DEFAULT_WEIGHT),
    }
}

/// Dataset-derived state, built once. Every query takes `&self`, so a single
/// engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    repository: DrawRepository,
    index: AppearanceIndex,
    features: FeatureTable,
    system: FuzzySystem,
}

impl ScoringEngine {
    pub fn new(repository: DrawRepository) -> Self {
        let index = AppearanceIndex::build(&repository);
        let features = FeatureTable::derive(&repository, &index);
        tracing::info!(
            draws = repository.len(),
            appearances = index.total(),
            "scoring engine ready"
        );
        Self {
            repository,
            index,
            features,
            system: FuzzySystem::mega_sena(),
        }
    }

    pub fn from_records<I>(records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = DrawRecord>,
    {
        Ok(Self::new(DrawRepository::load(records)?))
    }

    pub fn from_csv(path: &Path, delimiter: u8) -> Result<Self, DataError> {
        Self::from_records(read_records(path, delimiter)?)
    }

    pub fn with_defuzzification(mut self, method: Defuzzification) -> Self {
        self.system = self.system.with_defuzzification(method);
        self
    }

    pub fn repository(&self) -> &DrawRepository {
        &self.repository
    }

    pub fn index(&self) -> &AppearanceIndex {
        &self.index
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn system(&self) -> &FuzzySystem {
        &self.system
    }

    fn score_vector(&self, features: &FeatureVector, weights: &Weights) -> ScoredNumber {
        let inputs = weights.apply(features);
        let result = self.system.evaluate(&inputs);
        if result.is_fallback() {
            tracing::debug!(number = features.number, "no rule fired, score falls back to 0");
        }
        ScoredNumber {
            features: features.clone(),
            rule_strengths: self.system.rule_strengths(&inputs),
            inputs,
            result,
        }
    }

    /// Scores all 60 numbers, in number order. Weights are not validated here.
    pub fn score_all(&self, weights: &Weights) -> Vec<ScoredNumber> {
        self.features
            .vectors()
            .par_iter()
            .map(|features| self.score_vector(features, weights))
            .collect()
    }

    pub fn score_number(&self, number: u8, weights: &Weights) -> Result<ScoredNumber, EngineError> {
        weights.validate()?;
        let features = self
            .features
            .get(number)
            .ok_or(ValidationError::NumberOutOfRange(number))?;
        Ok(self.score_vector(features, weights))
    }

    /// Score table sorted by descending score, ties by ascending number.
    pub fn ranked(&self, weights: &Weights) -> Vec<ScoredNumber> {
        let mut table = self.score_all(weights);
        table.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then(a.number().cmp(&b.number()))
        });
        table
    }

    pub fn compute_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, ValidationError> {
        request.validate()?;

        let scores: Vec<NumberScore> = self
            .score_all(&request.weights)
            .iter()
            .map(ScoredNumber::to_number_score)
            .collect();

        let recommendation = report::assemble(report::rank(scores), request.top_n, request.pool_n);
        tracing::debug!(
            top_n = request.top_n,
            pool_n = request.pool_n,
            fallbacks = recommendation.fallback_count,
            "recommendation computed"
        );
        Ok(recommendation)
    }

    pub fn dataset_info(&self) -> DatasetInfo {
        DatasetInfo {
            total_draws: self.repository.len(),
            earliest_date: self.repository.earliest_date(),
            latest_date: self.repository.newest_date(),
            total_numbers: POOL_SIZE,
        }
    }

    pub fn default_config(&self) -> DefaultConfig {
        default_config()
    }
}
