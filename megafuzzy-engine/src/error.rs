use megafuzzy_db::error::DataError;

/// Request rejected before any computation. Values are never clamped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("weight {name} = {value} outside 0-100")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("{name} = {value} outside {min}-{max}")]
    CountOutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("pool size {pool_n} smaller than top size {top_n}")]
    PoolSmallerThanTop { top_n: usize, pool_n: usize },

    #[error("number {0} outside 1-60")]
    NumberOutOfRange(u8),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
