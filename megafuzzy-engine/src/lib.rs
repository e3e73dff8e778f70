pub mod engine;
pub mod error;
pub mod features;
pub mod fuzzy;
pub mod normalize;
pub mod report;
pub mod weights;

pub use engine::ScoringEngine;
