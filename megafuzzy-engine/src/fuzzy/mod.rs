//! Fixed Mamdani system: five antecedents on [0, 100], one consequent on
//! [0, 10], twelve rules, min for AND and implication, max for aggregation.

pub mod membership;
pub mod rules;
pub mod system;
pub mod variable;

pub use membership::Triangle;
pub use rules::{Interest, Level, Rule};
pub use system::{CrispInputs, Defuzzification, Defuzzified, FuzzySystem};
pub use variable::{FuzzyVariable, Term};
