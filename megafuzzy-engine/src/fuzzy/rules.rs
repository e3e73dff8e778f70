use crate::features::Variable;

/// Antecedent term, by position in the variable's term list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    Mid,
    High,
}

impl Level {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Consequent term of `score_interesse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interest {
    VeryLow,
    Low,
    Mid,
    High,
    VeryHigh,
}

impl Interest {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// IF every (variable, level) holds THEN interest is `consequent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub conditions: Vec<(Variable, Level)>,
    pub consequent: Interest,
}

impl Rule {
    pub fn new(conditions: &[(Variable, Level)], consequent: Interest) -> Self {
        Self {
            conditions: conditions.to_vec(),
            consequent,
        }
    }

    /// Fuzzy AND (minimum) over the referenced terms.
    /// `memberships[v][t]` is the degree of variable `v` in its term `t`.
    pub fn firing_strength(&self, memberships: &[Vec<f64>]) -> f64 {
        self.conditions
            .iter()
            .map(|(variable, level)| memberships[variable.index()][level.index()])
            .fold(1.0, f64::min)
    }
}

/// The twelve rules scoring a number's interest.
pub fn mega_sena_rules() -> Vec<Rule> {
    use Interest as I;
    use Level::{High, Low, Mid};
    use Variable::{
        DistribuicaoPosicional as Pos, EquilibrioParImpar as Parity, FrequenciaHistorica as Freq,
        TempoAusencia as Absence, TendenciaSoma as Sum,
    };

    vec![
        Rule::new(&[(Freq, High), (Absence, Low)], I::Low),
        Rule::new(&[(Freq, Low), (Absence, High)], I::VeryHigh),
        Rule::new(&[(Pos, High), (Parity, High)], I::High),
        Rule::new(&[(Freq, Mid), (Absence, Mid), (Sum, High)], I::High),
        Rule::new(
            &[(Freq, Low), (Absence, Low), (Pos, Low), (Parity, Low), (Sum, Low)],
            I::VeryLow,
        ),
        Rule::new(&[(Freq, Low), (Pos, High)], I::High),
        Rule::new(&[(Absence, High), (Parity, High)], I::High),
        Rule::new(&[(Freq, High), (Pos, Low)], I::Low),
        Rule::new(&[(Sum, High), (Parity, High), (Absence, Mid)], I::High),
        Rule::new(
            &[(Freq, Mid), (Absence, Mid), (Pos, Mid), (Parity, Mid), (Sum, Mid)],
            I::Mid,
        ),
        Rule::new(&[(Freq, Low), (Absence, Low), (Sum, High)], I::Mid),
        Rule::new(&[(Pos, High), (Sum, High)], I::High),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memberships(per_variable: [[f64; 3]; 5]) -> Vec<Vec<f64>> {
        per_variable.iter().map(|m| m.to_vec()).collect()
    }

    #[test]
    fn test_rule_count_and_consequents() {
        let rules = mega_sena_rules();
        assert_eq!(rules.len(), 12);
        let high = rules.iter().filter(|r| r.consequent == Interest::High).count();
        assert_eq!(high, 6);
        assert_eq!(rules[1].consequent, Interest::VeryHigh);
        assert_eq!(rules[4].consequent, Interest::VeryLow);
        assert_eq!(rules[4].conditions.len(), 5);
        assert_eq!(rules[9].conditions.len(), 5);
    }

    #[test]
    fn test_firing_strength_is_minimum() {
        let rules = mega_sena_rules();
        let m = memberships([
            [0.0, 0.4, 0.7], // frequencia
            [0.9, 0.2, 0.0], // ausencia
            [0.0, 0.0, 1.0], // posicional
            [0.0, 0.5, 0.3], // paridade
            [0.1, 0.6, 0.8], // soma
        ]);
        // freq=high ∧ absence=low
        assert_eq!(rules[0].firing_strength(&m), 0.7);
        // freq=mid ∧ absence=mid ∧ sum=high
        assert_eq!(rules[3].firing_strength(&m), 0.2);
        // positional=boa ∧ sum=high
        assert_eq!(rules[11].firing_strength(&m), 0.8);
        // freq=low ∧ ...
        assert_eq!(rules[4].firing_strength(&m), 0.0);
    }
}
