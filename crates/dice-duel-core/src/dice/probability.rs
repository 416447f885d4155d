//! Pairwise win probabilities, shown as the help table.

use super::die::Die;
use super::set::DiceSet;
use serde::Serialize;

/// Probability that `a` rolls strictly higher than `b`
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let total = a.len() * b.len();
    if total == 0 {
        return 0.0;
    }
    let wins = a
        .faces()
        .iter()
        .map(|x| b.faces().iter().filter(|y| x > y).count())
        .sum::<usize>();
    wins as f64 / total as f64
}

/// `rows[i][j]`: probability that die `i` beats die `j`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbabilityTable {
    rows: Vec<Vec<f64>>,
}

impl ProbabilityTable {
    pub fn from_dice(dice: &DiceSet) -> Self {
        let rows = dice
            .iter()
            .map(|a| dice.iter().map(|b| win_probability(a, b)).collect())
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}
