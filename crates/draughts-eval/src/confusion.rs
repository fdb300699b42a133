//! Detected-vs-ground-truth tallies.

use draughts_core::{BoardState, Occupancy, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

fn man_only_index(o: Occupancy) -> usize {
    match o {
        Occupancy::Empty => 0,
        Occupancy::WhiteMan | Occupancy::WhiteKing => 1,
        Occupancy::BlackMan | Occupancy::BlackKing => 2,
    }
}

fn king_aware_index(o: Occupancy) -> usize {
    match o {
        Occupancy::Empty => 0,
        Occupancy::WhiteMan => 1,
        Occupancy::WhiteKing => 2,
        Occupancy::BlackMan => 3,
        Occupancy::BlackKing => 4,
    }
}

/// Rows are detected classes, columns ground-truth classes.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix<const N: usize> {
    labels: [&'static str; N],
    index: fn(Occupancy) -> usize,
    cells: [[u64; N]; N],
}

/// Empty / white / black.
pub type ManConfusion = ConfusionMatrix<3>;
/// Empty / white man / white king / black man / black king.
pub type KingConfusion = ConfusionMatrix<5>;

impl ConfusionMatrix<3> {
    pub fn man_only() -> Self {
        Self {
            labels: ["NP", "WP", "BP"],
            index: man_only_index,
            cells: [[0; 3]; 3],
        }
    }
}

impl ConfusionMatrix<5> {
    pub fn king_aware() -> Self {
        Self {
            labels: ["NP", "WM", "WK", "BM", "BK"],
            index: king_aware_index,
            cells: [[0; 5]; 5],
        }
    }
}

impl<const N: usize> ConfusionMatrix<N> {
    pub fn record(&mut self, detected: Occupancy, truth: Occupancy) {
        self.cells[(self.index)(detected)][(self.index)(truth)] += 1;
    }

    /// Record all 32 squares of one image.
    pub fn record_board(&mut self, detected: &BoardState, truth: &BoardState) {
        for square in Square::all() {
            self.record(detected.get(square), truth.get(square));
        }
    }

    #[inline]
    pub fn get(&self, detected: usize, truth: usize) -> u64 {
        self.cells[detected][truth]
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    pub fn correct(&self) -> u64 {
        (0..N).map(|i| self.cells[i][i]).sum()
    }

    /// Fraction on the diagonal; 0 for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            t => self.correct() as f64 / t as f64,
        }
    }

    pub fn summary(&self) -> ConfusionSummary {
        ConfusionSummary {
            labels: self.labels.iter().map(|l| l.to_string()).collect(),
            cells: self.cells.iter().map(|r| r.to_vec()).collect(),
            total: self.total(),
            correct: self.correct(),
            accuracy: self.accuracy(),
        }
    }
}

fn write_table<L: AsRef<str>, R: AsRef<[u64]>>(
    f: &mut fmt::Formatter<'_>,
    labels: &[L],
    rows: &[R],
) -> fmt::Result {
    for label in labels {
        write!(f, "\tGT_{}", label.as_ref())?;
    }
    writeln!(f)?;
    for (label, row) in labels.iter().zip(rows.iter()) {
        write!(f, "D_{}", label.as_ref())?;
        for v in row.as_ref() {
            write!(f, "\t{v}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl<const N: usize> fmt::Display for ConfusionMatrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, &self.labels, &self.cells)
    }
}

/// Serializable snapshot of a confusion matrix.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfusionSummary {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<u64>>,
    pub total: u64,
    pub correct: u64,
    pub accuracy: f64,
}

impl fmt::Display for ConfusionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_table(f, &self.labels, &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn man_only_folds_kings() {
        let mut m = ConfusionMatrix::man_only();
        m.record(Occupancy::WhiteKing, Occupancy::WhiteMan);
        m.record(Occupancy::BlackMan, Occupancy::WhiteMan);
        assert_eq!(m.get(1, 1), 1);
        assert_eq!(m.get(2, 1), 1);
        assert_relative_eq!(m.accuracy(), 0.5);
    }

    #[test]
    fn totals_count_every_square_of_every_image() {
        let mut m = ConfusionMatrix::king_aware();
        let truth = BoardState::starting_position();
        let mut detected = truth;
        detected.set(Square::new(1).unwrap(), Occupancy::WhiteKing);
        for _ in 0..3 {
            m.record_board(&detected, &truth);
        }
        assert_eq!(m.total(), 32 * 3);
        assert_eq!(m.correct(), 31 * 3);
        assert_eq!(m.get(2, 1), 3);
    }

    #[test]
    fn renders_tab_separated_table() {
        let mut m = ConfusionMatrix::man_only();
        m.record(Occupancy::Empty, Occupancy::Empty);
        let text = m.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\tGT_NP\tGT_WP\tGT_BP");
        assert_eq!(lines[1], "D_NP\t1\t0\t0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn summary_serialises() {
        let s = ConfusionMatrix::man_only().summary();
        assert_eq!(s.labels, vec!["NP", "WP", "BP"]);
        assert_eq!(s.cells.len(), 3);
        assert!(serde_json::to_string(&s).unwrap().contains("\"total\":0"));
    }

    #[test]
    fn summary_renders_like_the_matrix() {
        let mut m = ConfusionMatrix::king_aware();
        m.record(Occupancy::BlackKing, Occupancy::BlackMan);
        assert_eq!(m.summary().to_string(), m.to_string());
    }
}
