//! Confusion matrix construction over label vocabularies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::vocab::Vocabulary;

/// A labeled confusion matrix.
///
/// Rows are true labels and columns are predicted labels: the cell at
/// `(i, j)` holds how often row label `i` was answered with column label
/// `j`. One type covers both raw counts and row-normalized fractions.
/// Values are stored as `f64`, and [`ConfusionMatrix::is_integral`]
/// reports whether the table still holds whole numbers, which is what
/// decides integer versus fixed-point formatting downstream.
///
/// Row and column vocabularies may differ: the rectangular form keeps a
/// row per genuinely expressed label while every answer option keeps a
/// column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    row_labels: Vocabulary,
    col_labels: Vocabulary,
    /// Row-major cell values (`row * n_cols + col`).
    values: Vec<f64>,
}

impl ConfusionMatrix {
    /// Create a zero-filled matrix with the given axis vocabularies.
    #[must_use]
    pub fn zeros(row_labels: Vocabulary, col_labels: Vocabulary) -> Self {
        let values = vec![0.0; row_labels.len() * col_labels.len()];
        Self {
            row_labels,
            col_labels,
            values,
        }
    }

    /// Wrap precomputed cell values.
    ///
    /// `values` is row-major with one entry per `(row, col)` pair. Values
    /// are taken as given; non-finite cells render as blanks downstream.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShape`] if the value count does not
    /// match the vocabulary dimensions.
    pub fn from_values(
        row_labels: Vocabulary,
        col_labels: Vocabulary,
        values: Vec<f64>,
    ) -> Result<Self> {
        let expected = row_labels.len() * col_labels.len();
        if values.len() != expected {
            return Err(CoreError::InvalidShape {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            row_labels,
            col_labels,
            values,
        })
    }

    /// Count a square confusion matrix from parallel label sequences.
    ///
    /// Both axes use `labels`, in vocabulary order. Pairs where either
    /// side is out of vocabulary contribute to no cell.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if `y_true` and `y_pred`
    /// differ in length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use emomat_core::{ConfusionMatrix, Vocabulary};
    ///
    /// let labels = Vocabulary::new(["Sad", "Calm"]).unwrap();
    /// let m = ConfusionMatrix::from_pairs(
    ///     &["Sad", "Sad", "Calm"],
    ///     &["Sad", "Calm", "Calm"],
    ///     &labels,
    /// )
    /// .unwrap();
    /// assert_eq!(m.value(0, 0), 1.0);
    /// assert_eq!(m.value(0, 1), 1.0);
    /// assert_eq!(m.value(1, 1), 1.0);
    /// ```
    pub fn from_pairs<T, P>(y_true: &[T], y_pred: &[P], labels: &Vocabulary) -> Result<Self>
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        Self::count_pairs(y_true, y_pred, labels, labels)
    }

    /// Count a rectangular confusion matrix with separate axis vocabularies.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LengthMismatch`] if the sequences differ in
    /// length, or [`CoreError::MissingLabel`] if `row_labels` names a label
    /// that `col_labels` does not contain.
    pub fn from_pairs_asymmetric<T, P>(
        y_true: &[T],
        y_pred: &[P],
        row_labels: &Vocabulary,
        col_labels: &Vocabulary,
    ) -> Result<Self>
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        for label in row_labels.iter() {
            if !col_labels.contains(label) {
                return Err(CoreError::MissingLabel(label.to_string()));
            }
        }
        Self::count_pairs(y_true, y_pred, row_labels, col_labels)
    }

    fn count_pairs<T, P>(
        y_true: &[T],
        y_pred: &[P],
        row_labels: &Vocabulary,
        col_labels: &Vocabulary,
    ) -> Result<Self>
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        if y_true.len() != y_pred.len() {
            return Err(CoreError::LengthMismatch {
                n_true: y_true.len(),
                n_pred: y_pred.len(),
            });
        }

        let row_index: HashMap<&str, usize> =
            row_labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        let col_index: HashMap<&str, usize> =
            col_labels.iter().enumerate().map(|(i, l)| (l, i)).collect();

        let n_cols = col_labels.len();
        let mut matrix = Self::zeros(row_labels.clone(), col_labels.clone());
        let mut excluded = 0usize;
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            match (row_index.get(t.as_ref()), col_index.get(p.as_ref())) {
                (Some(&row), Some(&col)) => matrix.values[row * n_cols + col] += 1.0,
                _ => excluded += 1,
            }
        }
        if excluded > 0 {
            tracing::debug!(
                "excluded {} sample(s) with out-of-vocabulary labels",
                excluded
            );
        }
        Ok(matrix)
    }

    /// Count one `(true, predicted)` observation.
    ///
    /// Pairs whose true label is outside the row vocabulary or whose
    /// predicted label is outside the column vocabulary are ignored.
    pub fn add(&mut self, true_label: &str, pred_label: &str) {
        if let (Some(row), Some(col)) = (
            self.row_labels.index_of(true_label),
            self.col_labels.index_of(pred_label),
        ) {
            let n_cols = self.col_labels.len();
            self.values[row * n_cols + col] += 1.0;
        }
    }

    /// Row-normalized copy of the matrix.
    ///
    /// Each cell is divided by its row sum, turning every row into answer
    /// fractions. A zero row sum is replaced by one before dividing, so
    /// rows with no observations stay all zero instead of becoming NaN.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let n_cols = self.n_cols();
        let mut out = self.clone();
        for row in 0..self.n_rows() {
            let sum = self.row_sum(row);
            let divisor = if sum == 0.0 { 1.0 } else { sum };
            for col in 0..n_cols {
                out.values[row * n_cols + col] /= divisor;
            }
        }
        out
    }

    /// Copy of the matrix keeping only `rows`, in the order `rows` gives
    /// them. Columns are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingLabel`] if `rows` names a label this
    /// matrix has no row for.
    pub fn restrict_rows(&self, rows: &Vocabulary) -> Result<Self> {
        let n_cols = self.n_cols();
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for label in rows.iter() {
            let row = self
                .row_labels
                .index_of(label)
                .ok_or_else(|| CoreError::MissingLabel(label.to_string()))?;
            values.extend_from_slice(&self.values[row * n_cols..(row + 1) * n_cols]);
        }
        Ok(Self {
            row_labels: rows.clone(),
            col_labels: self.col_labels.clone(),
            values,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    /// Row (true-label) vocabulary.
    #[must_use]
    pub fn row_labels(&self) -> &Vocabulary {
        &self.row_labels
    }

    /// Column (predicted-label) vocabulary.
    #[must_use]
    pub fn col_labels(&self) -> &Vocabulary {
        &self.col_labels
    }

    /// Whether row and column vocabularies are identical, labels and
    /// order both.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.row_labels == self.col_labels
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.n_rows() && col < self.n_cols(),
            "cell ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.n_rows(),
            self.n_cols()
        );
        self.values[row * self.n_cols() + col]
    }

    /// Value for a `(true, predicted)` label pair, or `None` if either
    /// label is missing from its vocabulary.
    #[must_use]
    pub fn get(&self, true_label: &str, pred_label: &str) -> Option<f64> {
        let row = self.row_labels.index_of(true_label)?;
        let col = self.col_labels.index_of(pred_label)?;
        Some(self.values[row * self.n_cols() + col])
    }

    /// Sum of one row.
    #[must_use]
    pub fn row_sum(&self, row: usize) -> f64 {
        let n_cols = self.n_cols();
        self.values[row * n_cols..(row + 1) * n_cols].iter().sum()
    }

    /// Sum of one column.
    #[must_use]
    pub fn col_sum(&self, col: usize) -> f64 {
        (0..self.n_rows()).map(|row| self.value(row, col)).sum()
    }

    /// Sum of all cells.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Largest finite cell value, or `0.0` when the matrix has no finite
    /// cells.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        let max = self
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() {
            max
        } else {
            0.0
        }
    }

    /// Whether every cell holds a whole number.
    ///
    /// Count tables are integral; normalization usually makes cells
    /// fractional. Formatting code uses this to pick between integer and
    /// two-decimal annotations.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.values.iter().all(|v| v.is_finite() && v.fract() == 0.0)
    }

    /// Fraction of observations whose predicted label equals the true
    /// label.
    ///
    /// Works on rectangular tables too: a cell counts as correct when its
    /// row and column carry the same label. Returns `0.0` for an empty
    /// table.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        let correct: f64 = (0..self.n_rows())
            .filter_map(|row| {
                self.col_labels
                    .index_of(self.row_labels.label(row))
                    .map(|col| self.value(row, col))
            })
            .sum();
        correct / total
    }

    /// Format the matrix as an aligned text table.
    ///
    /// Integral tables print whole counts, fractional tables print two
    /// decimal places, matching the way heatmap annotations are chosen.
    #[must_use]
    pub fn to_string_table(&self) -> String {
        let integral = self.is_integral();
        let mut out = String::new();

        out.push_str(&format!("{:>9}", ""));
        for label in self.col_labels.iter() {
            out.push_str(&format!("{:>10}", truncate(label, 9)));
        }
        out.push('\n');

        for row in 0..self.n_rows() {
            out.push_str(&format!("{:>9}", truncate(self.row_labels.label(row), 9)));
            for col in 0..self.n_cols() {
                let v = self.value(row, col);
                if integral {
                    out.push_str(&format!("{:>10}", v as i64));
                } else {
                    out.push_str(&format!("{:>10.2}", v));
                }
            }
            out.push('\n');
        }
        out
    }
}

/// Compute a square confusion matrix from parallel label sequences.
///
/// # Arguments
///
/// * `y_true` - True labels, one per observation
/// * `y_pred` - Predicted labels, parallel to `y_true`
/// * `labels` - Vocabulary shared by both axes
///
/// # Errors
///
/// Returns [`CoreError::LengthMismatch`] if the sequences differ in length.
///
/// # Example
///
/// ```rust
/// use emomat_core::{confusion_matrix, Vocabulary};
///
/// let labels = Vocabulary::new(["Sad", "Calm", "Scared"]).unwrap();
/// let m = confusion_matrix(
///     &["Sad", "Sad", "Calm"],
///     &["Sad", "Scared", "Calm"],
///     &labels,
/// )
/// .unwrap();
/// assert_eq!(m.get("Sad", "Scared"), Some(1.0));
/// assert_eq!(m.total(), 3.0);
/// ```
pub fn confusion_matrix<T, P>(
    y_true: &[T],
    y_pred: &[P],
    labels: &Vocabulary,
) -> Result<ConfusionMatrix>
where
    T: AsRef<str>,
    P: AsRef<str>,
{
    ConfusionMatrix::from_pairs(y_true, y_pred, labels)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(labels: &[&str]) -> Vocabulary {
        Vocabulary::new(labels.iter().copied()).unwrap()
    }

    #[test]
    fn test_counts_small_study() {
        let labels = vocab(&["Sad", "Calm", "Scared"]);
        let y_true = ["Sad", "Sad", "Calm", "Calm", "Scared"];
        let y_pred = ["Sad", "Calm", "Calm", "Calm", "Sad"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

        assert_eq!(m.value(0, 0), 1.0);
        assert_eq!(m.value(0, 1), 1.0);
        assert_eq!(m.value(0, 2), 0.0);
        assert_eq!(m.value(1, 1), 2.0);
        assert_eq!(m.value(2, 0), 1.0);
        assert_eq!(m.get("Scared", "Scared"), Some(0.0));
        assert_eq!(m.total(), 5.0);
        assert!(m.is_square());
    }

    #[test]
    fn test_length_mismatch() {
        let labels = vocab(&["Sad", "Calm"]);
        let result = confusion_matrix(&["Sad", "Calm"], &["Sad"], &labels);
        assert!(matches!(
            result,
            Err(CoreError::LengthMismatch {
                n_true: 2,
                n_pred: 1
            })
        ));
    }

    #[test]
    fn test_out_of_vocabulary_excluded() {
        let labels = vocab(&["Sad", "Calm"]);
        let y_true = ["Sad", "Happy", "Calm", "Sad"];
        let y_pred = ["Sad", "Sad", "Happy", "Calm"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

        // Only the two fully in-vocabulary pairs are counted.
        assert_eq!(m.total(), 2.0);
        assert_eq!(m.value(0, 0), 1.0);
        assert_eq!(m.value(0, 1), 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        let labels = vocab(&["Sad", "Calm"]);
        let empty: [&str; 0] = [];
        let m = confusion_matrix(&empty, &empty, &labels).unwrap();
        assert_eq!(m.total(), 0.0);
        assert_eq!(m.accuracy(), 0.0);
        assert_eq!(m.max_value(), 0.0);
    }

    #[test]
    fn test_normalized_rows_sum_to_one() {
        let labels = vocab(&["Sad", "Calm", "Scared"]);
        let y_true = ["Sad", "Sad", "Sad", "Sad", "Calm", "Scared"];
        let y_pred = ["Sad", "Sad", "Sad", "Calm", "Calm", "Sad"];
        let norm = confusion_matrix(&y_true, &y_pred, &labels)
            .unwrap()
            .normalized();

        for row in 0..norm.n_rows() {
            assert!((norm.row_sum(row) - 1.0).abs() < 1e-12);
        }
        assert!((norm.value(0, 0) - 0.75).abs() < 1e-12);
        assert!((norm.value(0, 1) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_zero_row_stays_zero() {
        let labels = vocab(&["Sad", "Calm", "Scared"]);
        let y_true = ["Sad", "Calm"];
        let y_pred = ["Sad", "Scared"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

        assert_eq!(m.values, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);

        // "Scared" was never expressed; its row stays zero rather than NaN.
        let norm = m.normalized();
        assert_eq!(norm, m);
        assert!(norm.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_perfect_predictions() {
        let labels = vocab(&["Sad", "Calm"]);
        let y = ["Sad", "Calm", "Sad", "Sad"];
        let m = confusion_matrix(&y, &y, &labels).unwrap();

        assert_eq!(m.value(0, 0), 3.0);
        assert_eq!(m.value(1, 1), 1.0);
        assert_eq!(m.value(0, 1), 0.0);
        assert_eq!(m.value(1, 0), 0.0);
        assert_eq!(m.accuracy(), 1.0);

        let norm = m.normalized();
        assert_eq!(norm.value(0, 0), 1.0);
        assert_eq!(norm.value(1, 1), 1.0);
    }

    #[test]
    fn test_restrict_rows_matches_asymmetric_count() {
        let cols = vocab(&["Sad", "Calm", "Scared"]);
        let rows = vocab(&["Calm", "Sad"]);
        let y_true = ["Sad", "Sad", "Calm", "Scared", "Calm"];
        let y_pred = ["Scared", "Sad", "Calm", "Sad", "Sad"];

        let restricted = confusion_matrix(&y_true, &y_pred, &cols)
            .unwrap()
            .restrict_rows(&rows)
            .unwrap();
        let direct =
            ConfusionMatrix::from_pairs_asymmetric(&y_true, &y_pred, &rows, &cols).unwrap();

        assert_eq!(restricted, direct);
        assert_eq!(restricted.row_labels().labels(), &["Calm", "Sad"]);
        assert_eq!(restricted.n_rows(), 2);
        assert_eq!(restricted.n_cols(), 3);
        assert!(!restricted.is_square());
    }

    #[test]
    fn test_restrict_rows_missing_label() {
        let labels = vocab(&["Sad", "Calm"]);
        let m = ConfusionMatrix::zeros(labels.clone(), labels);
        let result = m.restrict_rows(&vocab(&["Sad", "Angry"]));
        assert!(matches!(result, Err(CoreError::MissingLabel(l)) if l == "Angry"));
    }

    #[test]
    fn test_asymmetric_rows_must_be_subset() {
        let rows = vocab(&["Sad", "Angry"]);
        let cols = vocab(&["Sad", "Calm"]);
        let result =
            ConfusionMatrix::from_pairs_asymmetric(&["Sad"], &["Sad"], &rows, &cols);
        assert!(matches!(result, Err(CoreError::MissingLabel(l)) if l == "Angry"));
    }

    #[test]
    fn test_add_ignores_unknown_labels() {
        let labels = vocab(&["Sad", "Calm"]);
        let mut m = ConfusionMatrix::zeros(labels.clone(), labels);
        m.add("Sad", "Calm");
        m.add("Sad", "Happy");
        m.add("Happy", "Sad");
        assert_eq!(m.value(0, 1), 1.0);
        assert_eq!(m.total(), 1.0);
    }

    #[test]
    fn test_accuracy() {
        let labels = vocab(&["Sad", "Calm"]);
        let y_true = ["Sad", "Sad", "Calm", "Calm"];
        let y_pred = ["Sad", "Calm", "Calm", "Calm"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();
        assert!((m.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_on_rectangular_table() {
        let cols = vocab(&["Sad", "Calm", "Scared"]);
        let rows = vocab(&["Sad"]);
        let y_true = ["Sad", "Sad", "Sad", "Scared"];
        let y_pred = ["Sad", "Scared", "Sad", "Scared"];
        let m = ConfusionMatrix::from_pairs_asymmetric(&y_true, &y_pred, &rows, &cols).unwrap();
        // Three counted observations, two on the Sad/Sad cell.
        assert!((m.accuracy() - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_integral_and_max_value() {
        let labels = vocab(&["Sad", "Calm"]);
        let y_true = ["Sad", "Sad", "Sad", "Calm"];
        let y_pred = ["Sad", "Sad", "Calm", "Calm"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

        assert!(m.is_integral());
        assert_eq!(m.max_value(), 2.0);

        let norm = m.normalized();
        assert!(!norm.is_integral());
        assert_eq!(norm.max_value(), 1.0);
    }

    #[test]
    fn test_from_values() {
        let rows = vocab(&["Sad"]);
        let cols = vocab(&["Sad", "Calm"]);
        let m = ConfusionMatrix::from_values(rows.clone(), cols.clone(), vec![3.0, f64::NAN])
            .unwrap();
        assert_eq!(m.value(0, 0), 3.0);
        assert!(m.value(0, 1).is_nan());
        assert!(!m.is_integral());
        assert_eq!(m.max_value(), 3.0);

        let result = ConfusionMatrix::from_values(rows, cols, vec![1.0]);
        assert!(matches!(
            result,
            Err(CoreError::InvalidShape {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_counting_is_deterministic() {
        let labels = vocab(&["Sad", "Calm", "Scared"]);
        let y_true = ["Sad", "Calm", "Scared", "Sad"];
        let y_pred = ["Calm", "Calm", "Sad", "Sad"];
        let a = confusion_matrix(&y_true, &y_pred, &labels).unwrap();
        let b = confusion_matrix(&y_true, &y_pred, &labels).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_to_string_table() {
        let labels = vocab(&["Sad", "Calm"]);
        let y_true = ["Sad", "Sad", "Calm"];
        let y_pred = ["Sad", "Calm", "Calm"];
        let m = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

        let table = m.to_string_table();
        assert!(table.contains("Sad"));
        assert!(table.contains("Calm"));
        assert!(table.contains('1'));

        let norm_table = m.normalized().to_string_table();
        assert!(norm_table.contains("0.50"));
        assert!(norm_table.contains("1.00"));
    }

    #[test]
    fn test_serialization() {
        let labels = vocab(&["Sad", "Calm"]);
        let m = confusion_matrix(&["Sad", "Calm"], &["Calm", "Calm"], &labels).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let restored: ConfusionMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m, restored);
    }
}
