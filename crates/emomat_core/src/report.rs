//! Classification reports derived from confusion matrices.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::confusion::ConfusionMatrix;
use crate::error::{CoreError, Result};

/// Precision, recall, F1 and support for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelMetrics {
    /// The label these metrics describe.
    pub label: String,
    /// Fraction of predictions of this label that were correct.
    pub precision: f64,
    /// Fraction of true instances of this label that were found.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of true instances of this label.
    pub support: u64,
}

/// Per-label and aggregate metrics for a square count matrix.
///
/// Macro averages run over labels that were actually observed (nonzero
/// support); weighted averages weight every label by its support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Per-label metrics, in vocabulary order.
    pub per_label: Vec<LabelMetrics>,
    /// Overall accuracy.
    pub accuracy: f64,
    /// Macro-averaged precision.
    pub macro_precision: f64,
    /// Macro-averaged recall.
    pub macro_recall: f64,
    /// Macro-averaged F1.
    pub macro_f1: f64,
    /// Support-weighted precision.
    pub weighted_precision: f64,
    /// Support-weighted recall.
    pub weighted_recall: f64,
    /// Support-weighted F1.
    pub weighted_f1: f64,
    /// Total number of counted observations.
    pub total: u64,
}

impl ClassificationReport {
    /// Derive a report from a square count matrix.
    ///
    /// Undefined ratios fall back to `0.0`: a label that was never
    /// predicted has precision zero, one that was never expressed has
    /// recall zero.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NonSquare`] if the matrix's row and column
    /// vocabularies differ.
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Result<Self> {
        if !matrix.is_square() {
            return Err(CoreError::NonSquare {
                rows: matrix.n_rows(),
                cols: matrix.n_cols(),
            });
        }

        let n = matrix.n_rows();
        let mut per_label = Vec::with_capacity(n);
        for i in 0..n {
            let tp = matrix.value(i, i);
            let row_sum = matrix.row_sum(i);
            let col_sum = matrix.col_sum(i);
            let precision = if col_sum > 0.0 { tp / col_sum } else { 0.0 };
            let recall = if row_sum > 0.0 { tp / row_sum } else { 0.0 };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            per_label.push(LabelMetrics {
                label: matrix.row_labels().label(i).to_string(),
                precision,
                recall,
                f1,
                support: row_sum.round() as u64,
            });
        }

        let mut observed = 0usize;
        let (mut macro_precision, mut macro_recall, mut macro_f1) = (0.0, 0.0, 0.0);
        for m in &per_label {
            if m.support > 0 {
                observed += 1;
                macro_precision += m.precision;
                macro_recall += m.recall;
                macro_f1 += m.f1;
            }
        }
        if observed > 0 {
            let n_observed = observed as f64;
            macro_precision /= n_observed;
            macro_recall /= n_observed;
            macro_f1 /= n_observed;
        }

        let total_support: f64 = per_label.iter().map(|m| m.support as f64).sum();
        let (mut weighted_precision, mut weighted_recall, mut weighted_f1) = (0.0, 0.0, 0.0);
        if total_support > 0.0 {
            for m in &per_label {
                let w = m.support as f64 / total_support;
                weighted_precision += m.precision * w;
                weighted_recall += m.recall * w;
                weighted_f1 += m.f1 * w;
            }
        }

        Ok(Self {
            per_label,
            accuracy: matrix.accuracy(),
            macro_precision,
            macro_recall,
            macro_f1,
            weighted_precision,
            weighted_recall,
            weighted_f1,
            total: matrix.total().round() as u64,
        })
    }

    /// Format the report as an aligned text table.
    #[must_use]
    pub fn to_string_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10} {:>10}\n\n",
            "", "precision", "recall", "f1-score", "support"
        ));
        for m in &self.per_label {
            out.push_str(&format!(
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
                m.label, m.precision, m.recall, m.f1, m.support
            ));
        }
        out.push('\n');
        out.push_str(&format!(
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}\n",
            "accuracy", "", "", self.accuracy, self.total
        ));
        out.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            "macro avg", self.macro_precision, self.macro_recall, self.macro_f1, self.total
        ));
        out.push_str(&format!(
            "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}\n",
            "weighted avg",
            self.weighted_precision,
            self.weighted_recall,
            self.weighted_f1,
            self.total
        ));
        out
    }

    /// The observed label with the lowest F1, or `None` if the matrix was
    /// empty.
    #[must_use]
    pub fn worst_label(&self) -> Option<&LabelMetrics> {
        self.per_label
            .iter()
            .filter(|m| m.support > 0)
            .min_by(|a, b| a.f1.partial_cmp(&b.f1).unwrap_or(Ordering::Equal))
    }

    /// The observed label with the highest F1, or `None` if the matrix was
    /// empty.
    #[must_use]
    pub fn best_label(&self) -> Option<&LabelMetrics> {
        self.per_label
            .iter()
            .filter(|m| m.support > 0)
            .max_by(|a, b| a.f1.partial_cmp(&b.f1).unwrap_or(Ordering::Equal))
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_table())
    }
}
