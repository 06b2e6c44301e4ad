//! Error types for emomat_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors for vocabulary handling and matrix construction.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The true and predicted label sequences have different lengths.
    #[error("Length mismatch: {n_true} true labels vs {n_pred} predicted labels")]
    LengthMismatch {
        /// Number of true labels.
        n_true: usize,
        /// Number of predicted labels.
        n_pred: usize,
    },

    /// A label occurs more than once in a vocabulary.
    #[error("Duplicate label in vocabulary: {0:?}")]
    DuplicateLabel(String),

    /// A label was requested from a vocabulary that does not contain it.
    #[error("Label {0:?} is not in the vocabulary")]
    MissingLabel(String),

    /// An operation that needs matching row and column labels got a
    /// rectangular or relabeled matrix.
    #[error("Expected a square matrix with matching labels, got {rows}x{cols}")]
    NonSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// A value buffer does not match the dimensions its vocabularies imply.
    #[error("Invalid shape: expected {expected} values, got {actual}")]
    InvalidShape {
        /// Number of values the vocabularies imply.
        expected: usize,
        /// Number of values provided.
        actual: usize,
    },
}
