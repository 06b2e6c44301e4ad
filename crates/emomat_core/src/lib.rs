//! # emomat_core
//!
//! Core types for confusion-matrix analysis of labeled judgement data.
//!
//! This crate provides:
//! - [`Vocabulary`] for ordered, duplicate-free label sets
//! - [`ConfusionMatrix`] for counting and row-normalizing true versus
//!   predicted label pairs
//! - [`ClassificationReport`] for per-label precision, recall and F1
//! - Error types and common utilities
//!
//! ## Axis Convention
//!
//! Matrix rows are true labels and columns are predicted labels, both in
//! the order their vocabulary gives them. Row and column vocabularies may
//! differ: the rectangular form keeps a row per genuinely expressed label
//! while every answer option keeps a column.
//!
//! ## Example
//!
//! ```rust
//! use emomat_core::{confusion_matrix, Vocabulary};
//!
//! let labels = Vocabulary::new(["Sad", "Calm", "Scared"]).unwrap();
//! let counts = confusion_matrix(
//!     &["Sad", "Sad", "Calm"],
//!     &["Sad", "Calm", "Calm"],
//!     &labels,
//! )
//! .unwrap();
//! let fractions = counts.normalized();
//! assert_eq!(fractions.value(1, 1), 1.0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod confusion;
mod error;
mod report;
mod vocab;

pub use confusion::{confusion_matrix, ConfusionMatrix};
pub use error::{CoreError, Result};
pub use report::{ClassificationReport, LabelMetrics};
pub use vocab::Vocabulary;
