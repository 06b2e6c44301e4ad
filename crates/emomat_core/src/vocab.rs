//! Ordered label vocabularies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// An ordered collection of distinct category labels.
///
/// A vocabulary defines both the universe of labels a matrix axis can hold
/// and the display order of its rows or columns. The order is exactly the
/// order the labels were given in; labels are never sorted.
///
/// # Example
///
/// ```rust
/// use emomat_core::Vocabulary;
///
/// let vocab = Vocabulary::new(["Sad", "Neutral", "Calm"]).unwrap();
/// assert_eq!(vocab.len(), 3);
/// assert_eq!(vocab.index_of("Neutral"), Some(1));
/// assert_eq!(vocab.index_of("Happy"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    labels: Vec<String>,
}

impl Vocabulary {
    /// Create a vocabulary from an ordered sequence of labels.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateLabel`] if any label occurs twice.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(CoreError::DuplicateLabel(label.clone()));
            }
        }
        Ok(Self { labels })
    }

    /// Position of `label` in the vocabulary, or `None` if it is not a member.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Whether `label` belongs to this vocabulary.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Whether every label of `other` is also a member of this vocabulary.
    #[must_use]
    pub fn contains_all(&self, other: &Vocabulary) -> bool {
        other.iter().all(|l| self.contains(l))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary holds no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    /// All labels in vocabulary order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over the labels in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels.join(", "))
    }
}
