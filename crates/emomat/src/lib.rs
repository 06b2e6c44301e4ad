//! # emomat
//!
//! Confusion-matrix analysis and visualization for emotion perception
//! studies.
//!
//! emomat counts labeled confusion matrices from parallel sequences of
//! expressed and perceived labels, derives classification reports, and
//! renders annotated heatmap figures:
//!
//! - **Core**: Vocabularies, matrix construction, row normalization,
//!   rectangular tables, classification reports
//! - **Plot**: Heatmap rendering with colormaps, per-cell annotations
//!   and a colorbar
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use emomat::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let labels = Vocabulary::new(["Sad", "Calm", "Scared"])?;
//! let counts = confusion_matrix(
//!     &["Sad", "Sad", "Calm"],
//!     &["Sad", "Scared", "Calm"],
//!     &labels,
//! )?;
//! println!("{}", counts.to_string_table());
//!
//! render_heatmap(
//!     &counts.normalized(),
//!     "Expressed vs. Perceived",
//!     &HeatmapStyle::default(),
//!     "confusion.png",
//! )?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use emomat_core as core;
pub use emomat_plot as plot;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use emomat::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use emomat_core::{
        confusion_matrix, ClassificationReport, ConfusionMatrix, CoreError, LabelMetrics,
        Vocabulary,
    };

    // Plotting
    pub use emomat_plot::{render_heatmap, CellFormat, Colormap, HeatmapStyle, PlotError};
}
