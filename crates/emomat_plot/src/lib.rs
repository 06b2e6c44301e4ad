//! # emomat_plot
//!
//! Heatmap rendering for emomat confusion matrices.
//!
//! This crate turns a [`emomat_core::ConfusionMatrix`] into an annotated
//! PNG figure:
//! - Colormapped cell grid with per-cell value annotations
//! - Axis tick labels taken from the matrix vocabularies
//! - Colorbar legend, title and axis titles
//! - [`HeatmapStyle`] for fonts, sizes, colormap and formatting

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod colormap;
mod error;
mod heatmap;
mod style;

pub use colormap::Colormap;
pub use error::{PlotError, Result};
pub use heatmap::render_heatmap;
pub use style::{CellFormat, HeatmapStyle};
