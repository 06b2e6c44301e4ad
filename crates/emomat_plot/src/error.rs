//! Error types for emomat_plot.

use thiserror::Error;

/// Result type alias using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while rendering a heatmap.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The matrix has no rows or no columns.
    #[error("Cannot render an empty matrix ({rows}x{cols})")]
    EmptyMatrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The canvas is too small for the grid and its margins.
    #[error("Canvas {width}x{height} is too small for the matrix layout")]
    CanvasTooSmall {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },

    /// The drawing backend failed.
    #[error("Drawing failed: {0}")]
    Draw(String),

    /// IO error from the filesystem.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
