//! Heatmap style configuration.

use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;

/// Numeric format for cell annotations and colorbar ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFormat {
    /// Whole numbers, for count tables.
    Integer,
    /// Fixed-point with the given number of decimal places.
    Fixed(usize),
}

impl CellFormat {
    /// Format one cell value.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match *self {
            CellFormat::Integer => format!("{}", value.round() as i64),
            CellFormat::Fixed(places) => format!("{:.1$}", value, places),
        }
    }
}

/// Visual configuration for one heatmap render.
///
/// The defaults produce publication-style figures: serif text, large
/// tick labels, an 800x600 canvas and the Blues colormap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapStyle {
    /// Font family for every piece of text.
    pub font_family: String,
    /// Title size in pixels.
    pub title_size: u32,
    /// Axis-title size in pixels.
    pub axis_label_size: u32,
    /// Tick-label size in pixels.
    pub tick_label_size: u32,
    /// Cell-annotation size in pixels.
    pub cell_value_size: u32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Colormap for cell fills and the colorbar.
    pub colormap: Colormap,
    /// Explicit annotation format. `None` picks [`CellFormat::Integer`]
    /// for whole-numbered tables and two decimal places otherwise.
    pub value_format: Option<CellFormat>,
    /// Draw column tick labels vertically instead of horizontally.
    pub rotate_x_ticks: bool,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            font_family: "serif".to_string(),
            title_size: 28,
            axis_label_size: 26,
            tick_label_size: 22,
            cell_value_size: 22,
            width: 800,
            height: 600,
            colormap: Colormap::default(),
            value_format: None,
            rotate_x_ticks: true,
        }
    }
}
