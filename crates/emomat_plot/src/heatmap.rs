//! Annotated confusion-matrix heatmaps.
//!
//! Rendering works directly on the pixel grid of a bitmap drawing area:
//! margins are computed from the style and the label widths, cells are
//! filled from the colormap, and all text is placed with explicit
//! coordinates.

use std::path::Path;

use emomat_core::ConfusionMatrix;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;

use crate::error::{PlotError, Result};
use crate::style::{CellFormat, HeatmapStyle};

const TICK_PAD: i32 = 8;
const AXIS_PAD: i32 = 10;
const BAR_WIDTH: i32 = 20;
const BAR_PAD: i32 = 14;

/// Pixel geometry of one render: margins plus the cell grid.
struct Layout {
    left: i32,
    top: i32,
    cell_w: i32,
    cell_h: i32,
    grid_w: i32,
    grid_h: i32,
}

/// Render `matrix` as an annotated heatmap PNG at `path`.
///
/// The figure follows the usual confusion-matrix conventions: rows are
/// titled "True label" and columns "Predicted label", tick labels come
/// from the matrix vocabularies, cell fills scale with value over the
/// colormap, and a colorbar on the right maps fill back to value. Every
/// finite cell is annotated with its value, white on cells darker than
/// half the maximum and black otherwise. Non-finite cells get no fill
/// and no annotation.
///
/// # Errors
///
/// Returns [`PlotError::EmptyMatrix`] for a matrix with no rows or no
/// columns, [`PlotError::CanvasTooSmall`] when the styled canvas cannot
/// fit the grid, and [`PlotError::Draw`] when the backend fails.
pub fn render_heatmap<P: AsRef<Path>>(
    matrix: &ConfusionMatrix,
    title: &str,
    style: &HeatmapStyle,
    path: P,
) -> Result<()> {
    if matrix.n_rows() == 0 || matrix.n_cols() == 0 {
        return Err(PlotError::EmptyMatrix {
            rows: matrix.n_rows(),
            cols: matrix.n_cols(),
        });
    }

    let format = resolved_format(matrix, style);
    let max = matrix.max_value();
    let threshold = max / 2.0;
    let layout = compute_layout(matrix, style, format)?;

    let root = BitMapBackend::new(path.as_ref(), (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    draw_cells(&root, matrix, style, &layout, format, max, threshold)?;
    draw_tick_labels(&root, matrix, style, &layout)?;
    draw_axis_titles(&root, style, &layout)?;
    draw_title(&root, title, style, &layout)?;
    draw_colorbar(&root, style, &layout, format, max)?;

    root.present().map_err(draw_err)?;
    tracing::info!("wrote confusion heatmap to {}", path.as_ref().display());
    Ok(())
}

fn resolved_format(matrix: &ConfusionMatrix, style: &HeatmapStyle) -> CellFormat {
    match style.value_format {
        Some(format) => format,
        None if matrix.is_integral() => CellFormat::Integer,
        None => CellFormat::Fixed(2),
    }
}

fn annotation_color(value: f64, threshold: f64) -> &'static RGBColor {
    if value > threshold {
        &WHITE
    } else {
        &BLACK
    }
}

/// Rough width of rendered text, used for margin sizing and for centering
/// rotated labels.
fn estimated_text_width(text: &str, size: u32) -> i32 {
    (text.chars().count() as f64 * f64::from(size) * 0.6).ceil() as i32
}

fn compute_layout(
    matrix: &ConfusionMatrix,
    style: &HeatmapStyle,
    format: CellFormat,
) -> Result<Layout> {
    let width = style.width as i32;
    let height = style.height as i32;
    let tick_size = style.tick_label_size;

    let row_gutter = matrix
        .row_labels()
        .iter()
        .map(|l| estimated_text_width(l, tick_size))
        .max()
        .unwrap_or(0);
    let left = style.axis_label_size as i32 + AXIS_PAD + row_gutter + TICK_PAD;

    let top = style.title_size as i32 + 2 * AXIS_PAD;

    let col_gutter = if style.rotate_x_ticks {
        matrix
            .col_labels()
            .iter()
            .map(|l| estimated_text_width(l, tick_size))
            .max()
            .unwrap_or(0)
    } else {
        tick_size as i32
    };
    let bottom = style.axis_label_size as i32 + AXIS_PAD + col_gutter + TICK_PAD;

    let bar_label = estimated_text_width(&format.format(matrix.max_value()), tick_size);
    let right = BAR_PAD + BAR_WIDTH + TICK_PAD + bar_label + AXIS_PAD;

    let n_cols = matrix.n_cols() as i32;
    let n_rows = matrix.n_rows() as i32;
    let cell_w = (width - left - right) / n_cols;
    let cell_h = (height - top - bottom) / n_rows;
    if cell_w < 1 || cell_h < 1 {
        return Err(PlotError::CanvasTooSmall {
            width: style.width,
            height: style.height,
        });
    }

    Ok(Layout {
        left,
        top,
        cell_w,
        cell_h,
        grid_w: cell_w * n_cols,
        grid_h: cell_h * n_rows,
    })
}

fn draw_cells(
    root: &DrawingArea<BitMapBackend, Shift>,
    matrix: &ConfusionMatrix,
    style: &HeatmapStyle,
    layout: &Layout,
    format: CellFormat,
    max: f64,
    threshold: f64,
) -> Result<()> {
    let center = Pos::new(HPos::Center, VPos::Center);
    for row in 0..matrix.n_rows() {
        for col in 0..matrix.n_cols() {
            let v = matrix.value(row, col);
            if !v.is_finite() {
                // Blank cell, the background shows through.
                continue;
            }
            let x0 = layout.left + col as i32 * layout.cell_w;
            let y0 = layout.top + row as i32 * layout.cell_h;

            let t = if max > 0.0 { v / max } else { 0.0 };
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + layout.cell_w, y0 + layout.cell_h)],
                style.colormap.color(t).filled(),
            ))
            .map_err(draw_err)?;

            let st = (style.font_family.as_str(), style.cell_value_size)
                .into_font()
                .color(annotation_color(v, threshold))
                .pos(center);
            root.draw(&Text::new(
                format.format(v),
                (x0 + layout.cell_w / 2, y0 + layout.cell_h / 2),
                st,
            ))
            .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_tick_labels(
    root: &DrawingArea<BitMapBackend, Shift>,
    matrix: &ConfusionMatrix,
    style: &HeatmapStyle,
    layout: &Layout,
) -> Result<()> {
    let family = style.font_family.as_str();
    let tick_size = style.tick_label_size;

    let right_center = Pos::new(HPos::Right, VPos::Center);
    for (row, label) in matrix.row_labels().iter().enumerate() {
        let y = layout.top + row as i32 * layout.cell_h + layout.cell_h / 2;
        let st = (family, tick_size).into_font().color(&BLACK).pos(right_center);
        root.draw(&Text::new(label.to_string(), (layout.left - TICK_PAD, y), st))
            .map_err(draw_err)?;
    }

    let tick_y = layout.top + layout.grid_h + TICK_PAD;
    for (col, label) in matrix.col_labels().iter().enumerate() {
        let cx = layout.left + col as i32 * layout.cell_w + layout.cell_w / 2;
        if style.rotate_x_ticks {
            // Rotated text runs downward from its anchor and occupies one
            // line height to the anchor's left, so shift right by half a
            // line to center it on the column.
            let st = (family, tick_size)
                .into_font()
                .transform(FontTransform::Rotate90)
                .color(&BLACK);
            let x = cx + tick_size as i32 / 2;
            root.draw(&Text::new(label.to_string(), (x, tick_y), st))
                .map_err(draw_err)?;
        } else {
            let st = (family, tick_size)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            root.draw(&Text::new(label.to_string(), (cx, tick_y), st))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_axis_titles(
    root: &DrawingArea<BitMapBackend, Shift>,
    style: &HeatmapStyle,
    layout: &Layout,
) -> Result<()> {
    let family = style.font_family.as_str();

    let st = (family, style.axis_label_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    root.draw(&Text::new(
        "Predicted label",
        (layout.left + layout.grid_w / 2, style.height as i32 - 4),
        st,
    ))
    .map_err(draw_err)?;

    // Rotated 270 text runs upward from its anchor, so drop the anchor
    // half the estimated width below the grid center to center it.
    let st = (family, style.axis_label_size)
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK);
    let y = layout.top
        + layout.grid_h / 2
        + estimated_text_width("True label", style.axis_label_size) / 2;
    root.draw(&Text::new("True label", (AXIS_PAD / 2, y), st))
        .map_err(draw_err)?;
    Ok(())
}

fn draw_title(
    root: &DrawingArea<BitMapBackend, Shift>,
    title: &str,
    style: &HeatmapStyle,
    layout: &Layout,
) -> Result<()> {
    let st = (style.font_family.as_str(), style.title_size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        title.to_string(),
        (layout.left + layout.grid_w / 2, layout.top / 2),
        st,
    ))
    .map_err(draw_err)?;
    Ok(())
}

fn draw_colorbar(
    root: &DrawingArea<BitMapBackend, Shift>,
    style: &HeatmapStyle,
    layout: &Layout,
    format: CellFormat,
    max: f64,
) -> Result<()> {
    let x0 = layout.left + layout.grid_w + BAR_PAD;
    let x1 = x0 + BAR_WIDTH;

    for py in 0..layout.grid_h {
        let t = 1.0 - f64::from(py) / f64::from((layout.grid_h - 1).max(1));
        root.draw(&Rectangle::new(
            [(x0, layout.top + py), (x1, layout.top + py + 1)],
            style.colormap.color(t).filled(),
        ))
        .map_err(draw_err)?;
    }
    root.draw(&Rectangle::new(
        [(x0, layout.top), (x1, layout.top + layout.grid_h)],
        &BLACK,
    ))
    .map_err(draw_err)?;

    let family = style.font_family.as_str();
    let left_center = Pos::new(HPos::Left, VPos::Center);
    let ticks = [
        (max, layout.top),
        (max / 2.0, layout.top + layout.grid_h / 2),
        (0.0, layout.top + layout.grid_h),
    ];
    for (value, y) in ticks {
        let st = (family, style.tick_label_size)
            .into_font()
            .color(&BLACK)
            .pos(left_center);
        root.draw(&Text::new(format.format(value), (x1 + TICK_PAD, y), st))
            .map_err(draw_err)?;
    }
    Ok(())
}

fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}
