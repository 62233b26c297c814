//! Grid layout calculator.
//!
//! Fits `rows × columns` workspace cells into the space a viewport leaves
//! for the switcher popup.  Every cell gets the same size; the size is found
//! in three passes that mirror the host's measure/allocate protocol:
//!
//! 1. [`height_pass`] sums the natural heights of the occupied rows and
//!    clamps the total to the available height.
//! 2. [`width_pass`] derives the cell width from the aspect ratio and
//!    shrinks both dimensions if the row would overflow horizontally.
//! 3. [`measure_height`] reconciles the two.  Height wins when both
//!    overflow.  [`compute_layout`] runs the whole sequence.
//!
//! [`allocate_cells`] then turns the cell size into one [`CellBox`] per
//! workspace.

use crate::grid::GridShape;
use log::debug;
use serde::{Deserialize, Serialize};

/// Screen area available to the popup, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical space reserved above the grid (e.g. a top panel).
    #[serde(default)]
    pub top_inset: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top_inset: 0.0,
        }
    }

    pub fn with_top_inset(mut self, top_inset: f64) -> Self {
        self.top_inset = top_inset;
        self
    }

    /// `width / height`, or `1.0` for a degenerate viewport.
    pub fn aspect_ratio(&self) -> f64 {
        sane_ratio(self.width / self.height)
    }

    /// Height left for the grid after the top inset and `vertical_padding`,
    /// never below zero.
    pub fn available_height(&self, vertical_padding: f64) -> f64 {
        (self.height - self.top_inset - vertical_padding).max(0.0)
    }

    /// Width left for the grid after `horizontal_padding`, never below zero.
    pub fn available_width(&self, horizontal_padding: f64) -> f64 {
        (self.width - horizontal_padding).max(0.0)
    }
}

/// Per-pass tuning that comes from theming rather than from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Gap between adjacent cells.
    pub spacing: f64,
    /// Natural height the host reports for a single cell before scaling.
    pub item_natural_height: f64,
    /// Sum of the vertical paddings of every container around the grid.
    pub vertical_padding: f64,
    /// Sum of the horizontal paddings of every container around the grid.
    pub horizontal_padding: f64,
    /// Cell `width / height`.  `None` uses the viewport's own ratio so each
    /// cell looks like a miniature screen.
    pub aspect_ratio: Option<f64>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            item_natural_height: 50.0,
            vertical_padding: 0.0,
            horizontal_padding: 0.0,
            aspect_ratio: None,
        }
    }
}

impl LayoutParams {
    fn aspect_for(&self, viewport: &Viewport) -> f64 {
        self.aspect_ratio
            .map(sane_ratio)
            .unwrap_or_else(|| viewport.aspect_ratio())
    }

    fn spacing_for(&self, count: usize) -> f64 {
        self.spacing.max(0.0) * count.saturating_sub(1) as f64
    }
}

/// Result of [`height_pass`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightPass {
    pub child_height: f64,
    /// Total grid height including inter-row spacing.
    pub height: f64,
    pub available_height: f64,
}

/// Result of [`width_pass`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthPass {
    pub child_width: f64,
    /// Equal to the input height unless the row had to shrink.
    pub child_height: f64,
    /// Total grid width including inter-column spacing.
    pub width: f64,
}

/// Per-cell size for one layout pass, plus the grid's natural size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutResult {
    pub child_width: f64,
    pub child_height: f64,
    pub width: f64,
    pub height: f64,
}

/// Pixel bounding box of one cell.  Cells are produced in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellBox {
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LayoutResult {
    /// Combine a settled height phase with the width pass run after it.
    pub fn from_passes(height: &HeightPass, width: &WidthPass) -> Self {
        Self {
            child_width: width.child_width,
            child_height: width.child_height,
            width: width.width,
            height: height.height,
        }
    }
}

impl CellBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// First pass: fit the occupied rows vertically.
///
/// Each occupied row contributes the natural item height scaled by the
/// viewport's aspect ratio.  The sum plus inter-row spacing is clamped to
/// the available height and divided over **all** configured rows.
pub fn height_pass(
    workspace_count: usize,
    shape: GridShape,
    viewport: &Viewport,
    params: &LayoutParams,
) -> HeightPass {
    let rows = shape.rows();
    let spacing = params.spacing_for(rows);
    let available_height = viewport.available_height(params.vertical_padding);

    let natural_row = params.item_natural_height * viewport.aspect_ratio();
    let natural = natural_row * shape.occupied_rows(workspace_count) as f64 + spacing;
    let height = natural.min(available_height).max(0.0);
    let child_height = ((height - spacing) / rows as f64).max(0.0);

    debug!(
        "height pass: {} rows, natural {:.1}, available {:.1}, child {:.2}",
        rows, natural, available_height, child_height
    );

    HeightPass {
        child_height,
        height,
        available_height,
    }
}

/// Second pass: derive the width from `child_height`, shrinking both
/// dimensions when the grid plus padding would be wider than the viewport.
pub fn width_pass(
    child_height: f64,
    shape: GridShape,
    viewport: &Viewport,
    params: &LayoutParams,
) -> WidthPass {
    let cols = shape.columns();
    let spacing = params.spacing_for(cols);
    let aspect = params.aspect_for(viewport);
    let padding = params.horizontal_padding;

    let mut child_width = child_height * aspect;
    let mut child_height = child_height;
    let mut width = child_width * cols as f64 + spacing;

    if width + padding > viewport.width {
        width = viewport.available_width(padding);
        child_width = ((width - spacing) / cols as f64).max(0.0);
        child_height = child_width / aspect;
        debug!(
            "width pass: overflow, shrunk to {:.2}x{:.2}",
            child_width, child_height
        );
    }

    WidthPass {
        child_width,
        child_height,
        width,
    }
}

/// Height phase as the host sees it: [`height_pass`], then a trial
/// [`width_pass`], then reconciliation.
///
/// If the width pass had to shrink the cells, the height is recomputed
/// from the smaller cell.  Should that still exceed the available height,
/// the cells are clamped to fit vertically; height takes priority over
/// width.
pub fn measure_height(
    workspace_count: usize,
    shape: GridShape,
    viewport: &Viewport,
    params: &LayoutParams,
) -> HeightPass {
    let rows = shape.rows();
    let spacing = params.spacing_for(rows);

    let hp = height_pass(workspace_count, shape, viewport, params);
    let wp = width_pass(hp.child_height, shape, viewport, params);

    let mut child_height = wp.child_height;
    let mut height = hp.height;
    if child_height != hp.child_height {
        height = child_height * rows as f64 + spacing;
        if height > hp.available_height {
            child_height = ((hp.available_height - spacing) / rows as f64).max(0.0);
            height = hp.available_height;
            debug!("reconcile: double overflow, height wins ({:.2})", child_height);
        }
    }

    HeightPass {
        child_height,
        height,
        available_height: hp.available_height,
    }
}

/// Run all passes and return the cell size for this layout.
///
/// Calling this twice with the same inputs gives identical results.
pub fn compute_layout(
    workspace_count: usize,
    shape: GridShape,
    viewport: &Viewport,
    params: &LayoutParams,
) -> LayoutResult {
    let measured = measure_height(workspace_count, shape, viewport, params);
    let settled = width_pass(measured.child_height, shape, viewport, params);
    LayoutResult::from_passes(&measured, &settled)
}

/// Lay out one box per workspace, starting at `(origin_x, origin_y)`.
///
/// Only the far edges are rounded.  Each near edge is the previous far edge
/// plus `spacing`, so gaps stay uniform while rounding error never
/// accumulates.
pub fn allocate_cells(
    layout: &LayoutResult,
    shape: GridShape,
    workspace_count: usize,
    spacing: f64,
    origin_x: f64,
    origin_y: f64,
) -> Vec<CellBox> {
    let n = shape.cell_count(workspace_count);
    let mut cells = Vec::with_capacity(n);

    let mut y = origin_y;
    let mut prev_y = origin_y;

    'rows: for row in 0..shape.rows() {
        let mut x = origin_x;
        let mut prev_x = origin_x;
        let mut row_bottom = prev_y;

        for col in 0..shape.columns() {
            if cells.len() == n {
                break 'rows;
            }
            let x1 = prev_x;
            let y1 = prev_y;
            let x2 = (x + layout.child_width).round().max(x1);
            let y2 = (y + layout.child_height).round().max(y1);

            cells.push(CellBox {
                index: cells.len(),
                row,
                col,
                x1,
                y1,
                x2,
                y2,
            });

            x += layout.child_width + spacing;
            prev_x = x2 + spacing;
            row_bottom = y2;
        }

        prev_y = row_bottom + spacing;
        y += layout.child_height + spacing;
    }

    cells
}

fn sane_ratio(r: f64) -> f64 {
    if r.is_finite() && r > 0.0 {
        r
    } else {
        1.0
    }
}

//  Tests
