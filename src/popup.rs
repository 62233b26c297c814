//! The switcher popup model.
//!
//! [`SwitcherPopup`] is everything about the popup that does not need a
//! real widget toolkit: which cells exist, how each one is styled, how big
//! the grid is, where it sits on screen and when it should fade away.  A
//! host adapter owns the widgets and drives the popup through
//! [`GridLayoutProvider`] plus [`display`](SwitcherPopup::display) /
//! [`tick`](SwitcherPopup::tick).

use crate::animation::PopupTimer;
use crate::config::{Config, VisualizerConfig};
use crate::direction::Direction;
use crate::grid::{GridShape, Wrap};
use crate::indicator::{build_indicators, Indicator};
use crate::layout::{
    allocate_cells, measure_height, width_pass, CellBox, HeightPass, LayoutParams, LayoutResult,
    Viewport,
};
use crate::traits::{DefaultWorkspaceNames, GridLayoutProvider, SettingsProvider, WorkspaceNames};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Usable monitor area (excluding struts such as docks), in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Progress through the current layout pass.
#[derive(Debug, Clone, Copy, Default)]
struct Pass {
    viewport: Option<Viewport>,
    height: Option<HeightPass>,
    layout: Option<LayoutResult>,
}

/// Host-independent workspace switcher popup.
pub struct SwitcherPopup {
    shape: GridShape,
    params: LayoutParams,
    wrap: Wrap,
    show_labels: bool,
    names: Box<dyn WorkspaceNames>,
    workspace_count: usize,
    active_index: usize,
    direction: Option<Direction>,
    indicators: Vec<Indicator>,
    pass: Pass,
    timer: PopupTimer,
}

impl SwitcherPopup {
    /// Create a popup for `workspace_count` workspaces.
    ///
    /// The popup starts hidden with workspace 0 active.
    pub fn new(
        settings: &dyn SettingsProvider,
        params: LayoutParams,
        timing: &VisualizerConfig,
        names: Box<dyn WorkspaceNames>,
        workspace_count: usize,
    ) -> Self {
        let shape = settings.grid_shape();
        info!(
            "popup: {}x{} grid, {} workspace(s), labels {}",
            shape.rows(),
            shape.columns(),
            workspace_count,
            if settings.show_workspace_labels() { "on" } else { "off" }
        );
        let mut popup = Self {
            shape,
            params,
            wrap: settings.wrap(),
            show_labels: settings.show_workspace_labels(),
            names,
            workspace_count,
            active_index: 0,
            direction: None,
            indicators: Vec::new(),
            pass: Pass::default(),
            timer: PopupTimer::new(timing),
        };
        popup.rebuild_indicators();
        popup
    }

    /// Build a popup from the application config, with as many workspaces
    /// as the grid has cells.
    pub fn from_config(config: &Config) -> Self {
        let names: Box<dyn WorkspaceNames> = if config.popup.workspace_names.is_empty() {
            Box::new(DefaultWorkspaceNames)
        } else {
            Box::new(config.popup.workspace_names.clone())
        };
        let count = config.grid_shape().capacity();
        Self::new(
            config,
            config.layout_params(),
            &config.visualizer,
            names,
            count,
        )
    }

    //  Accessors

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn workspace_count(&self) -> usize {
        self.workspace_count
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// One indicator per populated cell, in row-major order.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn is_visible(&self) -> bool {
        self.timer.is_visible()
    }

    /// Number of cells a layout pass will produce.
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count(self.workspace_count)
    }

    //  Updates

    /// The host's workspace count changed.  Invalidates the current pass.
    pub fn set_workspace_count(&mut self, count: usize) {
        if count == self.workspace_count {
            return;
        }
        debug!("workspace count {} -> {}", self.workspace_count, count);
        self.workspace_count = count;
        self.pass = Pass::default();
        self.rebuild_indicators();
    }

    /// Show the popup with `active_index` highlighted for `direction`.
    ///
    /// Returns the fresh indicators.  An out-of-range `active_index` leaves
    /// every cell neutral.
    pub fn display(
        &mut self,
        active_index: usize,
        direction: Option<Direction>,
        now: Instant,
    ) -> &[Indicator] {
        if active_index >= self.cell_count() {
            warn!(
                "active workspace {} outside the {} visible cell(s)",
                active_index,
                self.cell_count()
            );
        }
        self.active_index = active_index;
        self.direction = direction;
        self.rebuild_indicators();
        self.timer.show(now);
        &self.indicators
    }

    /// Step from the active workspace in `direction` and display the result.
    ///
    /// Returns the new active index, which equals the old one when the step
    /// is blocked.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> usize {
        let target =
            self.shape
                .neighbor(self.active_index, direction, self.wrap, self.workspace_count);
        self.display(target, Some(direction), now);
        target
    }

    /// Hide without fading.
    pub fn hide(&mut self) {
        self.timer.hide();
    }

    /// Advance the display timeout; returns the opacity to draw with.
    pub fn tick(&mut self, now: Instant) -> f64 {
        self.timer.tick(now)
    }

    /// Top-left corner that centres the popup in `work_area` below
    /// `top_inset`.  `popup_width` and `popup_height` are the popup's full
    /// natural size, padding included.
    pub fn placement(
        work_area: &WorkArea,
        top_inset: f64,
        popup_width: f64,
        popup_height: f64,
    ) -> (f64, f64) {
        let x = work_area.x + ((work_area.width - popup_width) / 2.0).floor();
        let y = work_area.y
            + top_inset
            + (((work_area.height - top_inset) - popup_height) / 2.0).floor();
        (x, y)
    }

    /// Run a complete layout pass and return the grid's natural size plus
    /// padding, ready for [`placement`](Self::placement).
    pub fn natural_size(&mut self, viewport: &Viewport) -> (f64, f64) {
        let height = self.preferred_height(viewport);
        let width = self.preferred_width(viewport);
        (
            width + self.params.horizontal_padding,
            height + self.params.vertical_padding,
        )
    }

    /// Cell size from the most recent completed width phase.
    pub fn layout(&self) -> Option<LayoutResult> {
        self.pass.layout
    }

    fn rebuild_indicators(&mut self) {
        let names = if self.show_labels {
            Some(self.names.as_ref())
        } else {
            None
        };
        self.indicators = build_indicators(
            self.cell_count(),
            self.active_index,
            self.direction,
            names,
        );
    }
}

impl GridLayoutProvider for SwitcherPopup {
    fn preferred_height(&mut self, viewport: &Viewport) -> f64 {
        let measured = measure_height(self.workspace_count, self.shape, viewport, &self.params);
        self.pass = Pass {
            viewport: Some(*viewport),
            height: Some(measured),
            layout: None,
        };
        measured.height
    }

    fn preferred_width(&mut self, viewport: &Viewport) -> f64 {
        let measured = match self.pass.height {
            Some(h) if self.pass.viewport.as_ref() == Some(viewport) => h,
            _ => {
                debug!("width requested before height for this viewport, measuring height first");
                self.preferred_height(viewport);
                match self.pass.height {
                    Some(h) => h,
                    None => return 0.0,
                }
            }
        };
        let wp = width_pass(measured.child_height, self.shape, viewport, &self.params);
        let layout = LayoutResult::from_passes(&measured, &wp);
        self.pass.layout = Some(layout);
        layout.width
    }

    fn allocate(&mut self, origin_x: f64, origin_y: f64) -> Vec<CellBox> {
        let layout = match (self.pass.layout, self.pass.viewport) {
            (Some(layout), _) => layout,
            (None, Some(vp)) => {
                debug!("allocate before width phase, finishing the pass");
                self.preferred_width(&vp);
                match self.pass.layout {
                    Some(layout) => layout,
                    None => return Vec::new(),
                }
            }
            (None, None) => {
                warn!("allocate called before any measurement, nothing to place");
                return Vec::new();
            }
        };
        allocate_cells(
            &layout,
            self.shape,
            self.workspace_count,
            self.params.spacing,
            origin_x,
            origin_y,
        )
    }
}
