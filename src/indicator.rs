//! Directional indicator selection.
//!
//! The popup draws every cell as a plain box except the active one, which
//! gets an edge highlight matching the direction the user just moved.  The
//! host maps each [`ActiveIndicatorState`] to a style class.

use crate::direction::Direction;
use crate::traits::WorkspaceNames;
use serde::Serialize;

/// Visual state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActiveIndicatorState {
    Neutral,
    Up,
    Down,
    Left,
    Right,
}

impl ActiveIndicatorState {
    /// Style class the host applies to the cell widget.
    pub fn style_class(self) -> &'static str {
        match self {
            ActiveIndicatorState::Neutral => "ws-switcher-box",
            ActiveIndicatorState::Up => "ws-switcher-active-up",
            ActiveIndicatorState::Down => "ws-switcher-active-down",
            ActiveIndicatorState::Left => "ws-switcher-active-left",
            ActiveIndicatorState::Right => "ws-switcher-active-right",
        }
    }
}

/// Pick the state of cell `cell_index`.
///
/// Only the active cell is ever highlighted, and only for a cardinal
/// `direction`.  No direction (e.g. the first display) or a diagonal one
/// leaves it neutral.
pub fn select_indicator(
    cell_index: usize,
    active_index: usize,
    direction: Option<Direction>,
) -> ActiveIndicatorState {
    if cell_index != active_index {
        return ActiveIndicatorState::Neutral;
    }
    match direction.filter(|d| d.is_cardinal()) {
        Some(Direction::Up) => ActiveIndicatorState::Up,
        Some(Direction::Down) => ActiveIndicatorState::Down,
        Some(Direction::Left) => ActiveIndicatorState::Left,
        Some(Direction::Right) => ActiveIndicatorState::Right,
        _ => ActiveIndicatorState::Neutral,
    }
}

/// One cell as the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub index: usize,
    pub state: ActiveIndicatorState,
    /// Workspace name, present only when labels are enabled.
    pub label: Option<String>,
}

impl Indicator {
    pub fn style_class(&self) -> &'static str {
        self.state.style_class()
    }
}

/// Build indicators for `count` cells, labelled through `names` if given.
pub fn build_indicators(
    count: usize,
    active_index: usize,
    direction: Option<Direction>,
    names: Option<&dyn WorkspaceNames>,
) -> Vec<Indicator> {
    (0..count)
        .map(|index| Indicator {
            index,
            state: select_indicator(index, active_index, direction),
            label: names.map(|n| n.workspace_name(index)),
        })
        .collect()
}
