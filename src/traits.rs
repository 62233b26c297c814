//! Traits that decouple the popup from any specific desktop host.
//!
//! The host owns widgets, theming and the event loop.  It talks to the
//! popup through [`GridLayoutProvider`] and feeds it settings and names
//! through [`SettingsProvider`] and [`WorkspaceNames`].  Nothing here reads
//! global state: everything the popup needs arrives as an argument.

use crate::grid::{GridShape, Wrap};
use crate::layout::{CellBox, Viewport};

/// The three-phase layout protocol a host runs for every layout pass.
///
/// # Contract
///
/// Within one pass the host calls [`preferred_height`](Self::preferred_height),
/// then [`preferred_width`](Self::preferred_width), then
/// [`allocate`](Self::allocate).  The width depends on the cell height the
/// height phase settled on, and allocation depends on both.
pub trait GridLayoutProvider {
    /// Natural height of the grid for `viewport`.
    fn preferred_height(&mut self, viewport: &Viewport) -> f64;

    /// Natural width of the grid for `viewport`.
    fn preferred_width(&mut self, viewport: &Viewport) -> f64;

    /// Boxes for every populated cell, starting at `(origin_x, origin_y)`.
    fn allocate(&mut self, origin_x: f64, origin_y: f64) -> Vec<CellBox>;
}

/// Read-only source of user settings.
///
/// Implementations are responsible for clamping the grid shape to at least
/// one row and one column.
pub trait SettingsProvider {
    fn grid_shape(&self) -> GridShape;

    fn show_workspace_labels(&self) -> bool;

    /// Edge behaviour for keyboard navigation.  Defaults to no wraparound.
    fn wrap(&self) -> Wrap {
        Wrap::NONE
    }
}

/// Display names for workspaces, used only when labels are enabled.
pub trait WorkspaceNames {
    fn workspace_name(&self, index: usize) -> String;
}

/// Names workspaces "Workspace 1", "Workspace 2", ….
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWorkspaceNames;

impl WorkspaceNames for DefaultWorkspaceNames {
    fn workspace_name(&self, index: usize) -> String {
        format!("Workspace {}", index + 1)
    }
}

impl WorkspaceNames for Vec<String> {
    /// Falls back to the default name past the end of the list.
    fn workspace_name(&self, index: usize) -> String {
        match self.get(index) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => DefaultWorkspaceNames.workspace_name(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    //  Mock SettingsProvider

    struct FixedSettings {
        shape: GridShape,
        labels: bool,
    }

    impl SettingsProvider for FixedSettings {
        fn grid_shape(&self) -> GridShape {
            self.shape
        }

        fn show_workspace_labels(&self) -> bool {
            self.labels
        }
    }

    #[test]
    fn settings_default_to_no_wrap() {
        let s = FixedSettings {
            shape: GridShape::new(3, 2),
            labels: true,
        };
        assert_eq!(s.wrap(), Wrap::NONE);
        assert_eq!(s.grid_shape().columns(), 2);
        assert!(s.show_workspace_labels());
    }

    //  Mock GridLayoutProvider

    /// A test double that records the order of protocol calls.
    #[derive(Default)]
    struct RecordingProvider {
        calls: RefCell<Vec<&'static str>>,
    }

    impl GridLayoutProvider for RecordingProvider {
        fn preferred_height(&mut self, _: &Viewport) -> f64 {
            self.calls.borrow_mut().push("height");
            10.0
        }

        fn preferred_width(&mut self, _: &Viewport) -> f64 {
            self.calls.borrow_mut().push("width");
            20.0
        }

        fn allocate(&mut self, _: f64, _: f64) -> Vec<CellBox> {
            self.calls.borrow_mut().push("allocate");
            Vec::new()
        }
    }

    /// Drive a provider the way a host does.
    fn run_pass(p: &mut dyn GridLayoutProvider, vp: &Viewport) -> (f64, f64, usize) {
        let h = p.preferred_height(vp);
        let w = p.preferred_width(vp);
        let cells = p.allocate(0.0, 0.0);
        (w, h, cells.len())
    }

    #[test]
    fn provider_is_object_safe_and_ordered() {
        let mut p = RecordingProvider::default();
        let (w, h, n) = run_pass(&mut p, &Viewport::new(800.0, 600.0));
        assert_eq!((w, h, n), (20.0, 10.0, 0));
        assert_eq!(*p.calls.borrow(), vec!["height", "width", "allocate"]);
    }

    #[test]
    fn default_names_are_one_based() {
        assert_eq!(DefaultWorkspaceNames.workspace_name(0), "Workspace 1");
        assert_eq!(DefaultWorkspaceNames.workspace_name(9), "Workspace 10");
    }

    #[test]
    fn name_list_falls_back_past_end() {
        let names = vec!["mail".to_string(), String::new()];
        assert_eq!(names.workspace_name(0), "mail");
        assert_eq!(names.workspace_name(1), "Workspace 2");
        assert_eq!(names.workspace_name(5), "Workspace 6");
    }
}
