//! **wsgrid**: a rows × columns workspace switcher popup.
//!
//! Workspaces are arranged in a fixed `rows × columns` grid.  When the user
//! switches workspace, a popup shows the whole grid with the new workspace
//! highlighted on the edge it was entered from.
//!
//! # Architecture
//!
//! The crate holds the parts of such a popup that do not depend on a widget
//! toolkit, and exposes them through traits a host adapter implements or
//! drives:
//!
//! * [`layout`] sizes and positions the cells for a given screen.
//! * [`indicator`] decides how each cell is styled.
//! * [`popup::SwitcherPopup`] combines both, tracks the active workspace
//!   and the display timeout, and implements
//!   [`traits::GridLayoutProvider`], the preferred-height /
//!   preferred-width / allocate protocol a host runs on every layout pass.
//!
//! Settings and workspace names come in through
//! [`traits::SettingsProvider`] and [`traits::WorkspaceNames`]; nothing
//! reads global desktop state.  A GTK4 reference adapter lives in
//! [`visualizer`] behind the `visualizer-gtk` feature.

pub mod animation;
pub mod config;
pub mod direction;
pub mod grid;
pub mod indicator;
pub mod layout;
pub mod popup;
pub mod traits;
pub mod visualizer;
