//! Host adapters that render the popup.
//!
//! With the `visualizer-gtk` feature, [`gtk::run_preview`] takes over the
//! main thread and draws the popup through GTK4 and layer-shell.

#[cfg(feature = "visualizer-gtk")]
pub mod gtk;
