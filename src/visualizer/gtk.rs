//! GTK4 + layer-shell host adapter for previewing the popup.
//!
//! # Widget tree
//!
//! ```text
//! window                          (layer-shell, transparent)
//! └ .ws-switcher-popup          (rounded background, padding)
//!     └ gtk4::Fixed             (one child per CellBox)
//!         ├ .ws-switcher-box
//!         ├ .ws-switcher-active-up / -down / -left / -right
//!         └ …   (each optionally holding a .ws-switcher-label)
//! ```
//!
//! The adapter runs the popup's three-phase layout, places one widget per
//! [`CellBox`](crate::layout::CellBox), and fades the popup with the opacity
//! from [`SwitcherPopup::tick`].  The preview walks the grid on a timer so
//! every indicator style gets shown.

use crate::direction::Direction;
use crate::layout::Viewport;
use crate::popup::{SwitcherPopup, WorkArea};
use crate::traits::GridLayoutProvider;
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use gtk4_layer_shell::{Edge, LayerShell};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Milliseconds between preview navigation steps.
const STEP_MS: u64 = 1200;

/// Navigation pattern for the preview walk.
const WALK: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

const DEFAULT_CSS: &str = r#"
window,
window.background {
    background-color: transparent;
    background: none;
}

.ws-switcher-popup {
    background-color: rgba(0, 0, 0, 0.8);
    border: 1px solid rgba(128, 128, 128, 0.4);
    border-radius: 9px;
}

.ws-switcher-box {
    background-color: rgba(255, 255, 255, 0.1);
    border-radius: 4px;
}

.ws-switcher-active-up,
.ws-switcher-active-down,
.ws-switcher-active-left,
.ws-switcher-active-right {
    background-color: rgba(255, 255, 255, 0.35);
    border-radius: 4px;
}

.ws-switcher-active-up    { border-top: 4px solid #4a90d9; }
.ws-switcher-active-down  { border-bottom: 4px solid #4a90d9; }
.ws-switcher-active-left  { border-left: 4px solid #4a90d9; }
.ws-switcher-active-right { border-right: 4px solid #4a90d9; }

.ws-switcher-label {
    color: white;
    font-size: 10pt;
}
"#;

/// Live widgets plus the model they render.
struct Preview {
    popup: SwitcherPopup,
    window: gtk4::Window,
    container: gtk4::Box,
    fixed: gtk4::Fixed,
    cells: Vec<gtk4::Box>,
    viewport: Viewport,
    work_area: WorkArea,
    padding: (f64, f64),
    step: usize,
}

impl Preview {
    /// Rebuild the cells for the popup's current indicators and layout.
    fn redisplay(&mut self) {
        for cell in self.cells.drain(..) {
            self.fixed.remove(&cell);
        }

        let (width, height) = self.popup.natural_size(&self.viewport);
        let (pad_x, pad_y) = self.padding;
        let boxes = self.popup.allocate(0.0, 0.0);

        for (cell_box, indicator) in boxes.iter().zip(self.popup.indicators()) {
            let cell = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
            cell.add_css_class(indicator.style_class());
            cell.set_size_request(cell_box.width() as i32, cell_box.height() as i32);
            if let Some(label) = &indicator.label {
                let l = gtk4::Label::new(Some(label.as_str()));
                l.add_css_class("ws-switcher-label");
                l.set_vexpand(true);
                cell.append(&l);
            }
            self.fixed.put(&cell, cell_box.x1, cell_box.y1);
            self.cells.push(cell);
        }

        self.container.set_margin_start((pad_x / 2.0) as i32);
        self.container.set_margin_end((pad_x / 2.0) as i32);
        self.container.set_margin_top((pad_y / 2.0) as i32);
        self.container.set_margin_bottom((pad_y / 2.0) as i32);

        let (x, y) = SwitcherPopup::placement(&self.work_area, self.viewport.top_inset, width, height);
        self.window.set_margin(Edge::Left, x as i32);
        self.window.set_margin(Edge::Top, y as i32);
        debug!(
            "redisplay: {} cell(s), popup {:.0}x{:.0} at ({:.0}, {:.0})",
            boxes.len(),
            width,
            height,
            x,
            y
        );
    }
}

/// Run the preview on the **current** (main) thread until the process is
/// interrupted.
pub fn run_preview(popup: SwitcherPopup, css_path: Option<PathBuf>, padding: (f64, f64), top_inset: f64) {
    if let Err(e) = gtk4::init() {
        log::error!("failed to initialise GTK4: {}", e);
        return;
    }
    info!("GTK4 initialised on main thread");

    load_css(&css_path);

    let viewport = primary_viewport()
        .unwrap_or_else(|| {
            warn!("no monitor geometry, assuming 1920x1080");
            Viewport::new(1920.0, 1080.0)
        })
        .with_top_inset(top_inset);
    let work_area = WorkArea {
        x: 0.0,
        y: 0.0,
        width: viewport.width,
        height: viewport.height,
    };

    let window = gtk4::Window::new();
    window.init_layer_shell();
    window.set_layer(gtk4_layer_shell::Layer::Overlay);
    window.set_namespace("wsgrid");
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::None);
    window.set_anchor(Edge::Left, true);
    window.set_anchor(Edge::Top, true);
    window.set_decorated(false);
    window.remove_css_class("background");

    let frame = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    frame.add_css_class("ws-switcher-popup");
    window.set_child(Some(&frame));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    frame.append(&container);
    let fixed = gtk4::Fixed::new();
    container.append(&fixed);

    let preview = Rc::new(RefCell::new(Preview {
        popup,
        window: window.clone(),
        container,
        fixed,
        cells: Vec::new(),
        viewport,
        work_area,
        padding,
        step: 0,
    }));

    {
        let mut p = preview.borrow_mut();
        let active = p.popup.active_index();
        p.popup.display(active, None, Instant::now());
        p.redisplay();
    }
    window.present();

    // Step timer: walk the grid so every indicator style shows up.
    {
        let preview = preview.clone();
        glib::timeout_add_local(Duration::from_millis(STEP_MS), move || {
            let mut p = preview.borrow_mut();
            let dir = WALK[p.step % WALK.len()];
            p.step += 1;
            let target = p.popup.navigate(dir, Instant::now());
            debug!("preview step {} -> {}", dir, target);
            p.redisplay();
            p.window.set_visible(true);
            glib::ControlFlow::Continue
        });
    }

    // Render tick: apply the display-timeout opacity at ~60 fps.
    {
        let preview = preview.clone();
        glib::timeout_add_local(Duration::from_millis(16), move || {
            let mut p = preview.borrow_mut();
            let opacity = p.popup.tick(Instant::now());
            p.window.set_opacity(opacity);
            if !p.popup.is_visible() && p.window.is_visible() {
                p.window.set_visible(false);
            }
            glib::ControlFlow::Continue
        });
    }

    info!("entering GLib main loop (Ctrl-C to quit)");
    let main_loop = glib::MainLoop::new(None, false);
    main_loop.run();
}

fn primary_viewport() -> Option<Viewport> {
    let display = gdk::Display::default()?;
    let monitor = display.monitors().item(0)?.downcast::<gdk::Monitor>().ok()?;
    let geometry = monitor.geometry();
    Some(Viewport::new(geometry.width() as f64, geometry.height() as f64))
}

fn load_css(css_path: &Option<PathBuf>) {
    let provider = gtk4::CssProvider::new();

    let css_content = match css_path.as_ref().filter(|p| p.exists()) {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) => {
                info!("user CSS: {} ({} bytes)", p.display(), content.len());
                content
            }
            Err(e) => {
                warn!("CSS read failed ({}): {}, using built-in", p.display(), e);
                DEFAULT_CSS.to_string()
            }
        },
        None => {
            info!("no user CSS, using built-in default");
            DEFAULT_CSS.to_string()
        }
    };

    #[allow(deprecated)]
    provider.load_from_data(&css_content);

    match gdk::Display::default() {
        Some(display) => gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        ),
        None => warn!("no GDK display, CSS will not be applied"),
    }
}
