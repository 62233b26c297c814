//! Popup display timeout and fade.
//!
//! The popup shows instantly, lingers fully opaque for a while after the
//! last switch, then fades out.  Time is always passed in so the host can
//! drive the machine from its own frame clock.

use crate::config::VisualizerConfig;
use std::time::{Duration, Instant};

/// Cubic Bézier easing with control points (0,0), (x1,y1), (x2,y2), (1,1),
/// evaluated at normalised time `u ∈ [0, 1]`.
pub fn cubic_bezier(u: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
    let u = u.clamp(0.0, 1.0);

    // Newton-Raphson on x(t) = u, with bisection when it misbehaves.
    let mut t = u;
    let mut solved = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - u;
        if x.abs() < 1e-7 {
            solved = true;
            break;
        }
        let dx = (3.0 * ax * t + 2.0 * bx) * t + cx;
        if dx.abs() < 1e-7 {
            break;
        }
        t -= x / dx;
        if !(0.0..=1.0).contains(&t) {
            break;
        }
    }

    if !solved {
        let (mut lo, mut hi) = (0.0, 1.0);
        t = u;
        for _ in 0..32 {
            let x = sample(ax, bx, cx, t);
            if (x - u).abs() < 1e-7 {
                break;
            }
            if x < u {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// CSS `ease-out`: cubic-bezier(0, 0, 0.58, 1).
pub fn ease_out(u: f64) -> f64 {
    cubic_bezier(u, 0.0, 0.0, 0.58, 1.0)
}

/// Where the popup is in its show → linger → fade → hidden lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    /// Opaque, waiting for the linger period that started at the instant.
    Lingering(Instant),
    /// Opacity animating 1 → 0 since the instant.
    Fading(Instant),
}

/// Display-timeout state machine for the popup.
#[derive(Debug, Clone)]
pub struct PopupTimer {
    state: Visibility,
    linger: Duration,
    fade: Duration,
}

impl PopupTimer {
    pub fn new(config: &VisualizerConfig) -> Self {
        Self {
            state: Visibility::Hidden,
            linger: Duration::from_millis(config.linger_ms),
            fade: Duration::from_millis(config.fade_out_ms),
        }
    }

    pub fn state(&self) -> Visibility {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != Visibility::Hidden
    }

    /// (Re)show the popup at full opacity and restart the linger period.
    pub fn show(&mut self, now: Instant) {
        self.state = Visibility::Lingering(now);
    }

    /// Hide immediately, skipping linger and fade.
    pub fn hide(&mut self) {
        self.state = Visibility::Hidden;
    }

    /// Advance to `now` and return the opacity to draw with.
    pub fn tick(&mut self, now: Instant) -> f64 {
        match self.state {
            Visibility::Hidden => 0.0,
            Visibility::Lingering(since) => {
                if now.saturating_duration_since(since) < self.linger {
                    return 1.0;
                }
                if self.fade.is_zero() {
                    self.state = Visibility::Hidden;
                    return 0.0;
                }
                let fade_start = since + self.linger;
                self.state = Visibility::Fading(fade_start);
                self.tick(now)
            }
            Visibility::Fading(since) => {
                let t = now.saturating_duration_since(since).as_secs_f64() / self.fade.as_secs_f64();
                if t >= 1.0 {
                    self.state = Visibility::Hidden;
                    return 0.0;
                }
                1.0 - ease_out(t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(linger_ms: u64, fade_out_ms: u64) -> PopupTimer {
        PopupTimer::new(&VisualizerConfig {
            linger_ms,
            fade_out_ms,
        })
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn easing_endpoints() {
        assert!(ease_out(0.0).abs() < 1e-6);
        assert!((ease_out(1.0) - 1.0).abs() < 1e-6);
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn linear_bezier_is_identity() {
        for i in 0..=10 {
            let u = i as f64 / 10.0;
            assert!((cubic_bezier(u, 0.25, 0.25, 0.75, 0.75) - u).abs() < 1e-5);
        }
    }

    #[test]
    fn easing_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=50 {
            let v = ease_out(i as f64 / 50.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn starts_hidden() {
        let mut t = timer(600, 100);
        assert!(!t.is_visible());
        assert_eq!(t.tick(Instant::now()), 0.0);
    }

    #[test]
    fn lingers_then_fades_then_hides() {
        let mut t = timer(600, 100);
        let start = Instant::now();
        t.show(start);
        assert_eq!(t.tick(start + ms(300)), 1.0);

        let mid = t.tick(start + ms(650));
        assert!(mid > 0.0 && mid < 1.0);
        assert!(matches!(t.state(), Visibility::Fading(_)));

        assert_eq!(t.tick(start + ms(700)), 0.0);
        assert_eq!(t.state(), Visibility::Hidden);
    }

    #[test]
    fn reshow_restarts_linger() {
        let mut t = timer(600, 100);
        let start = Instant::now();
        t.show(start);
        t.tick(start + ms(650));
        t.show(start + ms(660));
        assert_eq!(t.tick(start + ms(1000)), 1.0);
    }

    #[test]
    fn zero_fade_hides_instantly() {
        let mut t = timer(200, 0);
        let start = Instant::now();
        t.show(start);
        assert_eq!(t.tick(start + ms(200)), 0.0);
        assert!(!t.is_visible());
    }

    #[test]
    fn hide_skips_fade() {
        let mut t = timer(600, 100);
        let start = Instant::now();
        t.show(start);
        t.hide();
        assert_eq!(t.tick(start), 0.0);
    }
}
