//! Pan/zoom state and timed camera transitions.
use std::time::{Duration, Instant};

use super::dataset::{Bounds, GeoPoint};

/// Fraction of the viewport a flown-to region may occupy.
const FIT_PADDING: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from_center: GeoPoint,
    from_zoom: f64,
    to_center: GeoPoint,
    to_zoom: f64,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Viewport over a dataset.
///
/// Zoom 1 shows the whole dataset extent; zoom `n` shows `1/n` of it on
/// each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    home: Bounds,
    center: GeoPoint,
    zoom: f64,
    max_zoom: f64,
    transition: Option<Transition>,
}

impl Camera {
    pub fn new(home: Bounds, max_zoom: f64) -> Self {
        Self {
            home,
            center: home.center(),
            zoom: 1.0,
            max_zoom: max_zoom.max(1.0),
            transition: None,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Region of the map currently in view.
    pub fn visible_bounds(&self) -> Bounds {
        Bounds::from_center(
            self.center,
            self.home.width() / 2.0 / self.zoom,
            self.home.height() / 2.0 / self.zoom,
        )
    }

    /// Zoom at which `target` fills the padded viewport.
    pub fn zoom_to_fit(&self, target: &Bounds) -> f64 {
        let fit = |home: f64, span: f64| {
            if span <= f64::EPSILON {
                self.max_zoom
            } else {
                home * FIT_PADDING / span
            }
        };
        fit(self.home.width(), target.width())
            .min(fit(self.home.height(), target.height()))
            .clamp(1.0, self.max_zoom)
    }

    /// Start a smooth pan and zoom onto `target`.
    pub fn fly_to(&mut self, target: &Bounds, duration: Duration, now: Instant) {
        self.transition = Some(Transition {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: target.center(),
            to_zoom: self.zoom_to_fit(target),
            started: now,
            duration,
        });
        self.tick(now);
    }

    /// Advance any running transition. Returns whether one is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };

        let t = smoothstep(transition.progress(now));
        self.center = GeoPoint::new(
            lerp(transition.from_center.lon, transition.to_center.lon, t),
            lerp(transition.from_center.lat, transition.to_center.lat, t),
        );
        // Interpolate zoom geometrically so the apparent speed stays even.
        self.zoom = (lerp(transition.from_zoom.ln(), transition.to_zoom.ln(), t)).exp();

        if t >= 1.0 {
            self.center = transition.to_center;
            self.zoom = transition.to_zoom;
            self.transition = None;
        }
        self.transition.is_some()
    }

    /// Shift the view by a fraction of the visible span. Cancels transitions.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.transition = None;
        let visible = self.visible_bounds();
        self.center.lon += dx * visible.width();
        self.center.lat += dy * visible.height();
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.transition = None;
        self.zoom = (self.zoom * factor).clamp(1.0, self.max_zoom);
    }

    pub fn reset(&mut self) {
        self.transition = None;
        self.center = self.home.center();
        self.zoom = 1.0;
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Bounds {
        Bounds {
            min: GeoPoint::new(-180.0, -90.0),
            max: GeoPoint::new(180.0, 90.0),
        }
    }

    fn target() -> Bounds {
        Bounds {
            min: GeoPoint::new(0.0, 40.0),
            max: GeoPoint::new(9.0, 49.0),
        }
    }

    #[test]
    fn fly_to_eases_and_lands_on_target() {
        let start = Instant::now();
        let mut camera = Camera::new(world(), 64.0);
        camera.fly_to(&target(), Duration::from_secs(2), start);
        assert!(camera.is_animating());

        camera.tick(start + Duration::from_millis(200));
        let early = camera.center();
        camera.tick(start + Duration::from_secs(1));
        let middle = camera.center();
        assert!(early.lon < middle.lon);
        assert!(middle.lon < 4.5);

        assert!(!camera.tick(start + Duration::from_secs(3)));
        assert_eq!(camera.center(), GeoPoint::new(4.5, 44.5));
        assert!(camera.visible_bounds().contains(GeoPoint::new(0.5, 40.5)));
        assert!(camera.zoom() > 10.0);
    }

    #[test]
    fn manual_pan_cancels_transition() {
        let start = Instant::now();
        let mut camera = Camera::new(world(), 64.0);
        camera.fly_to(&target(), Duration::from_secs(2), start);
        camera.pan(0.1, 0.0);
        assert!(!camera.is_animating());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new(world(), 8.0);
        camera.zoom_by(100.0);
        assert_eq!(camera.zoom(), 8.0);
        camera.zoom_by(0.001);
        assert_eq!(camera.zoom(), 1.0);
    }
}
