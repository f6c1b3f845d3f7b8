use crate::math::bounds::GeoBounds;
use crate::math::easing::ease_in_out_cubic;
use crate::math::mercator::{world_size, MercatorPoint, TILE_SIZE};
use crate::prelude::{GeoPoint, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Viewport size assumed until the map container reports its real size.
pub const FALLBACK_VIEWPORT: Size = Size::new(1024.0, 768.0);

/// Camera instruction issued by the viewport controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CameraCommand {
    FlyTo {
        center: GeoPoint,
        zoom: f64,
        animate: bool,
    },
    FitBounds {
        bounds: GeoBounds,
        padding: f32,
        max_zoom: f64,
        animate: bool,
    },
    Reset {
        center: GeoPoint,
        zoom: f64,
        animate: bool,
    },
}

impl CameraCommand {
    pub fn is_animated(&self) -> bool {
        match self {
            CameraCommand::FlyTo { animate, .. }
            | CameraCommand::FitBounds { animate, .. }
            | CameraCommand::Reset { animate, .. } => *animate,
        }
    }

    pub fn without_animation(&self) -> Self {
        let mut command = self.clone();
        match &mut command {
            CameraCommand::FlyTo { animate, .. }
            | CameraCommand::FitBounds { animate, .. }
            | CameraCommand::Reset { animate, .. } => *animate = false,
        }
        command
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub center: GeoPoint,
    pub zoom: f64,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: CameraPose,
    to: CameraPose,
    started: Duration,
    duration: Duration,
}

/// Map camera with time-sampled transitions. A new command always replaces
/// the in-flight transition, starting from wherever the camera currently is.
#[derive(Debug, Clone)]
pub struct Camera {
    target: CameraPose,
    transition: Option<Transition>,
    viewport: Size,
    min_zoom: f64,
    max_zoom: f64,
}

impl Camera {
    pub fn new(home: CameraPose, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            target: home,
            transition: None,
            viewport: FALLBACK_VIEWPORT,
            min_zoom,
            max_zoom,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, size: Size) {
        if !size.is_empty() {
            self.viewport = size;
        }
    }

    /// Where the camera ends up once the current transition completes.
    pub fn target(&self) -> CameraPose {
        self.target
    }

    /// Computes the final pose for a command against the current viewport.
    pub fn resolve(&self, command: &CameraCommand) -> CameraPose {
        match command {
            CameraCommand::FlyTo { center, zoom, .. } | CameraCommand::Reset { center, zoom, .. } => {
                CameraPose {
                    center: *center,
                    zoom: zoom.clamp(self.min_zoom, self.max_zoom),
                }
            }
            CameraCommand::FitBounds {
                bounds,
                padding,
                max_zoom,
                ..
            } => {
                let sw = MercatorPoint::project(bounds.south_west);
                let ne = MercatorPoint::project(bounds.north_east);
                let center = sw.lerp(ne, 0.5).unproject();
                let cap = max_zoom.min(self.max_zoom);
                let zoom = fit_zoom(sw, ne, self.viewport, *padding, cap).max(self.min_zoom);
                CameraPose { center, zoom }
            }
        }
    }

    pub fn apply(&mut self, command: &CameraCommand, now: Duration, duration: Duration) {
        let from = self.pose_at(now);
        let to = self.resolve(command);
        self.transition = (command.is_animated() && !duration.is_zero()).then_some(Transition {
            from,
            to,
            started: now,
            duration,
        });
        self.target = to;
    }

    pub fn pose_at(&self, now: Duration) -> CameraPose {
        let Some(transition) = self.transition else {
            return self.target;
        };
        let elapsed = now.saturating_sub(transition.started);
        if elapsed.is_zero() {
            return transition.from;
        }
        if elapsed >= transition.duration {
            return transition.to;
        }
        let t = ease_in_out_cubic(elapsed.as_secs_f64() / transition.duration.as_secs_f64());
        let from = MercatorPoint::project(transition.from.center);
        let to = MercatorPoint::project(transition.to.center);
        CameraPose {
            center: from.lerp(to, t).unproject(),
            zoom: transition.from.zoom + (transition.to.zoom - transition.from.zoom) * t,
        }
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.transition
            .is_some_and(|transition| now.saturating_sub(transition.started) < transition.duration)
    }

    /// Drops a finished transition; returns whether one is still running.
    pub fn settle(&mut self, now: Duration) -> bool {
        if !self.is_animating(now) {
            self.transition = None;
        }
        self.transition.is_some()
    }

    /// Projects a coordinate into viewport pixels for the pose at `now`.
    pub fn to_screen(&self, point: GeoPoint, now: Duration) -> (f32, f32) {
        let pose = self.pose_at(now);
        let world = world_size(pose.zoom);
        let p = MercatorPoint::project(point);
        let c = MercatorPoint::project(pose.center);
        let x = (p.x - c.x) * world + f64::from(self.viewport.width) / 2.0;
        let y = (p.y - c.y) * world + f64::from(self.viewport.height) / 2.0;
        (x as f32, y as f32)
    }
}

/// Largest whole zoom at which the projected box fits inside the padded
/// viewport, capped at `max_zoom`.
fn fit_zoom(sw: MercatorPoint, ne: MercatorPoint, viewport: Size, padding: f32, max_zoom: f64) -> f64 {
    let span_x = (ne.x - sw.x).abs() * TILE_SIZE;
    let span_y = (sw.y - ne.y).abs() * TILE_SIZE;
    let avail_w = f64::from(viewport.width - 2.0 * padding).max(1.0);
    let avail_h = f64::from(viewport.height - 2.0 * padding).max(1.0);

    let scale = match (span_x > 0.0, span_y > 0.0) {
        (false, false) => return max_zoom,
        (true, false) => avail_w / span_x,
        (false, true) => avail_h / span_y,
        (true, true) => (avail_w / span_x).min(avail_h / span_y),
    };
    scale.log2().floor().min(max_zoom)
}
