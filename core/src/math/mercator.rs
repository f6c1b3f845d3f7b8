use crate::prelude::GeoPoint;
use std::f64::consts::PI;

/// Edge length of one map tile in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Web-Mercator latitude limit; poles are clamped to it before projecting.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Normalized Web-Mercator coordinate, both axes in `0.0..=1.0`, y growing south.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

impl MercatorPoint {
    pub fn project(point: GeoPoint) -> Self {
        let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (point.lng + 180.0) / 360.0;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
        Self { x, y }
    }

    pub fn unproject(self) -> GeoPoint {
        let lng = self.x * 360.0 - 180.0;
        let n = PI * (1.0 - 2.0 * self.y);
        let lat = n.sinh().atan().to_degrees();
        GeoPoint::new(lat, lng)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Width of the whole world in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_center() {
        let p = MercatorPoint::project(GeoPoint::new(0.0, 0.0));
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn unproject_inverts_project() {
        let original = GeoPoint::new(5.0833, -1.35);
        let back = MercatorPoint::project(original).unproject();
        assert!((back.lat - original.lat).abs() < 1e-9);
        assert!((back.lng - original.lng).abs() < 1e-9);
    }

    #[test]
    fn north_is_up() {
        let north = MercatorPoint::project(GeoPoint::new(9.25, -1.85));
        let south = MercatorPoint::project(GeoPoint::new(5.1, -1.85));
        assert!(north.y < south.y);
    }

    #[test]
    fn world_doubles_per_zoom_level() {
        assert_eq!(world_size(0.0), 256.0);
        assert_eq!(world_size(3.0), 2048.0);
    }
}
