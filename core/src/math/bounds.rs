use crate::prelude::GeoPoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    /// Smallest box enclosing every point; `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |bounds, point| {
            bounds.extend(point)
        }))
    }

    pub fn extend(self, point: GeoPoint) -> Self {
        Self {
            south_west: GeoPoint::new(
                self.south_west.lat.min(point.lat),
                self.south_west.lng.min(point.lng),
            ),
            north_east: GeoPoint::new(
                self.north_east.lat.max(point.lat),
                self.north_east.lng.max(point.lng),
            ),
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    pub fn is_point(&self) -> bool {
        self.south_west == self.north_east
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_covers_all_points() {
        let points = [
            GeoPoint::new(5.1053, -1.2466),
            GeoPoint::new(9.25, -1.85),
            GeoPoint::new(7.1167, 0.6),
        ];
        let bounds = GeoBounds::enclosing(points).unwrap();
        assert_eq!(bounds.south_west, GeoPoint::new(5.1053, -1.85));
        assert_eq!(bounds.north_east, GeoPoint::new(9.25, 0.6));
        assert!(points.iter().all(|&p| bounds.contains(p)));
    }

    #[test]
    fn enclosing_nothing_is_none() {
        assert!(GeoBounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_bounds_are_degenerate() {
        let bounds = GeoBounds::enclosing([GeoPoint::new(5.0, -1.0)]).unwrap();
        assert!(bounds.is_point());
    }
}
