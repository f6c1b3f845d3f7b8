//! Derived projections of the shared state for the list, the map markers and
//! the detail overlay. Views never mutate shared state; they translate user
//! input into [`Intent`](crate::prelude::Intent)s.

pub mod detail;
pub mod list;
pub mod map;

pub use detail::{DetailModel, DetailOverlay};
pub use list::{EmptyState, ListModel, ListNavigation, ListRow, ListView, RowEvent};
pub use map::{MapView, Marker, MarkerEvent, MarkerSync, MarkerVisual};

use crate::catalog::{Attraction, PLACEHOLDER_IMAGE};
use crate::prelude::AttractionId;
use std::collections::HashSet;

/// Keys that activate a focused row or marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKey {
    Enter,
    Space,
    Other,
}

impl ActivationKey {
    pub fn activates(self) -> bool {
        matches!(self, ActivationKey::Enter | ActivationKey::Space)
    }
}

pub(crate) fn image_for(attraction: &Attraction, failed: &HashSet<AttractionId>) -> String {
    if failed.contains(&attraction.id) {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        attraction.image_or_placeholder().to_string()
    }
}
