use crate::catalog::Catalog;
use crate::prelude::{AttractionId, GeoPoint, Intent, Size};
use crate::search::FilteredView;
use crate::view::ActivationKey;
use serde::Serialize;
use std::collections::HashMap;

/// Marker appearance; selection takes precedence over hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerVisual {
    Neutral,
    Hovered,
    Selected,
}

impl MarkerVisual {
    pub fn from_flags(is_selected: bool, is_hovered: bool) -> Self {
        if is_selected {
            MarkerVisual::Selected
        } else if is_hovered {
            MarkerVisual::Hovered
        } else {
            MarkerVisual::Neutral
        }
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            MarkerVisual::Neutral => [0x4f, 0x46, 0xe5],
            MarkerVisual::Hovered => [0x63, 0x66, 0xf1],
            MarkerVisual::Selected => [0x43, 0x38, 0xca],
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            MarkerVisual::Neutral => 1.0,
            MarkerVisual::Hovered | MarkerVisual::Selected => 1.1,
        }
    }

    /// Upward offset in pixels applied to emphasized pins.
    pub fn lift(self) -> f32 {
        match self {
            MarkerVisual::Neutral => 0.0,
            MarkerVisual::Hovered | MarkerVisual::Selected => 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: AttractionId,
    pub position: GeoPoint,
    pub visual: MarkerVisual,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub is_focused: bool,
    pub label: String,
    pub tooltip: String,
}

/// Difference between two marker generations, in the shape a map engine
/// consumes: what to place, what to regenerate, what to remove.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkerSync {
    pub placed: Vec<AttractionId>,
    pub updated: Vec<AttractionId>,
    pub removed: Vec<AttractionId>,
    /// Full marker set after the sync, in filtered order.
    pub markers: Vec<Marker>,
    /// Marker whose regenerated element must take keyboard focus back.
    pub restore_focus: Option<AttractionId>,
}

impl MarkerSync {
    /// A sync that places every marker from scratch.
    pub fn full(markers: Vec<Marker>) -> Self {
        Self {
            placed: markers.iter().map(|marker| marker.id).collect(),
            restore_focus: markers
                .iter()
                .find(|marker| marker.is_focused)
                .map(|marker| marker.id),
            markers,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerEvent {
    PointerEnter,
    PointerLeave,
    Click,
    KeyPress(ActivationKey),
    FocusIn,
    FocusOut,
}

/// Marker bookkeeping for the map: one marker per visible attraction, keyboard
/// focus tracked by attraction id and the last known render size.
#[derive(Debug, Clone, Default)]
pub struct MapView {
    markers: Vec<Marker>,
    focused: Option<AttractionId>,
    size: Option<Size>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn marker(&self, id: AttractionId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn focused(&self) -> Option<AttractionId> {
        self.focused
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Rebuilds marker visuals for the filtered view and reports the diff.
    ///
    /// Focus follows the attraction id, so a focused marker whose visual was
    /// regenerated is reported in `restore_focus`. Focus is dropped when the
    /// focused attraction is no longer visible.
    pub fn regenerate(
        &mut self,
        catalog: &Catalog,
        filtered: &FilteredView,
        selected: Option<AttractionId>,
        hovered: Option<AttractionId>,
    ) -> MarkerSync {
        if self.focused.is_some_and(|id| !filtered.contains(id)) {
            self.focused = None;
        }

        let previous: HashMap<AttractionId, Marker> = self
            .markers
            .drain(..)
            .map(|marker| (marker.id, marker))
            .collect();

        let mut sync = MarkerSync::default();
        for attraction in filtered.resolve(catalog) {
            let is_selected = selected == Some(attraction.id);
            let is_hovered = hovered == Some(attraction.id);
            let marker = Marker {
                id: attraction.id,
                position: attraction.position(),
                visual: MarkerVisual::from_flags(is_selected, is_hovered),
                is_selected,
                is_hovered,
                is_focused: self.focused == Some(attraction.id),
                label: format!("View details for {}", attraction.name),
                tooltip: attraction.name.clone(),
            };
            match previous.get(&attraction.id) {
                None => sync.placed.push(marker.id),
                Some(old) if old != &marker => {
                    sync.updated.push(marker.id);
                    if marker.is_focused {
                        sync.restore_focus = Some(marker.id);
                    }
                }
                Some(_) => {}
            }
            sync.markers.push(marker);
        }

        let mut removed: Vec<AttractionId> = previous
            .keys()
            .copied()
            .filter(|id| !filtered.contains(*id))
            .collect();
        removed.sort();
        sync.removed = removed;

        self.markers = sync.markers.clone();
        sync
    }

    /// Translates marker input into an intent. Focus changes are tracked
    /// locally and produce no intent.
    pub fn handle(&mut self, id: AttractionId, event: MarkerEvent) -> Option<Intent> {
        self.marker(id)?;
        match event {
            MarkerEvent::PointerEnter => Some(Intent::Hover { id }),
            MarkerEvent::PointerLeave => Some(Intent::Leave),
            MarkerEvent::Click => Some(Intent::Select { id }),
            MarkerEvent::KeyPress(key) if key.activates() => Some(Intent::Select { id }),
            MarkerEvent::KeyPress(_) => None,
            MarkerEvent::FocusIn => {
                self.set_focus(Some(id));
                None
            }
            MarkerEvent::FocusOut => {
                if self.focused == Some(id) {
                    self.set_focus(None);
                }
                None
            }
        }
    }

    /// Records a new container size; returns `true` when the engine must
    /// recalculate its render size.
    pub fn resize(&mut self, size: Size) -> bool {
        if size.is_empty() || self.size == Some(size) {
            return false;
        }
        self.size = Some(size);
        true
    }

    fn set_focus(&mut self, focused: Option<AttractionId>) {
        self.focused = focused;
        for marker in &mut self.markers {
            marker.is_focused = focused == Some(marker.id);
        }
    }
}
