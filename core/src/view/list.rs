use crate::catalog::{Catalog, Category};
use crate::prelude::{AttractionId, Intent};
use crate::search::FilteredView;
use crate::state::SelectionState;
use crate::view::{image_for, ActivationKey};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: AttractionId,
    pub name: String,
    pub category: Category,
    pub rating: f32,
    pub duration: String,
    pub image: String,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub is_focused: bool,
}

/// Message shown in place of rows when nothing matches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

pub const NO_MATCHES: EmptyState = EmptyState {
    title: "No places found",
    hint: "Try adjusting your search to find what you're looking for.",
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListModel {
    pub header: String,
    pub rows: Vec<ListRow>,
    pub empty: Option<EmptyState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEvent {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    Click,
    KeyPress(ActivationKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListNavigation {
    Next,
    Previous,
    First,
    Last,
}

/// Keyboard focus for the attraction list. Rows are derived on demand.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    focused: Option<AttractionId>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<AttractionId> {
        self.focused
    }

    pub fn project(
        &self,
        catalog: &Catalog,
        filtered: &FilteredView,
        state: &SelectionState,
        failed_images: &HashSet<AttractionId>,
    ) -> ListModel {
        let rows: Vec<ListRow> = filtered
            .resolve(catalog)
            .map(|attraction| ListRow {
                id: attraction.id,
                name: attraction.name.clone(),
                category: attraction.category,
                rating: attraction.rating,
                duration: attraction.duration.clone(),
                image: image_for(attraction, failed_images),
                is_selected: state.selected() == Some(attraction.id),
                is_hovered: state.hovered() == Some(attraction.id),
                is_focused: self.focused == Some(attraction.id),
            })
            .collect();

        let header = match rows.len() {
            1 => "1 remarkable destination".to_string(),
            n => format!("{n} remarkable destinations"),
        };
        let empty = rows.is_empty().then_some(NO_MATCHES);
        ListModel {
            header,
            rows,
            empty,
        }
    }

    /// Pointer and focus both drive hover; clicks and Enter/Space select.
    pub fn handle(&mut self, id: AttractionId, event: RowEvent) -> Option<Intent> {
        match event {
            RowEvent::PointerEnter => Some(Intent::Hover { id }),
            RowEvent::PointerLeave => Some(Intent::Leave),
            RowEvent::FocusIn => {
                self.focused = Some(id);
                Some(Intent::Hover { id })
            }
            RowEvent::FocusOut => {
                if self.focused == Some(id) {
                    self.focused = None;
                }
                Some(Intent::Leave)
            }
            RowEvent::Click => Some(Intent::Select { id }),
            RowEvent::KeyPress(key) if key.activates() => Some(Intent::Select { id }),
            RowEvent::KeyPress(_) => None,
        }
    }

    /// Moves keyboard focus through the visible rows, emitting the focus-leave
    /// of the old row before the focus-enter of the new one.
    pub fn navigate(&mut self, direction: ListNavigation, filtered: &FilteredView) -> Vec<Intent> {
        let ids = filtered.ids();
        if ids.is_empty() {
            return Vec::new();
        }
        let current = self.focused.and_then(|id| filtered.position(id));
        let last = ids.len() - 1;
        let next = match (direction, current) {
            (ListNavigation::First, _) | (ListNavigation::Next, None) => 0,
            (ListNavigation::Last, _) | (ListNavigation::Previous, None) => last,
            (ListNavigation::Next, Some(index)) => (index + 1).min(last),
            (ListNavigation::Previous, Some(index)) => index.saturating_sub(1),
        };
        if current == Some(next) {
            return Vec::new();
        }

        let mut intents = Vec::with_capacity(2);
        if let Some(old) = self.focused {
            intents.extend(self.handle(old, RowEvent::FocusOut));
        }
        intents.extend(self.handle(ids[next], RowEvent::FocusIn));
        intents
    }

    pub fn activate_focused(&mut self) -> Option<Intent> {
        let id = self.focused?;
        self.handle(id, RowEvent::KeyPress(ActivationKey::Enter))
    }

    /// Drops focus from a row that is no longer visible; returns `true` if it did.
    pub fn retain_visible(&mut self, filtered: &FilteredView) -> bool {
        if self.focused.is_some_and(|id| !filtered.contains(id)) {
            self.focused = None;
            return true;
        }
        false
    }
}
