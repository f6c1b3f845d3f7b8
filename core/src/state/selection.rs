use crate::prelude::{AttractionId, Intent};
use serde::Serialize;

/// Session-wide selection, hover and search state.
///
/// Selection and hover are independent: an attraction may be both selected and
/// hovered, and neither is reset when the query narrows the visible set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    selected: Option<AttractionId>,
    hovered: Option<AttractionId>,
    query: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<AttractionId> {
        self.selected
    }

    pub fn hovered(&self) -> Option<AttractionId> {
        self.hovered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns `true` when the selection actually changed.
    pub fn select(&mut self, id: AttractionId) -> bool {
        self.selected.replace(id) != Some(id)
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn hover(&mut self, id: AttractionId) -> bool {
        self.hovered.replace(id) != Some(id)
    }

    pub fn leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.query == text {
            return false;
        }
        self.query = text;
        true
    }

    /// Applies an intent immediately, without any debouncing.
    pub fn apply(&mut self, intent: &Intent) -> bool {
        match intent {
            Intent::Select { id } => self.select(*id),
            Intent::ClearSelection => self.clear_selection(),
            Intent::Hover { id } => self.hover(*id),
            Intent::Leave => self.leave(),
            Intent::SetQuery { text } => self.set_query(text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> AttractionId {
        AttractionId::new(raw).unwrap()
    }

    #[test]
    fn state_starts_empty() {
        let state = SelectionState::new();
        assert_eq!(state.selected(), None);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.query(), "");
    }

    #[test]
    fn latest_selection_wins() {
        let mut state = SelectionState::new();
        for raw in [3, 1, 4, 1, 5] {
            state.select(id(raw));
        }
        assert_eq!(state.selected(), Some(id(5)));
    }

    #[test]
    fn reselecting_is_idempotent() {
        let mut once = SelectionState::new();
        once.select(id(2));
        let mut twice = once.clone();
        assert!(!twice.select(id(2)));
        assert_eq!(once, twice);
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let mut state = SelectionState::new();
        state.select(id(1));
        state.hover(id(1));
        state.hover(id(2));
        assert_eq!(state.selected(), Some(id(1)));
        assert_eq!(state.hovered(), Some(id(2)));
        assert!(state.leave());
        assert_eq!(state.selected(), Some(id(1)));
        assert!(!state.leave());
    }

    #[test]
    fn query_change_keeps_selection_and_hover() {
        let mut state = SelectionState::new();
        state.select(id(1));
        state.hover(id(4));
        assert!(state.apply(&Intent::SetQuery { text: "zzz".into() }));
        assert_eq!(state.selected(), Some(id(1)));
        assert_eq!(state.hovered(), Some(id(4)));
        assert!(state.apply(&Intent::ClearSelection));
        assert_eq!(state.selected(), None);
    }
}
