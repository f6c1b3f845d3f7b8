//! Session owner tying the shared state to the list, the markers, the detail
//! overlay and the camera.

use crate::catalog::Catalog;
use crate::map::camera::CameraCommand;
use crate::map::engine::MapEngine;
use crate::map::supervisor::{MapHealth, MapSupervisor};
use crate::prelude::{AttractionId, ExplorerConfig, Intent, Size};
use crate::search::FilteredView;
use crate::state::{LeaveDebouncer, LeaveTicket, SelectionState};
use crate::telemetry::{InteractionLog, InteractionMetrics, MetricsSnapshot};
use crate::view::{
    DetailModel, DetailOverlay, ListModel, ListNavigation, ListView, MapView, Marker, MarkerEvent,
    RowEvent,
};
use crate::viewport::{ViewportController, ViewportTarget};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// One applied state transition, numbered in the order intents took effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub seq: u64,
    pub at_ms: u128,
    pub intent: Intent,
}

/// Side effects a caller may need to act on after an input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Camera command forwarded to the map, if the viewport target changed.
    pub camera: Option<CameraCommand>,
    /// Hover-leave waiting for its debounce window; hand it back through
    /// [`Explorer::flush_leave`] once the window has passed.
    pub pending_leave: Option<LeaveTicket>,
}

impl Outcome {
    fn merge(&mut self, other: Outcome) {
        if other.camera.is_some() {
            self.camera = other.camera;
        }
        if other.pending_leave.is_some() {
            self.pending_leave = other.pending_leave;
        }
    }
}

/// Owns the selection/hover/query state and funnels every mutation through
/// [`Intent`]s. After each transition the filtered view, markers and viewport
/// rule are re-derived; views read projections and never mutate state.
pub struct Explorer<E: MapEngine> {
    catalog: Catalog,
    state: SelectionState,
    debouncer: LeaveDebouncer,
    filtered: FilteredView,
    list: ListView,
    map_view: MapView,
    viewport: ViewportController,
    map: MapSupervisor<E>,
    failed_images: HashSet<AttractionId>,
    journal: Vec<Transition>,
    clock: Duration,
    log: InteractionLog,
    metrics: InteractionMetrics,
}

impl<E: MapEngine> Explorer<E> {
    /// The map starts on the default home view, which already frames the
    /// unfiltered catalog, so no initial camera command is issued.
    pub fn new(catalog: Catalog, config: ExplorerConfig, engine: E) -> Self {
        let filtered = FilteredView::compute(&catalog, "");
        let initial = ViewportController::target(&catalog, None, &filtered);
        let mut explorer = Self {
            debouncer: LeaveDebouncer::new(config.leave_debounce()),
            viewport: ViewportController::seeded(config, initial),
            catalog,
            state: SelectionState::new(),
            filtered,
            list: ListView::new(),
            map_view: MapView::new(),
            map: MapSupervisor::new(engine),
            failed_images: HashSet::new(),
            journal: Vec::new(),
            clock: Duration::ZERO,
            log: InteractionLog::new(),
            metrics: InteractionMetrics::new(),
        };
        explorer.sync_markers();
        explorer
    }

    /// Loads the map engine on first use.
    pub fn start(&mut self) -> &MapHealth {
        self.map.load(self.clock)
    }

    pub fn retry_map(&mut self) -> bool {
        let recovered = self.map.retry(self.clock);
        if recovered {
            self.log.record("map engine recovered");
        }
        recovered
    }

    // Intents.

    pub fn select(&mut self, id: AttractionId) -> Outcome {
        self.dispatch(Intent::Select { id })
    }

    pub fn clear_selection(&mut self) -> Outcome {
        self.dispatch(Intent::ClearSelection)
    }

    pub fn hover(&mut self, id: AttractionId) -> Outcome {
        self.dispatch(Intent::Hover { id })
    }

    pub fn leave(&mut self) -> Outcome {
        self.dispatch(Intent::Leave)
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> Outcome {
        self.dispatch(Intent::SetQuery { text: text.into() })
    }

    /// Applies one intent synchronously. `leave` is deferred by the debounce
    /// window; a `hover` cancels a pending leave.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Leave if !self.debouncer.is_immediate() => {
                if self.state.hovered().is_none() {
                    self.debouncer.cancel();
                    return Outcome::default();
                }
                let ticket = self.debouncer.schedule(self.clock);
                Outcome {
                    pending_leave: Some(ticket),
                    ..Default::default()
                }
            }
            Intent::Hover { .. } => {
                if self.debouncer.cancel() {
                    self.metrics.record_cancelled_leave();
                }
                self.commit(intent)
            }
            _ => self.commit(intent),
        }
    }

    /// Applies a debounced leave if `ticket` is still the pending one.
    pub fn flush_leave(&mut self, ticket: LeaveTicket) -> Outcome {
        if self.debouncer.take_if_current(ticket) {
            self.commit(Intent::Leave)
        } else {
            Outcome::default()
        }
    }

    /// Moves the session clock forward, firing a due hover-leave.
    pub fn advance(&mut self, now: Duration) -> Outcome {
        self.clock = self.clock.max(now);
        match self.debouncer.take_due(self.clock) {
            Some(_) => self.commit(Intent::Leave),
            None => Outcome::default(),
        }
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    // View input.

    pub fn row_event(&mut self, id: AttractionId, event: RowEvent) -> Outcome {
        match self.list.handle(id, event) {
            Some(intent) => self.dispatch(intent),
            None => Outcome::default(),
        }
    }

    pub fn navigate_list(&mut self, direction: ListNavigation) -> Outcome {
        let intents = self.list.navigate(direction, &self.filtered);
        self.dispatch_all(intents)
    }

    pub fn activate_focused_row(&mut self) -> Outcome {
        match self.list.activate_focused() {
            Some(intent) => self.dispatch(intent),
            None => Outcome::default(),
        }
    }

    pub fn marker_event(&mut self, id: AttractionId, event: MarkerEvent) -> Outcome {
        match self.map_view.handle(id, event) {
            Some(intent) => self.dispatch(intent),
            None => Outcome::default(),
        }
    }

    pub fn close_detail(&mut self) -> Outcome {
        self.dispatch(DetailOverlay::close())
    }

    /// Container resize; the engine recalculates its render size on change.
    pub fn resize_map(&mut self, size: Size) -> bool {
        if self.map_view.resize(size) {
            self.map.invalidate_size(size);
            return true;
        }
        false
    }

    pub fn mark_image_failed(&mut self, id: AttractionId) {
        self.failed_images.insert(id);
    }

    // Projections.

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn filtered(&self) -> &FilteredView {
        &self.filtered
    }

    pub fn list_model(&self) -> ListModel {
        self.list
            .project(&self.catalog, &self.filtered, &self.state, &self.failed_images)
    }

    pub fn focused_row(&self) -> Option<AttractionId> {
        self.list.focused()
    }

    pub fn markers(&self) -> &[Marker] {
        self.map_view.markers()
    }

    pub fn focused_marker(&self) -> Option<AttractionId> {
        self.map_view.focused()
    }

    pub fn detail(&self) -> Option<DetailModel> {
        DetailOverlay::project(&self.catalog, self.state.selected(), &self.failed_images)
    }

    pub fn viewport_target(&self) -> Option<&ViewportTarget> {
        self.viewport.current()
    }

    pub fn map_health(&self) -> &MapHealth {
        self.map.health()
    }

    pub fn engine(&self) -> &E {
        self.map.engine()
    }

    pub fn engine_mut(&mut self) -> &mut E {
        self.map.engine_mut()
    }

    pub fn journal(&self) -> &[Transition] {
        &self.journal
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.map.faults(), self.map.retries())
    }

    fn dispatch_all(&mut self, intents: Vec<Intent>) -> Outcome {
        let mut outcome = Outcome::default();
        for intent in intents {
            outcome.merge(self.dispatch(intent));
        }
        outcome
    }

    fn commit(&mut self, intent: Intent) -> Outcome {
        if !self.state.apply(&intent) {
            return Outcome::default();
        }
        let query_changed = matches!(intent, Intent::SetQuery { .. });
        self.record(intent);
        if query_changed {
            self.refilter();
        }
        self.sync_markers();
        self.reframe()
    }

    fn record(&mut self, intent: Intent) {
        let seq = self.journal.len() as u64 + 1;
        self.log.record_intent(seq, &intent);
        self.metrics.record_intent();
        self.journal.push(Transition {
            seq,
            at_ms: self.clock.as_millis(),
            intent,
        });
    }

    /// Recomputes the filtered view. A hovered attraction that is no longer
    /// visible gets its leave right away.
    fn refilter(&mut self) {
        self.filtered = FilteredView::compute(&self.catalog, self.state.query());
        self.list.retain_visible(&self.filtered);
        let hidden = self
            .state
            .hovered()
            .is_some_and(|id| !self.filtered.contains(id));
        if hidden {
            self.debouncer.cancel();
            self.state.leave();
            self.record(Intent::Leave);
        }
    }

    fn sync_markers(&mut self) {
        let sync = self.map_view.regenerate(
            &self.catalog,
            &self.filtered,
            self.state.selected(),
            self.state.hovered(),
        );
        if !sync.is_empty() || sync.restore_focus.is_some() {
            self.map.sync_markers(sync);
        }
    }

    fn reframe(&mut self) -> Outcome {
        let command = self
            .viewport
            .evaluate(&self.catalog, self.state.selected(), &self.filtered);
        if let Some(command) = &command {
            self.log.record_camera(command);
            self.metrics.record_camera();
            self.map.apply_camera(command.clone(), self.clock);
        }
        Outcome {
            camera: command,
            pending_leave: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::camera::CameraPose;
    use crate::map::scene::SceneEngine;
    use crate::map::MapFault;
    use crate::prelude::GeoPoint;
    use crate::view::ActivationKey;

    fn explorer() -> Explorer<SceneEngine> {
        explorer_with(ExplorerConfig::default())
    }

    fn explorer_with(config: ExplorerConfig) -> Explorer<SceneEngine> {
        let engine = SceneEngine::new(&config);
        let mut explorer = Explorer::new(Catalog::ghana().unwrap(), config, engine);
        explorer.start();
        explorer
    }

    fn id_of(explorer: &Explorer<SceneEngine>, name: &str) -> AttractionId {
        explorer.catalog().find_by_name(name).unwrap().id
    }

    fn settled_pose(explorer: &Explorer<SceneEngine>) -> CameraPose {
        explorer.engine().camera().target()
    }

    #[test]
    fn end_to_end_castle_search_and_select() {
        let mut explorer = explorer();
        explorer.set_query("castle");
        let names: Vec<String> = explorer
            .list_model()
            .rows
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(names, vec!["Cape Coast Castle", "Elmina Castle"]);
        assert_eq!(explorer.markers().len(), 2);

        let elmina = id_of(&explorer, "Elmina Castle");
        let outcome = explorer.select(elmina);
        assert_eq!(
            outcome.camera,
            Some(CameraCommand::FlyTo {
                center: GeoPoint::new(5.0833, -1.35),
                zoom: 13.0,
                animate: true,
            })
        );
        let pose = settled_pose(&explorer);
        assert_eq!(pose.center, GeoPoint::new(5.0833, -1.35));
        assert_eq!(pose.zoom, 13.0);
        let detail = explorer.detail().unwrap();
        assert_eq!(detail.name, "Elmina Castle");
        assert_eq!(detail.highlights.len(), 3);
    }

    #[test]
    fn selection_survives_filtering() {
        let mut explorer = explorer();
        let cape = id_of(&explorer, "Cape Coast Castle");
        explorer.select(cape);
        explorer.set_query("volta");
        assert!(!explorer.filtered().contains(cape));
        assert_eq!(explorer.state().selected(), Some(cape));
        assert_eq!(explorer.detail().unwrap().name, "Cape Coast Castle");
        explorer.set_query("");
        assert_eq!(explorer.detail().unwrap().name, "Cape Coast Castle");
    }

    #[test]
    fn camera_priority_keeps_selected_point() {
        let mut explorer = explorer();
        let cape = id_of(&explorer, "Cape Coast Castle");
        explorer.select(cape);
        let outcome = explorer.set_query("zzz");
        assert_eq!(outcome.camera, None);
        assert!(explorer.filtered().is_empty());
        assert_eq!(
            settled_pose(&explorer).center,
            GeoPoint::new(5.1053, -1.2466)
        );
    }

    #[test]
    fn empty_result_without_selection_resets_camera() {
        let mut explorer = explorer();
        explorer.set_query("castle");
        explorer.set_query("zzz");
        let pose = settled_pose(&explorer);
        assert_eq!(pose.center, GeoPoint::new(7.9465, -1.0232));
        assert_eq!(pose.zoom, 7.0);
        assert_eq!(explorer.list_model().empty, Some(crate::view::list::NO_MATCHES));
    }

    #[test]
    fn clearing_selection_frames_filtered_view() {
        let mut explorer = explorer();
        explorer.set_query("castle");
        explorer.select(id_of(&explorer, "Elmina Castle"));
        let outcome = explorer.close_detail();
        assert!(matches!(outcome.camera, Some(CameraCommand::FitBounds { .. })));
        assert!(explorer.detail().is_none());
        assert_eq!(settled_pose(&explorer).zoom, 12.0);
    }

    #[test]
    fn repeated_select_is_idempotent() {
        let mut explorer = explorer();
        let wli = id_of(&explorer, "Wli Waterfalls");
        explorer.select(wli);
        let journal_len = explorer.journal().len();
        let commands = explorer.engine().commands().len();
        let outcome = explorer.select(wli);
        assert_eq!(outcome, Outcome::default());
        assert_eq!(explorer.journal().len(), journal_len);
        assert_eq!(explorer.engine().commands().len(), commands);
        assert_eq!(explorer.state().selected(), Some(wli));
    }

    #[test]
    fn exactly_one_marker_selected_after_many_selects() {
        let mut explorer = explorer();
        let ids: Vec<AttractionId> = explorer.catalog().iter().map(|a| a.id).collect();
        for &id in ids.iter().rev() {
            explorer.select(id);
        }
        let selected: Vec<AttractionId> = explorer
            .markers()
            .iter()
            .filter(|marker| marker.is_selected)
            .map(|marker| marker.id)
            .collect();
        assert_eq!(selected, vec![ids[0]]);
    }

    #[test]
    fn exactly_one_row_hovered_after_many_hovers() {
        let mut explorer = explorer();
        let ids: Vec<AttractionId> = explorer.catalog().iter().map(|a| a.id).collect();
        for &id in &ids {
            explorer.hover(id);
        }
        let hovered: Vec<AttractionId> = explorer
            .list_model()
            .rows
            .iter()
            .filter(|row| row.is_hovered)
            .map(|row| row.id)
            .collect();
        assert_eq!(hovered, vec![ids[ids.len() - 1]]);
    }

    #[test]
    fn leave_is_debounced_and_cancelled_by_hover() {
        let mut explorer = explorer();
        let kakum = id_of(&explorer, "Kakum National Park");
        let mole = id_of(&explorer, "Mole National Park");
        explorer.row_event(kakum, RowEvent::PointerEnter);
        let outcome = explorer.row_event(kakum, RowEvent::PointerLeave);
        let stale = outcome.pending_leave.unwrap();
        assert_eq!(explorer.state().hovered(), Some(kakum));

        explorer.advance(Duration::from_millis(20));
        explorer.marker_event(mole, MarkerEvent::PointerEnter);
        assert!(explorer.flush_leave(stale).camera.is_none());
        assert_eq!(explorer.state().hovered(), Some(mole));
        assert_eq!(explorer.metrics().leaves_cancelled, 1);

        explorer.marker_event(mole, MarkerEvent::PointerLeave);
        explorer.advance(Duration::from_millis(79));
        assert_eq!(explorer.state().hovered(), Some(mole));
        explorer.advance(Duration::from_millis(80));
        assert_eq!(explorer.state().hovered(), None);
    }

    #[test]
    fn flush_leave_applies_current_ticket() {
        let mut explorer = explorer();
        let lake = id_of(&explorer, "Lake Volta");
        explorer.hover(lake);
        let ticket = explorer.leave().pending_leave.unwrap();
        explorer.flush_leave(ticket);
        assert_eq!(explorer.state().hovered(), None);
        assert_eq!(explorer.journal().last().unwrap().intent, Intent::Leave);
    }

    #[test]
    fn zero_window_leaves_immediately() {
        let mut explorer = explorer_with(ExplorerConfig {
            leave_debounce_ms: 0,
            ..Default::default()
        });
        let lake = id_of(&explorer, "Lake Volta");
        explorer.hover(lake);
        assert_eq!(explorer.leave().pending_leave, None);
        assert_eq!(explorer.state().hovered(), None);
    }

    #[test]
    fn hovered_row_filtered_out_releases_hover() {
        let mut explorer = explorer();
        let mole = id_of(&explorer, "Mole National Park");
        explorer.hover(mole);
        explorer.set_query("castle");
        assert_eq!(explorer.state().hovered(), None);
        let intents: Vec<&Intent> = explorer.journal().iter().map(|t| &t.intent).collect();
        assert_eq!(intents.last(), Some(&&Intent::Leave));
    }

    #[test]
    fn journal_preserves_intent_order() {
        let mut explorer = explorer();
        let cape = id_of(&explorer, "Cape Coast Castle");
        explorer.set_query("c");
        explorer.hover(cape);
        explorer.select(cape);
        explorer.clear_selection();
        let seqs: Vec<u64> = explorer.journal().iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
        assert!(matches!(explorer.journal()[2].intent, Intent::Select { .. }));
    }

    #[test]
    fn keyboard_only_selection_through_list() {
        let mut explorer = explorer();
        explorer.set_query("castle");
        explorer.navigate_list(ListNavigation::Next);
        explorer.navigate_list(ListNavigation::Next);
        let outcome = explorer.activate_focused_row();
        assert!(matches!(outcome.camera, Some(CameraCommand::FlyTo { .. })));
        assert_eq!(explorer.detail().unwrap().name, "Elmina Castle");
        assert!(explorer.list_model().rows[1].is_focused);
    }

    #[test]
    fn marker_keyboard_activation_restores_focus() {
        let mut explorer = explorer();
        let lake = id_of(&explorer, "Lake Volta");
        explorer.marker_event(lake, MarkerEvent::FocusIn);
        explorer.marker_event(lake, MarkerEvent::KeyPress(ActivationKey::Enter));
        assert_eq!(explorer.state().selected(), Some(lake));
        assert_eq!(explorer.focused_marker(), Some(lake));
        assert_eq!(explorer.engine().focused_marker(), Some(lake));
    }

    #[test]
    fn map_fault_leaves_list_and_search_working() {
        let mut explorer = explorer();
        explorer.engine_mut().fail_next_render("tile decode error");
        explorer.set_query("park");
        assert!(matches!(explorer.map_health(), MapHealth::Faulted { .. }));
        assert_eq!(explorer.list_model().rows.len(), 2);

        let mole = id_of(&explorer, "Mole National Park");
        explorer.select(mole);
        assert_eq!(explorer.detail().unwrap().name, "Mole National Park");

        assert!(explorer.retry_map());
        assert_eq!(explorer.engine().markers().len(), 2);
        assert_eq!(
            settled_pose(&explorer).center,
            GeoPoint::new(9.25, -1.85)
        );
        assert_eq!(explorer.metrics().map_faults, 1);
    }

    #[test]
    fn failed_map_load_can_be_retried() {
        let config = ExplorerConfig::default();
        let mut engine = SceneEngine::new(&config);
        engine.fail_next_load("bundle missing");
        let mut explorer = Explorer::new(Catalog::ghana().unwrap(), config, engine);
        assert_eq!(
            explorer.start(),
            &MapHealth::Faulted {
                reason: MapFault::LoadFailed("bundle missing".into()).to_string()
            }
        );
        assert!(explorer.retry_map());
        assert_eq!(explorer.engine().markers().len(), 6);
    }

    #[test]
    fn resize_is_forwarded_once_per_change() {
        let mut explorer = explorer();
        assert!(explorer.resize_map(Size::new(700.0, 500.0)));
        assert!(!explorer.resize_map(Size::new(700.0, 500.0)));
        assert_eq!(explorer.engine().size(), Some(Size::new(700.0, 500.0)));
    }

    #[test]
    fn failed_image_uses_placeholder_in_detail() {
        let mut explorer = explorer();
        let cape = id_of(&explorer, "Cape Coast Castle");
        explorer.select(cape);
        explorer.mark_image_failed(cape);
        assert_eq!(
            explorer.detail().unwrap().image,
            crate::catalog::PLACEHOLDER_IMAGE
        );
    }
}
