use crate::map::camera::{Camera, CameraCommand, CameraPose};
use crate::map::engine::{MapEngine, MapFault};
use crate::prelude::{AttractionId, ExplorerConfig, GeoPoint, Size};
use crate::view::map::{Marker, MarkerSync};
use log::debug;
use std::time::Duration;

/// Pin icon edge length in pixels; the icon is anchored at its bottom center.
pub const MARKER_SIZE: f32 = 44.0;

/// In-memory map engine: keeps the camera, the placed markers and the render
/// size, and can be told to fail for exercising fault isolation.
#[derive(Debug, Clone)]
pub struct SceneEngine {
    loaded: bool,
    camera: Camera,
    markers: Vec<Marker>,
    focused: Option<AttractionId>,
    size: Option<Size>,
    fly_duration: Duration,
    commands: Vec<CameraCommand>,
    fail_load: Option<String>,
    fail_render: Option<String>,
}

impl SceneEngine {
    pub fn new(config: &ExplorerConfig) -> Self {
        let home = CameraPose {
            center: config.default_center,
            zoom: config.default_zoom,
        };
        Self {
            loaded: false,
            camera: Camera::new(home, config.min_zoom, config.max_zoom),
            markers: Vec::new(),
            focused: None,
            size: None,
            fly_duration: config.fly_duration(),
            commands: Vec::new(),
            fail_load: None,
            fail_render: None,
        }
    }

    pub fn fail_next_load(&mut self, reason: impl Into<String>) {
        self.fail_load = Some(reason.into());
    }

    pub fn fail_next_render(&mut self, reason: impl Into<String>) {
        self.fail_render = Some(reason.into());
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marker that currently holds keyboard focus on the rendered map.
    pub fn focused_marker(&self) -> Option<AttractionId> {
        self.focused
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Every camera command accepted so far, oldest first.
    pub fn commands(&self) -> &[CameraCommand] {
        &self.commands
    }

    pub fn screen_position(&self, point: GeoPoint, now: Duration) -> (f32, f32) {
        self.camera.to_screen(point, now)
    }

    /// Topmost marker whose pin covers the given viewport pixel.
    pub fn marker_at(&self, x: f32, y: f32, now: Duration) -> Option<AttractionId> {
        let radius = MARKER_SIZE / 2.0;
        self.markers
            .iter()
            .rev()
            .find(|marker| {
                let (mx, my) = self.camera.to_screen(marker.position, now);
                let cy = my - radius - marker.visual.lift();
                let hit = radius * marker.visual.scale();
                (x - mx).powi(2) + (y - cy).powi(2) <= hit * hit
            })
            .map(|marker| marker.id)
    }

    fn check_render(&mut self) -> Result<(), MapFault> {
        if !self.loaded {
            return Err(MapFault::NotLoaded);
        }
        match self.fail_render.take() {
            Some(reason) => Err(MapFault::RenderFailed(reason)),
            None => Ok(()),
        }
    }
}

impl MapEngine for SceneEngine {
    fn load(&mut self) -> Result<(), MapFault> {
        if let Some(reason) = self.fail_load.take() {
            self.loaded = false;
            return Err(MapFault::LoadFailed(reason));
        }
        self.loaded = true;
        Ok(())
    }

    fn sync_markers(&mut self, sync: &MarkerSync) -> Result<(), MapFault> {
        self.check_render()?;
        debug!(
            "scene markers: +{} ~{} -{}",
            sync.placed.len(),
            sync.updated.len(),
            sync.removed.len()
        );
        self.markers = sync.markers.clone();
        if self
            .focused
            .is_some_and(|id| !self.markers.iter().any(|marker| marker.id == id))
        {
            self.focused = None;
        }
        if let Some(id) = sync.restore_focus {
            self.focused = Some(id);
        }
        Ok(())
    }

    fn apply_camera(&mut self, command: &CameraCommand, now: Duration) -> Result<(), MapFault> {
        self.check_render()?;
        self.camera.apply(command, now, self.fly_duration);
        self.commands.push(command.clone());
        Ok(())
    }

    fn invalidate_size(&mut self, size: Size) -> Result<(), MapFault> {
        self.check_render()?;
        self.size = Some(size);
        self.camera.set_viewport(size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::search::FilteredView;
    use crate::view::map::{MapView, MarkerEvent};

    fn loaded_engine() -> SceneEngine {
        let mut engine = SceneEngine::new(&ExplorerConfig::default());
        engine.load().unwrap();
        engine
    }

    #[test]
    fn engine_refuses_work_before_load() {
        let mut engine = SceneEngine::new(&ExplorerConfig::default());
        assert_eq!(
            engine.invalidate_size(Size::new(10.0, 10.0)),
            Err(MapFault::NotLoaded)
        );
    }

    #[test]
    fn injected_render_failure_fires_once() {
        let mut engine = loaded_engine();
        engine.fail_next_render("tile error");
        let sync = MarkerSync::default();
        assert!(matches!(
            engine.sync_markers(&sync),
            Err(MapFault::RenderFailed(_))
        ));
        assert!(engine.sync_markers(&sync).is_ok());
    }

    #[test]
    fn resize_updates_camera_viewport() {
        let mut engine = loaded_engine();
        engine.invalidate_size(Size::new(640.0, 480.0)).unwrap();
        assert_eq!(engine.camera().viewport(), Size::new(640.0, 480.0));
    }

    #[test]
    fn hit_test_finds_marker_under_pin() {
        let catalog = Catalog::ghana().unwrap();
        let filtered = FilteredView::compute(&catalog, "Mole");
        let mut view = MapView::new();
        let sync = view.regenerate(&catalog, &filtered, None, None);
        let mut engine = loaded_engine();
        engine.sync_markers(&sync).unwrap();

        let mole = catalog.find_by_name("Mole National Park").unwrap();
        let (x, y) = engine.screen_position(mole.position(), Duration::ZERO);
        assert_eq!(
            engine.marker_at(x, y - MARKER_SIZE / 2.0, Duration::ZERO),
            Some(mole.id)
        );
        assert_eq!(engine.marker_at(x + 200.0, y, Duration::ZERO), None);
    }

    #[test]
    fn focus_follows_restore_hint() {
        let catalog = Catalog::ghana().unwrap();
        let filtered = FilteredView::compute(&catalog, "");
        let mut view = MapView::new();
        let mut engine = loaded_engine();
        engine
            .sync_markers(&view.regenerate(&catalog, &filtered, None, None))
            .unwrap();
        let id = AttractionId::new(4).unwrap();
        view.handle(id, MarkerEvent::FocusIn);
        engine
            .sync_markers(&view.regenerate(&catalog, &filtered, Some(id), None))
            .unwrap();
        assert_eq!(engine.focused_marker(), Some(id));
    }
}
