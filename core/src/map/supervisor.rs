use crate::map::camera::CameraCommand;
use crate::map::engine::{MapEngine, MapFault};
use crate::prelude::Size;
use crate::view::map::{Marker, MarkerSync};
use log::{info, warn};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MapHealth {
    Loading,
    Ready,
    Faulted { reason: String },
}

/// Isolation boundary around a [`MapEngine`].
///
/// Engine failures flip the supervisor into [`MapHealth::Faulted`] instead of
/// propagating; while not ready, traffic is remembered but not forwarded.
/// [`MapSupervisor::retry`] reloads the engine and replays the latest markers,
/// size and camera so the map comes back in sync with the rest of the UI.
pub struct MapSupervisor<E: MapEngine> {
    engine: E,
    health: MapHealth,
    markers: Option<Vec<Marker>>,
    size: Option<Size>,
    camera: Option<CameraCommand>,
    faults: usize,
    retries: usize,
}

impl<E: MapEngine> MapSupervisor<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            health: MapHealth::Loading,
            markers: None,
            size: None,
            camera: None,
            faults: 0,
            retries: 0,
        }
    }

    pub fn health(&self) -> &MapHealth {
        &self.health
    }

    pub fn is_ready(&self) -> bool {
        self.health == MapHealth::Ready
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn retries(&self) -> usize {
        self.retries
    }

    /// Loads the engine once; later calls are no-ops unless a retry is needed.
    pub fn load(&mut self, now: Duration) -> &MapHealth {
        if self.health == MapHealth::Loading {
            self.bring_up(now);
        }
        &self.health
    }

    /// Manual reset offered to the user after a fault.
    pub fn retry(&mut self, now: Duration) -> bool {
        if !matches!(self.health, MapHealth::Faulted { .. }) {
            return false;
        }
        self.retries += 1;
        info!("retrying map engine (attempt {})", self.retries);
        self.bring_up(now);
        self.is_ready()
    }

    pub fn sync_markers(&mut self, sync: MarkerSync) {
        if self.is_ready() {
            let result = self.engine.sync_markers(&sync);
            self.guard(result);
        }
        self.markers = Some(sync.markers);
    }

    pub fn apply_camera(&mut self, command: CameraCommand, now: Duration) {
        if self.is_ready() {
            let result = self.engine.apply_camera(&command, now);
            self.guard(result);
        }
        self.camera = Some(command);
    }

    pub fn invalidate_size(&mut self, size: Size) {
        self.size = Some(size);
        if self.is_ready() {
            let result = self.engine.invalidate_size(size);
            self.guard(result);
        }
    }

    fn bring_up(&mut self, now: Duration) {
        let result = self.engine.load();
        if !self.guard(result) {
            return;
        }
        self.health = MapHealth::Ready;
        if let Some(size) = self.size {
            let result = self.engine.invalidate_size(size);
            if !self.guard(result) {
                return;
            }
        }
        if let Some(markers) = &self.markers {
            let replay = MarkerSync::full(markers.clone());
            let result = self.engine.sync_markers(&replay);
            if !self.guard(result) {
                return;
            }
        }
        if let Some(command) = &self.camera {
            let replay = command.without_animation();
            let result = self.engine.apply_camera(&replay, now);
            self.guard(result);
        }
    }

    fn guard(&mut self, result: Result<(), MapFault>) -> bool {
        match result {
            Ok(()) => true,
            Err(fault) => {
                warn!("map engine fault isolated: {fault}");
                self.faults += 1;
                self.health = MapHealth::Faulted {
                    reason: fault.to_string(),
                };
                false
            }
        }
    }
}
