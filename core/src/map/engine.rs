use crate::map::camera::CameraCommand;
use crate::prelude::Size;
use crate::view::map::MarkerSync;
use std::time::Duration;

/// Failure raised by a map rendering engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapFault {
    #[error("map failed to load: {0}")]
    LoadFailed(String),
    #[error("map render failure: {0}")]
    RenderFailed(String),
    #[error("map is not loaded")]
    NotLoaded,
}

/// Capabilities the explorer needs from whatever draws the map.
pub trait MapEngine {
    /// One-time initialization; called again only by a supervisor retry.
    fn load(&mut self) -> Result<(), MapFault>;
    fn sync_markers(&mut self, sync: &MarkerSync) -> Result<(), MapFault>;
    /// `now` is the session clock, used to time animated transitions.
    fn apply_camera(&mut self, command: &CameraCommand, now: Duration) -> Result<(), MapFault>;
    fn invalidate_size(&mut self, size: Size) -> Result<(), MapFault>;
}
