use crate::map::camera::CameraCommand;
use crate::prelude::Intent;
use log::{debug, info};

/// Routes explorer activity to the `log` facade: selections and camera moves
/// at info, hover and query traffic at debug.
pub struct InteractionLog;

impl InteractionLog {
    pub fn new() -> Self {
        Self
    }

    pub fn record_intent(&self, seq: u64, intent: &Intent) {
        match intent {
            Intent::Select { id } => info!("#{seq} select {id}"),
            Intent::ClearSelection => info!("#{seq} clear selection"),
            Intent::Hover { id } => debug!("#{seq} hover {id}"),
            Intent::Leave => debug!("#{seq} leave"),
            Intent::SetQuery { text } => debug!("#{seq} query {text:?}"),
        }
    }

    pub fn record_camera(&self, command: &CameraCommand) {
        match command {
            CameraCommand::FlyTo { center, zoom, .. } => {
                info!("camera fly-to ({:.4}, {:.4}) z{zoom}", center.lat, center.lng)
            }
            CameraCommand::FitBounds { bounds, max_zoom, .. } => info!(
                "camera fit-bounds ({:.4}, {:.4})..({:.4}, {:.4}) max z{max_zoom}",
                bounds.south_west.lat,
                bounds.south_west.lng,
                bounds.north_east.lat,
                bounds.north_east.lng
            ),
            CameraCommand::Reset { zoom, .. } => info!("camera reset to home z{zoom}"),
        }
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new()
    }
}
