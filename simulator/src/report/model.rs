use explorercore::map::{CameraCommand, CameraPose, MapHealth};
use explorercore::telemetry::MetricsSnapshot;
use explorercore::Transition;
use serde::Serialize;

/// Where the session ended up once every step had run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalState {
    pub query: String,
    pub selected: Option<String>,
    pub hovered: Option<String>,
    pub header: String,
    pub visible: Vec<String>,
    pub detail: Option<String>,
    pub camera: CameraPose,
    pub map: MapHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: Option<String>,
    pub catalog_size: usize,
    pub steps_run: usize,
    pub elapsed_ms: u128,
    pub transitions: Vec<Transition>,
    pub camera_commands: Vec<CameraCommand>,
    pub final_state: FinalState,
    pub metrics: MetricsSnapshot,
}

impl ScenarioReport {
    pub fn summary(&self) -> String {
        format!(
            "steps={} transitions={} camera_commands={} visible={} selected={} map={:?}",
            self.steps_run,
            self.transitions.len(),
            self.camera_commands.len(),
            self.final_state.visible.len(),
            self.final_state.selected.as_deref().unwrap_or("-"),
            self.final_state.map
        )
    }
}
