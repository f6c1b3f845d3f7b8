use serde::Serialize;

/// Counters for one explorer session.
#[derive(Debug, Default)]
pub struct InteractionMetrics {
    intents: usize,
    camera_commands: usize,
    leaves_cancelled: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub intents: usize,
    pub camera_commands: usize,
    pub leaves_cancelled: usize,
    pub map_faults: usize,
    pub map_retries: usize,
}

impl InteractionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_intent(&mut self) {
        self.intents += 1;
    }

    pub fn record_camera(&mut self) {
        self.camera_commands += 1;
    }

    pub fn record_cancelled_leave(&mut self) {
        self.leaves_cancelled += 1;
    }

    /// Map fault counters live in the supervisor and are merged in here.
    pub fn snapshot(&self, map_faults: usize, map_retries: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            intents: self.intents,
            camera_commands: self.camera_commands,
            leaves_cancelled: self.leaves_cancelled,
            map_faults,
            map_retries,
        }
    }
}
