pub mod log;
pub mod metrics;

pub use log::InteractionLog;
pub use metrics::{InteractionMetrics, MetricsSnapshot};
