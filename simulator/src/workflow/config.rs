use crate::generator::catalog::GeneratorConfig;
use anyhow::Context;
use explorercore::prelude::Size;
use explorercore::ExplorerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the scenario takes its attractions from.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    #[default]
    Builtin,
    File(PathBuf),
    Generated(GeneratorConfig),
}

/// Attraction reference inside a script: a numeric id or an exact name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Target {
    Id(u32),
    Name(String),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    Enter,
    Leave,
    Click,
    Focus,
    Blur,
    KeyEnter,
    KeySpace,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListKey {
    Next,
    Previous,
    First,
    Last,
    Activate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PointerStep {
    pub target: Target,
    pub action: PointerAction,
}

/// One scripted user action. `wait` advances the virtual clock.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Query(String),
    Select(Target),
    Hover(Target),
    Leave,
    Clear,
    Wait(u64),
    Row(PointerStep),
    Marker(PointerStep),
    ListKey(ListKey),
    CloseDetail,
    Resize(Size),
    FailMap(String),
    RetryMap,
    ImageFailed(Target),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub name: Option<String>,
    pub catalog: CatalogSource,
    pub explorer: ExplorerConfig,
    /// Map container size applied before the first step.
    pub viewport: Option<Size>,
    pub steps: Vec<Step>,
}

impl ScenarioConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading scenario {}", path_ref.display()))?;
        let config: ScenarioConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing scenario {}", path_ref.display()))?;
        Ok(config)
    }

    /// Scenario built from command-line flags: an optional query followed by
    /// selections, each given time to settle.
    pub fn from_args(query: Option<String>, select: &[String]) -> Self {
        let mut steps = Vec::new();
        if let Some(query) = query {
            steps.push(Step::Query(query));
        }
        for name in select {
            let target = match name.parse::<u32>() {
                Ok(id) => Target::Id(id),
                Err(_) => Target::Name(name.clone()),
            };
            steps.push(Step::Select(target));
            steps.push(Step::Wait(ExplorerConfig::default().fly_duration_ms));
        }
        Self {
            steps,
            ..Default::default()
        }
    }
}
