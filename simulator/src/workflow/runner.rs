use crate::generator::catalog::generate_catalog;
use crate::report::model::{FinalState, ScenarioReport};
use crate::workflow::config::{CatalogSource, ListKey, PointerAction, ScenarioConfig, Step, Target};
use anyhow::{anyhow, Context};
use explorercore::catalog::Catalog;
use explorercore::map::SceneEngine;
use explorercore::view::{ActivationKey, ListNavigation, MarkerEvent, RowEvent};
use explorercore::{AttractionId, Explorer};
use log::{debug, info};
use std::time::Duration;

/// Replays a scripted scenario against an explorer backed by the in-memory
/// map engine. Time only moves on `wait` steps.
#[derive(Clone)]
pub struct Runner {
    config: ScenarioConfig,
}

impl Runner {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    pub fn load_catalog(source: &CatalogSource) -> anyhow::Result<Catalog> {
        match source {
            CatalogSource::Builtin => Catalog::ghana().context("building the built-in catalog"),
            CatalogSource::File(path) => Catalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display())),
            CatalogSource::Generated(generator) => generate_catalog(generator),
        }
    }

    pub fn execute(&self) -> anyhow::Result<ScenarioReport> {
        let catalog = Self::load_catalog(&self.config.catalog)?;
        let catalog_size = catalog.len();
        let engine = SceneEngine::new(&self.config.explorer);
        let mut explorer = Explorer::new(catalog, self.config.explorer.clone(), engine);
        if let Some(size) = self.config.viewport {
            explorer.resize_map(size);
        }
        explorer.start();

        let mut clock = Duration::ZERO;
        for (index, step) in self.config.steps.iter().enumerate() {
            debug!("step {}: {:?}", index + 1, step);
            Self::apply(&mut explorer, step, &mut clock)
                .with_context(|| format!("running step {} ({:?})", index + 1, step))?;
        }

        let report = Self::report(&self.config, &explorer, catalog_size, clock);
        info!("scenario finished: {}", report.summary());
        Ok(report)
    }

    fn apply(
        explorer: &mut Explorer<SceneEngine>,
        step: &Step,
        clock: &mut Duration,
    ) -> anyhow::Result<()> {
        match step {
            Step::Query(text) => {
                explorer.set_query(text.as_str());
            }
            Step::Select(target) => {
                let id = Self::resolve(explorer, target)?;
                explorer.select(id);
            }
            Step::Hover(target) => {
                let id = Self::resolve(explorer, target)?;
                explorer.hover(id);
            }
            Step::Leave => {
                explorer.leave();
            }
            Step::Clear => {
                explorer.clear_selection();
            }
            Step::Wait(ms) => {
                *clock += Duration::from_millis(*ms);
                explorer.advance(*clock);
            }
            Step::Row(pointer) => {
                let id = Self::resolve(explorer, &pointer.target)?;
                let event = match pointer.action {
                    PointerAction::Enter => RowEvent::PointerEnter,
                    PointerAction::Leave => RowEvent::PointerLeave,
                    PointerAction::Click => RowEvent::Click,
                    PointerAction::Focus => RowEvent::FocusIn,
                    PointerAction::Blur => RowEvent::FocusOut,
                    PointerAction::KeyEnter => RowEvent::KeyPress(ActivationKey::Enter),
                    PointerAction::KeySpace => RowEvent::KeyPress(ActivationKey::Space),
                };
                explorer.row_event(id, event);
            }
            Step::Marker(pointer) => {
                let id = Self::resolve(explorer, &pointer.target)?;
                let event = match pointer.action {
                    PointerAction::Enter => MarkerEvent::PointerEnter,
                    PointerAction::Leave => MarkerEvent::PointerLeave,
                    PointerAction::Click => MarkerEvent::Click,
                    PointerAction::Focus => MarkerEvent::FocusIn,
                    PointerAction::Blur => MarkerEvent::FocusOut,
                    PointerAction::KeyEnter => MarkerEvent::KeyPress(ActivationKey::Enter),
                    PointerAction::KeySpace => MarkerEvent::KeyPress(ActivationKey::Space),
                };
                explorer.marker_event(id, event);
            }
            Step::ListKey(key) => {
                let direction = match key {
                    ListKey::Next => ListNavigation::Next,
                    ListKey::Previous => ListNavigation::Previous,
                    ListKey::First => ListNavigation::First,
                    ListKey::Last => ListNavigation::Last,
                    ListKey::Activate => {
                        explorer.activate_focused_row();
                        return Ok(());
                    }
                };
                explorer.navigate_list(direction);
            }
            Step::CloseDetail => {
                explorer.close_detail();
            }
            Step::Resize(size) => {
                explorer.resize_map(*size);
            }
            Step::FailMap(reason) => {
                explorer.engine_mut().fail_next_render(reason.as_str());
            }
            Step::RetryMap => {
                explorer.retry_map();
            }
            Step::ImageFailed(target) => {
                let id = Self::resolve(explorer, target)?;
                explorer.mark_image_failed(id);
            }
        }
        Ok(())
    }

    fn resolve(explorer: &Explorer<SceneEngine>, target: &Target) -> anyhow::Result<AttractionId> {
        let catalog = explorer.catalog();
        let found = match target {
            Target::Id(raw) => AttractionId::new(*raw).and_then(|id| catalog.get(id)),
            Target::Name(name) => catalog.find_by_name(name),
        };
        found
            .map(|attraction| attraction.id)
            .ok_or_else(|| anyhow!("no attraction matches {:?}", target))
    }

    fn report(
        config: &ScenarioConfig,
        explorer: &Explorer<SceneEngine>,
        catalog_size: usize,
        clock: Duration,
    ) -> ScenarioReport {
        let catalog = explorer.catalog();
        let name_of = |id: Option<AttractionId>| {
            id.and_then(|id| catalog.get(id))
                .map(|attraction| attraction.name.clone())
        };
        let list = explorer.list_model();
        let state = explorer.state();

        ScenarioReport {
            scenario: config.name.clone(),
            catalog_size,
            steps_run: config.steps.len(),
            elapsed_ms: clock.as_millis(),
            transitions: explorer.journal().to_vec(),
            camera_commands: explorer.engine().commands().to_vec(),
            final_state: FinalState {
                query: state.query().to_string(),
                selected: name_of(state.selected()),
                hovered: name_of(state.hovered()),
                header: list.header,
                visible: list.rows.into_iter().map(|row| row.name).collect(),
                detail: explorer.detail().map(|detail| detail.name),
                camera: explorer.engine().camera().pose_at(clock),
                map: explorer.map_health().clone(),
            },
            metrics: explorer.metrics(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog::GeneratorConfig;
    use crate::workflow::config::PointerStep;
    use explorercore::map::MapHealth;
    use explorercore::prelude::Size;
    use explorercore::GeoPoint;

    fn scenario(steps: Vec<Step>) -> ScenarioConfig {
        ScenarioConfig {
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn runner_replays_castle_search() {
        let cfg = ScenarioConfig::from_args(Some("castle".into()), &["Elmina Castle".into()]);
        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(
            report.final_state.visible,
            vec!["Cape Coast Castle", "Elmina Castle"]
        );
        assert_eq!(report.final_state.detail.as_deref(), Some("Elmina Castle"));
        assert_eq!(report.final_state.camera.center, GeoPoint::new(5.0833, -1.35));
        assert_eq!(report.final_state.camera.zoom, 13.0);
        assert_eq!(report.camera_commands.len(), 2);
    }

    #[test]
    fn wait_steps_drive_the_leave_debounce() {
        let cfg = scenario(vec![
            Step::Row(PointerStep {
                target: Target::Name("Mole National Park".into()),
                action: PointerAction::Enter,
            }),
            Step::Row(PointerStep {
                target: Target::Name("Mole National Park".into()),
                action: PointerAction::Leave,
            }),
            Step::Wait(30),
        ]);
        let report = Runner::new(cfg.clone()).execute().unwrap();
        assert_eq!(report.final_state.hovered.as_deref(), Some("Mole National Park"));

        let mut longer = cfg;
        longer.steps.push(Step::Wait(30));
        let report = Runner::new(longer).execute().unwrap();
        assert_eq!(report.final_state.hovered, None);
        assert_eq!(report.elapsed_ms, 60);
    }

    #[test]
    fn map_failure_is_reported_and_recovered() {
        let cfg = scenario(vec![
            Step::FailMap("context lost".into()),
            Step::Query("lake".into()),
            Step::Select(Target::Id(6)),
        ]);
        let report = Runner::new(cfg.clone()).execute().unwrap();
        assert!(matches!(report.final_state.map, MapHealth::Faulted { .. }));
        assert_eq!(report.final_state.detail.as_deref(), Some("Lake Volta"));

        let mut recovered = cfg;
        recovered.steps.push(Step::RetryMap);
        let report = Runner::new(recovered).execute().unwrap();
        assert_eq!(report.final_state.map, MapHealth::Ready);
        assert_eq!(report.final_state.camera.center, GeoPoint::new(7.5, -0.5));
        assert_eq!(report.metrics.map_retries, 1);
    }

    #[test]
    fn unknown_target_fails_the_step() {
        let cfg = scenario(vec![Step::Select(Target::Name("Atlantis".into()))]);
        let err = Runner::new(cfg).execute().unwrap_err();
        assert!(format!("{err:#}").contains("Atlantis"));
    }

    #[test]
    fn generated_catalog_is_searchable() {
        let cfg = ScenarioConfig {
            catalog: CatalogSource::Generated(GeneratorConfig {
                count: 30,
                seed: 9,
                ..Default::default()
            }),
            viewport: Some(Size::new(800.0, 600.0)),
            steps: vec![Step::Query("zzz".into()), Step::Wait(1500)],
            ..Default::default()
        };
        let report = Runner::new(cfg).execute().unwrap();
        assert_eq!(report.catalog_size, 30);
        assert!(report.final_state.visible.is_empty());
        assert_eq!(report.final_state.header, "0 remarkable destinations");
        assert_eq!(report.final_state.camera.zoom, 7.0);
    }
}
