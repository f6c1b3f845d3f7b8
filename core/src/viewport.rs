//! Decides where the camera should look after selection or filter changes.

use crate::catalog::Catalog;
use crate::map::camera::CameraCommand;
use crate::math::bounds::GeoBounds;
use crate::prelude::{AttractionId, ExplorerConfig, GeoPoint};
use crate::search::FilteredView;
use serde::Serialize;

/// What the camera is meant to frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum ViewportTarget {
    /// Close-up of the selected attraction.
    Focus { id: AttractionId, center: GeoPoint },
    /// Every attraction of the filtered view.
    Frame { ids: Vec<AttractionId> },
    /// The default whole-region view.
    Home,
}

/// Reactive camera rule. Selection beats filter-driven framing, and a command
/// is only produced when the derived target actually changes.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ExplorerConfig,
    current: Option<ViewportTarget>,
}

impl ViewportController {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Starts from a target the map is already showing, without a command.
    pub fn seeded(config: ExplorerConfig, target: ViewportTarget) -> Self {
        Self {
            config,
            current: Some(target),
        }
    }

    pub fn current(&self) -> Option<&ViewportTarget> {
        self.current.as_ref()
    }

    /// Pure target derivation. A selected id missing from the catalog counts
    /// as no selection.
    pub fn target(
        catalog: &Catalog,
        selected: Option<AttractionId>,
        filtered: &FilteredView,
    ) -> ViewportTarget {
        if let Some(attraction) = selected.and_then(|id| catalog.get(id)) {
            return ViewportTarget::Focus {
                id: attraction.id,
                center: attraction.position(),
            };
        }
        if filtered.is_empty() {
            ViewportTarget::Home
        } else {
            ViewportTarget::Frame {
                ids: filtered.ids().to_vec(),
            }
        }
    }

    pub fn evaluate(
        &mut self,
        catalog: &Catalog,
        selected: Option<AttractionId>,
        filtered: &FilteredView,
    ) -> Option<CameraCommand> {
        let target = Self::target(catalog, selected, filtered);
        if self.current.as_ref() == Some(&target) {
            return None;
        }
        let command = self.command_for(&target, catalog);
        self.current = Some(target);
        Some(command)
    }

    pub fn command_for(&self, target: &ViewportTarget, catalog: &Catalog) -> CameraCommand {
        let home = CameraCommand::Reset {
            center: self.config.default_center,
            zoom: self.config.default_zoom,
            animate: true,
        };
        match target {
            ViewportTarget::Focus { center, .. } => CameraCommand::FlyTo {
                center: *center,
                zoom: self.config.detail_zoom,
                animate: true,
            },
            ViewportTarget::Frame { ids } => {
                let points = ids
                    .iter()
                    .filter_map(|&id| catalog.get(id))
                    .map(|attraction| attraction.position());
                match GeoBounds::enclosing(points) {
                    Some(bounds) => CameraCommand::FitBounds {
                        bounds,
                        padding: self.config.fit_padding,
                        max_zoom: self.config.fit_max_zoom,
                        animate: true,
                    },
                    None => home,
                }
            }
            ViewportTarget::Home => home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> AttractionId {
        AttractionId::new(raw).unwrap()
    }

    fn controller() -> ViewportController {
        ViewportController::new(ExplorerConfig::default())
    }

    #[test]
    fn selection_flies_to_detail_zoom() {
        let catalog = Catalog::ghana().unwrap();
        let filtered = FilteredView::compute(&catalog, "");
        let command = controller().evaluate(&catalog, Some(id(5)), &filtered);
        assert_eq!(
            command,
            Some(CameraCommand::FlyTo {
                center: GeoPoint::new(5.0833, -1.35),
                zoom: 13.0,
                animate: true,
            })
        );
    }

    #[test]
    fn query_changes_do_not_steal_camera_from_selection() {
        let catalog = Catalog::ghana().unwrap();
        let mut viewport = controller();
        let all = FilteredView::compute(&catalog, "");
        assert!(viewport.evaluate(&catalog, Some(id(1)), &all).is_some());
        let none = FilteredView::compute(&catalog, "zzz");
        assert_eq!(viewport.evaluate(&catalog, Some(id(1)), &none), None);
        assert!(matches!(
            viewport.current(),
            Some(ViewportTarget::Focus { center, .. }) if *center == GeoPoint::new(5.1053, -1.2466)
        ));
    }

    #[test]
    fn empty_filter_without_selection_resets_home() {
        let catalog = Catalog::ghana().unwrap();
        let none = FilteredView::compute(&catalog, "zzz");
        let command = controller().evaluate(&catalog, None, &none);
        assert_eq!(
            command,
            Some(CameraCommand::Reset {
                center: GeoPoint::new(7.9465, -1.0232),
                zoom: 7.0,
                animate: true,
            })
        );
    }

    #[test]
    fn filtered_view_is_framed_with_cap() {
        let catalog = Catalog::ghana().unwrap();
        let castles = FilteredView::compute(&catalog, "castle");
        match controller().evaluate(&catalog, None, &castles) {
            Some(CameraCommand::FitBounds {
                bounds, max_zoom, ..
            }) => {
                assert_eq!(max_zoom, 12.0);
                assert_eq!(bounds.south_west, GeoPoint::new(5.0833, -1.35));
                assert_eq!(bounds.north_east, GeoPoint::new(5.1053, -1.2466));
            }
            other => panic!("expected fit bounds, got {other:?}"),
        }
    }

    #[test]
    fn stale_selection_counts_as_none() {
        let catalog = Catalog::ghana().unwrap();
        let all = FilteredView::compute(&catalog, "");
        assert!(matches!(
            ViewportController::target(&catalog, Some(id(77)), &all),
            ViewportTarget::Frame { .. }
        ));
    }

    #[test]
    fn seeded_target_suppresses_initial_command() {
        let catalog = Catalog::ghana().unwrap();
        let all = FilteredView::compute(&catalog, "");
        let target = ViewportController::target(&catalog, None, &all);
        let mut viewport = ViewportController::seeded(ExplorerConfig::default(), target);
        assert_eq!(viewport.evaluate(&catalog, None, &all), None);
    }
}
