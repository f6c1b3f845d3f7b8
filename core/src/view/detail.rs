use crate::catalog::{Catalog, Category};
use crate::prelude::{AttractionId, Intent};
use crate::view::image_for;
use serde::Serialize;
use std::collections::HashSet;

/// Everything the overlay shows about the selected attraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailModel {
    pub id: AttractionId,
    pub name: String,
    pub category: Category,
    pub rating: f32,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub image: String,
    pub highlights: Vec<String>,
}

pub struct DetailOverlay;

impl DetailOverlay {
    /// `None` when nothing is selected or the selected id is not in the
    /// catalog; a stale id is treated exactly like no selection.
    pub fn project(
        catalog: &Catalog,
        selected: Option<AttractionId>,
        failed_images: &HashSet<AttractionId>,
    ) -> Option<DetailModel> {
        let attraction = catalog.get(selected?)?;
        Some(DetailModel {
            id: attraction.id,
            name: attraction.name.clone(),
            category: attraction.category,
            rating: attraction.rating,
            duration: attraction.duration.clone(),
            location: attraction.location.clone(),
            description: attraction.description.clone(),
            image: image_for(attraction, failed_images),
            highlights: attraction.highlights.clone(),
        })
    }

    pub fn close() -> Intent {
        Intent::ClearSelection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_shows_selected_record() {
        let catalog = Catalog::ghana().unwrap();
        let detail =
            DetailOverlay::project(&catalog, AttractionId::new(5), &HashSet::new()).unwrap();
        assert_eq!(detail.name, "Elmina Castle");
        assert_eq!(
            detail.highlights,
            vec![
                "Oldest European building",
                "Portuguese architecture",
                "Coastal views"
            ]
        );
    }

    #[test]
    fn overlay_hidden_without_valid_selection() {
        let catalog = Catalog::ghana().unwrap();
        assert!(DetailOverlay::project(&catalog, None, &HashSet::new()).is_none());
        assert!(DetailOverlay::project(&catalog, AttractionId::new(99), &HashSet::new()).is_none());
        assert_eq!(DetailOverlay::close(), Intent::ClearSelection);
    }
}
