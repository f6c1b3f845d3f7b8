//! Case-insensitive substring search over attraction names and categories.

use crate::catalog::{Attraction, Catalog};
use crate::prelude::AttractionId;

/// Returns the attractions whose name or category label contains `query`,
/// ignoring case, in catalog order. The query is matched as typed; surrounding
/// whitespace is part of the needle.
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Attraction> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|attraction| matches_lowered(attraction, &needle))
        .collect()
}

/// Checks a single attraction against an already lowercased needle.
pub fn matches_lowered(attraction: &Attraction, needle: &str) -> bool {
    attraction.name.to_lowercase().contains(needle)
        || attraction.category.label().to_lowercase().contains(needle)
}

/// Ids of the attractions currently matching the query, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    ids: Vec<AttractionId>,
}

impl FilteredView {
    pub fn compute(catalog: &Catalog, query: &str) -> Self {
        Self {
            ids: filter(catalog, query)
                .into_iter()
                .map(|attraction| attraction.id)
                .collect(),
        }
    }

    pub fn ids(&self) -> &[AttractionId] {
        &self.ids
    }

    pub fn contains(&self, id: AttractionId) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: AttractionId) -> Option<usize> {
        self.ids.iter().position(|&candidate| candidate == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn resolve<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a Attraction> + 'a {
        self.ids.iter().filter_map(move |&id| catalog.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(hits: &[&'a Attraction]) -> Vec<&'a str> {
        hits.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_whole_catalog_in_order() {
        let catalog = Catalog::ghana().unwrap();
        let hits = filter(&catalog, "");
        let expected: Vec<&str> = catalog.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names(&hits), expected);
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let catalog = Catalog::ghana().unwrap();
        let hits = filter(&catalog, "CASTLE");
        assert_eq!(names(&hits), vec!["Cape Coast Castle", "Elmina Castle"]);
    }

    #[test]
    fn query_matches_category_label() {
        let catalog = Catalog::ghana().unwrap();
        let hits = filter(&catalog, "wild");
        assert_eq!(names(&hits), vec!["Mole National Park"]);
        let nature = filter(&catalog, "nature");
        assert_eq!(
            names(&nature),
            vec!["Kakum National Park", "Wli Waterfalls", "Lake Volta"]
        );
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_needle() {
        let catalog = Catalog::ghana().unwrap();
        assert!(filter(&catalog, " castle ").is_empty());
        assert_eq!(filter(&catalog, " castle").len(), 2);
    }

    #[test]
    fn unmatched_query_yields_empty_view() {
        let catalog = Catalog::ghana().unwrap();
        let view = FilteredView::compute(&catalog, "zzz");
        assert!(view.is_empty());
        assert_eq!(view.resolve(&catalog).count(), 0);
    }

    #[test]
    fn filter_agrees_with_brute_force_for_every_substring() {
        let catalog = Catalog::ghana().unwrap();
        for attraction in &catalog {
            let name = attraction.name.to_lowercase();
            for start in 0..name.len() {
                let query = &name[start..(start + 3).min(name.len())];
                let hits = filter(&catalog, query);
                let expected: Vec<&str> = catalog
                    .iter()
                    .filter(|a| {
                        a.name.to_lowercase().contains(query)
                            || a.category.label().to_lowercase().contains(query)
                    })
                    .map(|a| a.name.as_str())
                    .collect();
                assert_eq!(names(&hits), expected, "query {query:?}");
            }
        }
    }
}
