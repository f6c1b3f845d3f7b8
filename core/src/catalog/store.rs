use crate::catalog::attraction::Attraction;
use crate::prelude::{AttractionId, ExplorerError, ExplorerResult};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only, ordered collection of attractions with an id index.
#[derive(Debug, Clone)]
pub struct Catalog {
    attractions: Vec<Attraction>,
    index: HashMap<AttractionId, usize>,
}

impl Catalog {
    /// Validates ids, names and coordinates before accepting the records.
    pub fn new(attractions: Vec<Attraction>) -> ExplorerResult<Self> {
        let mut index = HashMap::with_capacity(attractions.len());
        for (position, attraction) in attractions.iter().enumerate() {
            if attraction.name.trim().is_empty() {
                return Err(ExplorerError::InvalidCatalog(format!(
                    "attraction {} has an empty name",
                    attraction.id
                )));
            }
            if !attraction.position().is_valid() {
                return Err(ExplorerError::InvalidCoordinate {
                    id: attraction.id,
                    lat: attraction.lat,
                    lng: attraction.lng,
                });
            }
            if index.insert(attraction.id, position).is_some() {
                return Err(ExplorerError::DuplicateId(attraction.id));
            }
        }
        Ok(Self { attractions, index })
    }

    pub fn from_json_str(contents: &str) -> ExplorerResult<Self> {
        let attractions: Vec<Attraction> = serde_json::from_str(contents)?;
        Self::new(attractions)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ExplorerResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)?;
        let catalog = Self::from_json_str(&contents)?;
        info!(
            "loaded {} attractions from {}",
            catalog.len(),
            path_ref.display()
        );
        Ok(catalog)
    }

    pub fn get(&self, id: AttractionId) -> Option<&Attraction> {
        self.index.get(&id).map(|&position| &self.attractions[position])
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Attraction> {
        self.attractions
            .iter()
            .find(|attraction| attraction.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attraction> {
        self.attractions.iter()
    }

    pub fn as_slice(&self) -> &[Attraction] {
        &self.attractions
    }

    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Attraction;
    type IntoIter = std::slice::Iter<'a, Attraction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
