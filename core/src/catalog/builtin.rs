//! The six Ghana attractions shipped with the explorer.

use crate::catalog::attraction::{Attraction, Category};
use crate::catalog::store::Catalog;
use crate::prelude::{AttractionId, ExplorerError, ExplorerResult};

struct Seed {
    id: u32,
    name: &'static str,
    category: Category,
    rating: f32,
    duration: &'static str,
    lat: f64,
    lng: f64,
    location: &'static str,
    description: &'static str,
    image: &'static str,
    highlights: [&'static str; 3],
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: 1,
        name: "Cape Coast Castle",
        category: Category::Historical,
        rating: 4.8,
        duration: "2-3 hours",
        lat: 5.1053,
        lng: -1.2466,
        location: "Cape Coast, Central Region",
        description: "A UNESCO World Heritage site, this 17th-century castle stands as a powerful reminder of the Atlantic slave trade.",
        image: "/cape-coast-castle-ghana.png",
        highlights: ["UNESCO World Heritage", "Historical significance", "Ocean views"],
    },
    Seed {
        id: 2,
        name: "Kakum National Park",
        category: Category::Nature,
        rating: 4.7,
        duration: "4-5 hours",
        lat: 5.35,
        lng: -1.3833,
        location: "Cape Coast, Central Region",
        description: "Experience the rainforest canopy on suspended walkways 40 meters above the ground.",
        image: "",
        highlights: ["Canopy walkway", "Rainforest", "Wildlife viewing"],
    },
    Seed {
        id: 3,
        name: "Mole National Park",
        category: Category::Wildlife,
        rating: 4.6,
        duration: "Full day",
        lat: 9.25,
        lng: -1.85,
        location: "Larabanga, Savannah Region",
        description: "Ghana's largest wildlife refuge, home to elephants, antelopes, and over 300 bird species.",
        image: "/mole-national-park-elephants.png",
        highlights: ["Elephant viewing", "Safari experience", "Bird watching"],
    },
    Seed {
        id: 4,
        name: "Wli Waterfalls",
        category: Category::Nature,
        rating: 4.5,
        duration: "3-4 hours",
        lat: 7.1167,
        lng: 0.6,
        location: "Wli, Volta Region",
        description: "The highest waterfall in Ghana, cascading from a height of approximately 60 meters.",
        image: "",
        highlights: ["Highest waterfall", "Hiking trail", "Swimming opportunity"],
    },
    Seed {
        id: 5,
        name: "Elmina Castle",
        category: Category::Historical,
        rating: 4.7,
        duration: "2-3 hours",
        lat: 5.0833,
        lng: -1.35,
        location: "Elmina, Central Region",
        description: "The oldest European building in existence south of the Sahara, built by the Portuguese in 1482.",
        image: "/elmina-castle.png",
        highlights: ["Oldest European building", "Portuguese architecture", "Coastal views"],
    },
    Seed {
        id: 6,
        name: "Lake Volta",
        category: Category::Nature,
        rating: 4.4,
        duration: "Full day",
        lat: 7.5,
        lng: -0.5,
        location: "Volta Region",
        description: "One of the world's largest artificial lakes, perfect for boat trips and fishing.",
        image: "/lake-volta.png",
        highlights: ["Largest artificial lake", "Boat trips", "Fishing"],
    },
];

pub fn ghana_attractions() -> Vec<Attraction> {
    SEEDS
        .iter()
        .filter_map(|seed| {
            Some(Attraction {
                id: AttractionId::new(seed.id)?,
                name: seed.name.into(),
                category: seed.category,
                rating: seed.rating,
                duration: seed.duration.into(),
                lat: seed.lat,
                lng: seed.lng,
                location: seed.location.into(),
                description: seed.description.into(),
                image: (!seed.image.is_empty()).then(|| seed.image.to_string()),
                highlights: seed.highlights.iter().map(|h| h.to_string()).collect(),
            })
        })
        .collect()
}

impl Catalog {
    pub fn ghana() -> ExplorerResult<Self> {
        let attractions = ghana_attractions();
        if attractions.len() != SEEDS.len() {
            return Err(ExplorerError::InvalidCatalog(
                "built-in catalog contains a zero id".into(),
            ));
        }
        Catalog::new(attractions)
    }
}
