use crate::generator::template::{describe, template_for};
use anyhow::Context;
use explorercore::catalog::Catalog;
use explorercore::math::GeoBounds;
use explorercore::{Attraction, AttractionId, Category, GeoPoint};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: u64,
    /// Region the generated attractions are scattered in.
    pub region: GeoBounds,
    /// Share of records generated without an image.
    pub missing_images: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 24,
            seed: 0,
            region: GeoBounds {
                south_west: GeoPoint::new(4.74, -3.26),
                north_east: GeoPoint::new(11.17, 1.19),
            },
            missing_images: 0.25,
        }
    }
}

fn pick<'a>(rng: &mut StdRng, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn build_attraction(rng: &mut StdRng, id: AttractionId, config: &GeneratorConfig) -> Attraction {
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    let template = template_for(category);
    let name = format!(
        "{} {} {}",
        pick(rng, template.prefixes),
        pick(rng, template.kinds),
        id
    );

    let region = &config.region;
    let lat = rng.gen_range(region.south_west.lat..=region.north_east.lat);
    let lng = rng.gen_range(region.south_west.lng..=region.north_east.lng);
    let rating = (rng.gen_range(3.5f32..=5.0) * 10.0).round() / 10.0;

    let mut highlights: Vec<String> = template
        .highlights
        .choose_multiple(rng, 3)
        .map(|label| label.to_string())
        .collect();
    highlights.sort();

    let image = (!rng.gen_bool(config.missing_images.clamp(0.0, 1.0)))
        .then(|| format!("/generated-{id}.png"));

    Attraction {
        id,
        description: describe(&name, category),
        name,
        category,
        rating,
        duration: pick(rng, template.durations).to_string(),
        lat,
        lng,
        location: format!("Sector {}", id.get() % 10),
        image,
        highlights,
    }
}

/// Builds a reproducible catalog: the same config always yields the same records.
pub fn generate_catalog(config: &GeneratorConfig) -> anyhow::Result<Catalog> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let count = u32::try_from(config.count).context("generator count does not fit an id")?;
    let attractions = (1..=count)
        .filter_map(AttractionId::new)
        .map(|id| build_attraction(&mut rng, id, config))
        .collect();
    Catalog::new(attractions).context("validating generated catalog")
}
