use explorercore::Category;

/// Text fragments used to dress up synthetic attractions.
pub struct CategoryTemplate {
    pub prefixes: &'static [&'static str],
    pub kinds: &'static [&'static str],
    pub durations: &'static [&'static str],
    pub highlights: &'static [&'static str],
}

const HISTORICAL: CategoryTemplate = CategoryTemplate {
    prefixes: &["Old", "Royal", "Coastal", "Colonial", "Ancient"],
    kinds: &["Fort", "Castle", "Palace", "Mosque", "Museum"],
    durations: &["1-2 hours", "2-3 hours", "Half day"],
    highlights: &["Guided tours", "Museum", "Architecture", "Archives", "Ramparts"],
};

const NATURE: CategoryTemplate = CategoryTemplate {
    prefixes: &["Green", "Hidden", "Misty", "Upper", "River"],
    kinds: &["Falls", "Forest", "Lake", "Hills", "Gorge"],
    durations: &["Half day", "Full day", "2-3 hours"],
    highlights: &["Hiking trails", "Swimming", "Canopy walk", "Boat trips", "Bird watching"],
};

const WILDLIFE: CategoryTemplate = CategoryTemplate {
    prefixes: &["Northern", "Savanna", "Great", "Wild", "Eastern"],
    kinds: &["Reserve", "Sanctuary", "National Park", "Game Park"],
    durations: &["Full day", "2 days", "Full day+"],
    highlights: &["Safari", "Elephants", "Walking tours", "Antelopes", "Night drives"],
};

pub fn template_for(category: Category) -> &'static CategoryTemplate {
    match category {
        Category::Historical => &HISTORICAL,
        Category::Nature => &NATURE,
        Category::Wildlife => &WILDLIFE,
    }
}

pub fn describe(name: &str, category: Category) -> String {
    match category {
        Category::Historical => format!("{name} preserves centuries of local and colonial history."),
        Category::Nature => format!("{name} offers quiet trails and wide views over the landscape."),
        Category::Wildlife => format!("{name} is home to herds that can be watched on foot or by truck."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_fragments() {
        for category in Category::ALL {
            let template = template_for(category);
            assert!(!template.prefixes.is_empty());
            assert!(!template.kinds.is_empty());
            assert!(template.highlights.len() >= 3);
        }
    }
}
