//! Publisher profiles, one module per site.

use super::{Extractor, SiteExtractor, SiteProfile};

mod alexandracooks;
mod allrecipes;
mod damndelicious;
mod epicurious;
mod food52;
mod foodandwine;
mod foodnetwork;
mod loveandlemons;
mod nytcooking;
mod seriouseats;
mod smittenkitchen;
mod washingtonpost;

pub use alexandracooks::ALEXANDRA_COOKS;
pub use allrecipes::ALL_RECIPES;
pub use damndelicious::DAMN_DELICIOUS;
pub use epicurious::EPICURIOUS;
pub use food52::FOOD52;
pub use foodandwine::FOOD_AND_WINE;
pub use foodnetwork::FOOD_NETWORK;
pub use loveandlemons::LOVE_AND_LEMONS;
pub use nytcooking::NYT_COOKING;
pub use seriouseats::SERIOUS_EATS;
pub use smittenkitchen::SMITTEN_KITCHEN;
pub use washingtonpost::WASHINGTON_POST;

/// Every publisher profile in registration order. The first profile whose
/// locator rule matches wins.
pub static ALL: [&SiteProfile; 12] = [
    &SMITTEN_KITCHEN,
    &FOOD_NETWORK,
    &NYT_COOKING,
    &ALL_RECIPES,
    &LOVE_AND_LEMONS,
    &FOOD52,
    &EPICURIOUS,
    &WASHINGTON_POST,
    &FOOD_AND_WINE,
    &DAMN_DELICIOUS,
    &SERIOUS_EATS,
    &ALEXANDRA_COOKS,
];

/// One boxed extractor per publisher, in registration order.
pub fn extractors() -> Vec<Box<dyn Extractor>> {
    ALL.iter()
        .map(|profile| Box::new(SiteExtractor::new(profile)) as Box<dyn Extractor>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_profile_names_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_every_profile_matches_its_own_host() {
        for profile in ALL {
            let extractor = SiteExtractor::new(profile);
            for host in profile.hosts {
                let url = format!("https://www.{host}/recipe/some-dish");
                assert!(extractor.can_handle(&url), "{} should handle {url}", profile.name);
            }
        }
    }

    #[test]
    fn test_every_profile_probes_the_required_fields() {
        for profile in ALL {
            assert!(!profile.probes.title.is_empty(), "{}", profile.name);
            assert!(!profile.probes.ingredients.is_empty(), "{}", profile.name);
            assert!(!profile.probes.instructions.is_empty(), "{}", profile.name);
        }
    }
}
