//! Deterministic reduction-tip lookup keyed by category and event status.

use verda_domain::{Category, EventStatus};

const ELECTRICITY_DANGER_TIPS: [&str; 3] = [
    "Switch to LED bulbs immediately to cut lighting costs by 50%.",
    "Unplug devices like TVs and computers when not in use (Vampire Power).",
    "Consider servicing your AC units; clogged filters increase power by 15%.",
];

const GAS_DANGER_TIPS: [&str; 3] = [
    "Use pressure cookers to speed up cooking and save gas.",
    "Ensure the flame is blue; yellow flame indicates wastage.",
    "Cover pans while cooking to retain heat and cook faster.",
];

const GROCERY_DANGER_TIPS: [&str; 3] = [
    "Avoid single-use plastics; they add significant hidden carbon costs.",
    "Buy local and seasonal produce to cut transport emissions.",
    "Reduce meat consumption; plant-based diets have lower footprints.",
];

// One encouragement list shared across categories.
const WITHIN_LIMIT_TIPS: [&str; 3] = [
    "Great job! Keep maintaining this efficiency.",
    "Share your tips with friends to earn extra Eco Coins.",
    "Try to reduce by another 5% next time to reach 'Super Saver' status.",
];

pub struct SuggestionService;

impl SuggestionService {
    /// Ordered tips for a classified calculation. No personalization beyond
    /// the binary status branch.
    pub fn for_event(category: Category, status: EventStatus) -> Vec<String> {
        let tips: &[&str; 3] = match (category, status) {
            (_, EventStatus::Ok) => &WITHIN_LIMIT_TIPS,
            (Category::Electricity, EventStatus::Danger) => &ELECTRICITY_DANGER_TIPS,
            (Category::Gas, EventStatus::Danger) => &GAS_DANGER_TIPS,
            (Category::Grocery, EventStatus::Danger) => &GROCERY_DANGER_TIPS,
        };
        tips.iter().map(|tip| (*tip).to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danger_tips_are_category_specific_and_ordered() {
        let tips = SuggestionService::for_event(Category::Gas, EventStatus::Danger);
        assert_eq!(tips.len(), 3);
        assert!(tips[0].contains("pressure cookers"));
        assert!(tips[1].contains("blue"));

        let electricity = SuggestionService::for_event(Category::Electricity, EventStatus::Danger);
        assert!(electricity[0].contains("LED"));
    }

    #[test]
    fn ok_tips_are_identical_across_categories() {
        let grocery = SuggestionService::for_event(Category::Grocery, EventStatus::Ok);
        let gas = SuggestionService::for_event(Category::Gas, EventStatus::Ok);
        assert_eq!(grocery, gas);
        assert_eq!(grocery.len(), 3);
    }
}
