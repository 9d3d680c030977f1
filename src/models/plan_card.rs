use serde::Serialize;

use super::plan::{Plan, CATALOG};

/// One pricing card as rendered for a particular current plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCard {
    pub name: String,
    pub price: String,
    pub price_label: String,
    pub tagline: String,
    pub features_heading: String,
    pub features: Vec<String>,
    pub most_popular: bool,
    pub primary: bool,
    pub submits: bool,
    pub is_current: bool,
    pub button_label: String,
}

impl PlanCard {
    pub fn new(plan: &Plan, current_plan: &str) -> Self {
        let name = plan.name.as_str();
        let is_current = name == current_plan;
        let button_label = if is_current {
            "Current Plan".to_string()
        } else if plan.billable {
            format!("Upgrade to {}", name)
        } else {
            format!("Downgrade to {}", name)
        };
        PlanCard {
            name: name.to_string(),
            price: plan.price.to_string(),
            price_label: plan.price_label.to_string(),
            tagline: plan.tagline.to_string(),
            features_heading: plan.features_heading.to_string(),
            features: plan.features.iter().map(|f| f.to_string()).collect(),
            most_popular: plan.most_popular,
            primary: plan.primary,
            submits: plan.billable && !is_current,
            is_current,
            button_label,
        }
    }

    pub fn disabled(&self) -> bool {
        self.is_current
    }
}

/// Cards for the whole catalog, in catalog order.
pub fn plan_cards(current_plan: &str) -> Vec<PlanCard> {
    CATALOG.iter().map(|p| PlanCard::new(p, current_plan)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(cards: &[PlanCard]) -> Vec<(&str, bool)> {
        cards.iter().map(|c| (c.button_label.as_str(), c.disabled())).collect()
    }

    #[test]
    fn basic_current() {
        let cards = plan_cards("Basic");
        assert_eq!(
            labels(&cards),
            vec![
                ("Current Plan", true),
                ("Upgrade to Grow", false),
                ("Upgrade to Advance", false),
            ]
        );
        assert!(cards[1].submits && cards[2].submits);
    }

    #[test]
    fn grow_current_offers_downgrade() {
        let cards = plan_cards("Grow");
        assert_eq!(
            labels(&cards),
            vec![
                ("Downgrade to Basic", false),
                ("Current Plan", true),
                ("Upgrade to Advance", false),
            ]
        );
        assert!(!cards[0].submits);
        assert!(!cards[1].submits);
    }

    #[test]
    fn unknown_current_plan_enables_everything() {
        let cards = plan_cards("Legacy Pro");
        assert!(cards.iter().all(|c| !c.disabled()));
        assert_eq!(cards[0].button_label, "Downgrade to Basic");
    }
}
