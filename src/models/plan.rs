use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Plan the shop falls back to when it has no active subscription.
pub const DEFAULT_PLAN: PlanName = PlanName::Basic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanName {
    Basic,
    Grow,
    Advance,
}

impl PlanName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Grow => "Grow",
            Self::Advance => "Advance",
        }
    }

    pub fn plan(&self) -> &'static Plan {
        match self {
            Self::Basic => &CATALOG[0],
            Self::Grow => &CATALOG[1],
            Self::Advance => &CATALOG[2],
        }
    }
}

impl fmt::Display for PlanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlan(pub String);

impl fmt::Display for UnknownPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown plan '{}'", self.0)
    }
}

impl std::error::Error for UnknownPlan {}

impl FromStr for PlanName {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Basic" => Ok(Self::Basic),
            "Grow" => Ok(Self::Grow),
            "Advance" => Ok(Self::Advance),
            other => Err(UnknownPlan(other.to_string())),
        }
    }
}

/// Static description of a pricing tier as shown on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: PlanName,
    /// Decimal amount in USD, passed to the billing API as-is.
    pub price: &'static str,
    pub price_label: &'static str,
    pub tagline: &'static str,
    pub features_heading: &'static str,
    pub features: &'static [&'static str],
    pub most_popular: bool,
    pub primary: bool,
    /// Whether picking this card creates a subscription. The free tier does not.
    pub billable: bool,
}

pub const CATALOG: [Plan; 3] = [
    Plan {
        name: PlanName::Basic,
        price: "0",
        price_label: "Free",
        tagline: "Essential tools for new businesses.",
        features_heading: "Features",
        features: &[
            "Basic Customer Profile",
            "Last 30 days history",
            "Standard Support",
        ],
        most_popular: false,
        primary: false,
        billable: false,
    },
    Plan {
        name: PlanName::Grow,
        price: "19",
        price_label: "$19/mo",
        tagline: "Advanced insights for growing stores.",
        features_heading: "Everything in Basic, plus:",
        features: &[
            "Full Customer Timeline",
            "Segment Analytics",
            "Email Integration",
            "Priority Support",
        ],
        most_popular: true,
        primary: true,
        billable: true,
    },
    Plan {
        name: PlanName::Advance,
        price: "49",
        price_label: "$49/mo",
        tagline: "Maximum power for scaling brands.",
        features_heading: "Everything in Grow, plus:",
        features: &[
            "Custom Reports",
            "API Access",
            "Dedicated Account Manager",
            "Unlimited History",
        ],
        most_popular: false,
        primary: false,
        billable: true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_tier() {
        let names: Vec<_> = CATALOG.iter().map(|p| p.name).collect();
        assert_eq!(names, vec![PlanName::Basic, PlanName::Grow, PlanName::Advance]);
        assert_eq!(PlanName::Grow.plan().price, "19");
        assert_eq!(PlanName::Advance.plan().price, "49");
    }

    #[test]
    fn parse_accepts_only_known_names() {
        assert_eq!("Grow".parse::<PlanName>(), Ok(PlanName::Grow));
        assert_eq!(" Advance ".parse::<PlanName>(), Ok(PlanName::Advance));
        assert_eq!("grow".parse::<PlanName>(), Err(UnknownPlan("grow".into())));
        assert!("Enterprise".parse::<PlanName>().is_err());
    }

    #[test]
    fn only_grow_is_highlighted() {
        let popular: Vec<_> = CATALOG.iter().filter(|p| p.most_popular).map(|p| p.name).collect();
        assert_eq!(popular, vec![PlanName::Grow]);
        assert!(!PlanName::Basic.plan().billable);
    }
}
