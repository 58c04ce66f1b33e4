use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::{CatalogEntry, Displayable};

/// Identifiers of the wash plans on offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanId {
    OneTime,
    Daily,
    Weekly,
    Monthly,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::OneTime => "one-time",
            PlanId::Daily => "daily",
            PlanId::Weekly => "weekly",
            PlanId::Monthly => "monthly",
        }
    }

    /// Billing cadence shown under the plan title.
    pub fn cadence_label(&self) -> &'static str {
        match self {
            PlanId::OneTime => "One time",
            PlanId::Daily => "Per day",
            PlanId::Weekly => "Per week",
            PlanId::Monthly => "Per month",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "one-time" | "onetime" | "one_time" => Some(PlanId::OneTime),
            "daily" => Some(PlanId::Daily),
            "weekly" => Some(PlanId::Weekly),
            "monthly" => Some(PlanId::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog entry picked on the plan screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: PlanId,
    pub title: String,
    pub price: i64,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
}

impl Plan {
    fn new(id: PlanId, title: &str, price: i64, features: &[&str]) -> Self {
        Self {
            id,
            title: title.to_string(),
            price,
            features: features.iter().map(|f| f.to_string()).collect(),
            popular: false,
        }
    }

    fn popular(mut self) -> Self {
        self.popular = true;
        self
    }

    /// Reference price all subscription plans are compared against.
    pub fn one_time_price() -> i64 {
        Self::find(PlanId::OneTime).map(|plan| plan.price).unwrap_or(299)
    }

    pub fn catalog() -> &'static [Plan] {
        &PLANS
    }

    pub fn find(id: PlanId) -> Option<&'static Plan> {
        PLANS.iter().find(|plan| plan.id == id)
    }

    /// First two features, used as the short description on the summary.
    pub fn headline_features(&self) -> String {
        self.features
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl CatalogEntry for Plan {
    fn id_str(&self) -> &str {
        self.id.as_str()
    }
}

impl Displayable for Plan {
    fn display_label(&self) -> String {
        let badge = if self.popular { " (Most Popular)" } else { "" };
        format!("{}{}", self.title, badge)
    }
}

static PLANS: Lazy<Vec<Plan>> = Lazy::new(|| {
    vec![
        Plan::new(
            PlanId::OneTime,
            "One-Time",
            299,
            &[
                "Exterior wash",
                "Interior vacuum",
                "Tire cleaning",
                "Dashboard wipe",
            ],
        ),
        Plan::new(
            PlanId::Daily,
            "Daily",
            199,
            &[
                "Quick exterior wash",
                "Basic interior clean",
                "Daily convenience",
                "Save 33%",
            ],
        )
        .popular(),
        Plan::new(
            PlanId::Weekly,
            "Weekly",
            999,
            &[
                "Complete wash",
                "Interior detailing",
                "Wax polish",
                "Weekly schedule",
                "Save 50%",
            ],
        ),
        Plan::new(
            PlanId::Monthly,
            "Monthly",
            2999,
            &[
                "Premium service",
                "Deep cleaning",
                "Paint protection",
                "Monthly package",
                "Best value",
            ],
        ),
    ]
});
