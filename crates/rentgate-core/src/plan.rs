//! # Plan Catalog
//!
//! Billing plans a checkout session can be opened against. The catalog is an
//! in-memory lookup seeded with the built-in plans; deployments and tests can
//! construct their own.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::identity::PlanId;

/// A purchasable entitlement extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Catalog identifier (e.g. `"monthly"`).
    pub id: PlanId,
    /// Human-readable plan name.
    pub name: String,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Entitlement extension granted on settlement, in whole days.
    pub days_duration: i64,
}

/// Read-only lookup of known plans.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: HashMap<PlanId, Plan>,
}

impl PlanCatalog {
    /// Build a catalog from an explicit plan list. Later duplicates of a
    /// plan id replace earlier ones.
    pub fn new(plans: impl IntoIterator<Item = Plan>) -> Self {
        Self {
            plans: plans.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// The built-in catalog: monthly, quarterly, yearly.
    pub fn builtin() -> Self {
        Self::new([
            Plan {
                id: PlanId::new("monthly"),
                name: "Monthly".to_string(),
                price_cents: 1_900,
                days_duration: 30,
            },
            Plan {
                id: PlanId::new("quarterly"),
                name: "Quarterly".to_string(),
                price_cents: 4_900,
                days_duration: 90,
            },
            Plan {
                id: PlanId::new("yearly"),
                name: "Yearly".to_string(),
                price_cents: 14_900,
                days_duration: 365,
            },
        ])
    }

    /// Look up a plan by id.
    pub fn get(&self, id: &PlanId) -> Option<&Plan> {
        self.plans.get(id)
    }

    /// Number of plans in the catalog.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PlanCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        let monthly = catalog.get(&PlanId::new("monthly")).unwrap();
        assert_eq!(monthly.days_duration, 30);
        let yearly = catalog.get(&PlanId::new("yearly")).unwrap();
        assert_eq!(yearly.days_duration, 365);
    }

    #[test]
    fn test_unknown_plan_is_none() {
        let catalog = PlanCatalog::builtin();
        assert!(catalog.get(&PlanId::new("lifetime")).is_none());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = PlanCatalog::new([Plan {
            id: PlanId::new("trial-extension"),
            name: "Trial Extension".to_string(),
            price_cents: 0,
            days_duration: 7,
        }]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get(&PlanId::new("trial-extension")).unwrap().price_cents,
            0
        );
    }

    #[test]
    fn test_plan_serde_roundtrip() {
        let plan = PlanCatalog::builtin()
            .get(&PlanId::new("monthly"))
            .unwrap()
            .clone();
        let json = serde_json::to_string(&plan).unwrap();
        let parsed: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, parsed);
    }
}
