use serde::Serialize;

use crate::domain::{Plan, PlanId};

/// Tax applied on the base price, in percent.
pub const TAX_PERCENT: i64 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub plan_id: PlanId,
    pub base_price: i64,
    pub tax: i64,
    pub discount: i64,
    pub total: i64,
}

impl PriceBreakdown {
    pub fn has_discount(&self) -> bool {
        self.discount > 0
    }
}

/// Flat discount granted to subscription plans.
pub fn discount_for(plan: PlanId) -> i64 {
    match plan {
        PlanId::OneTime => 0,
        PlanId::Daily => 100,
        PlanId::Weekly => 200,
        PlanId::Monthly => 500,
    }
}

/// 18% of `base`, rounded half up in integer arithmetic.
pub fn tax_for(base: i64) -> i64 {
    (base * TAX_PERCENT + 50).div_euclid(100)
}

pub fn calculate_pricing(plan: &Plan) -> PriceBreakdown {
    let tax = tax_for(plan.price);
    let discount = discount_for(plan.id);
    PriceBreakdown {
        plan_id: plan.id,
        base_price: plan.price,
        tax,
        discount,
        total: plan.price + tax - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(id: PlanId) -> PriceBreakdown {
        calculate_pricing(Plan::find(id).unwrap())
    }

    #[test]
    fn daily_plan_totals_135() {
        let daily = breakdown(PlanId::Daily);
        assert_eq!(daily.tax, 36);
        assert_eq!(daily.discount, 100);
        assert_eq!(daily.total, 135);
    }

    #[test]
    fn catalog_breakdowns() {
        assert_eq!(breakdown(PlanId::OneTime).total, 299 + 54);
        assert!(!breakdown(PlanId::OneTime).has_discount());
        assert_eq!(breakdown(PlanId::Weekly).total, 999 + 180 - 200);
        assert_eq!(breakdown(PlanId::Monthly).total, 2999 + 540 - 500);
    }

    #[test]
    fn tax_rounds_half_up() {
        assert_eq!(tax_for(25), 5);
        assert_eq!(tax_for(100), 18);
        assert_eq!(tax_for(0), 0);
    }

    #[test]
    fn breakdown_serializes_camel_case_keys() {
        let json = serde_json::to_value(breakdown(PlanId::Daily)).unwrap();
        assert_eq!(json["planId"], "daily");
        assert_eq!(json["basePrice"], 199);
        assert_eq!(json["total"], 135);
        assert!(json.get("base_price").is_none());
    }
}
