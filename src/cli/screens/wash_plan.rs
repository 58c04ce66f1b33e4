use crate::cli::screens::{
    back, back_item, escape_outcome, ScreenContext, ScreenOutcome, BACK_KEY, CONTINUE_KEY,
};
use crate::cli::ui::menu_renderer::{MenuRenderer, MenuUI, MenuUIItem};
use crate::core::{AppState, WizardMessage};
use crate::domain::{Displayable, Plan, PlanId};
use crate::errors::CliError;

/// Highlighted plan on the plan screen. Nothing is preselected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanPicker {
    selected: Option<PlanId>,
}

impl PlanPicker {
    pub fn resume(previous: Option<&Plan>) -> Self {
        Self {
            selected: previous.map(|plan| plan.id),
        }
    }

    pub fn select(&mut self, id: PlanId) -> bool {
        if Plan::find(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn selected(&self) -> Option<PlanId> {
        self.selected
    }

    pub fn selection(&self) -> Option<Plan> {
        self.selected.and_then(Plan::find).cloned()
    }
}

/// Menu row for a plan: title and badge, then price and cadence, with the
/// one-time price struck through for subscription plans.
pub fn plan_row(plan: &Plan, money: impl Fn(i64) -> String) -> (String, String) {
    let mut detail = format!("{} {}", money(plan.price), plan.id.cadence_label());
    if plan.id != PlanId::OneTime {
        detail.push_str(&format!(" (vs {} one-time)", money(Plan::one_time_price())));
    }
    detail.push_str(&format!(" · {}", plan.features.join(", ")));
    (plan.display_label(), detail)
}

pub(super) fn run(state: &AppState, ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let mut picker = PlanPicker::resume(state.selected_plan.as_ref());

    loop {
        let mut items: Vec<MenuUIItem> = Plan::catalog()
            .iter()
            .map(|plan| {
                let (label, detail) = plan_row(plan, |amount| ctx.money(amount));
                let marker = if picker.selected() == Some(plan.id) { "● " } else { "○ " };
                MenuUIItem::new(plan.id.as_str(), format!("{marker}{label}"), detail)
            })
            .collect();
        if picker.selected().is_some() {
            items.push(MenuUIItem::new(
                CONTINUE_KEY,
                "Continue to Vehicle Details",
                "Keep the highlighted plan",
            ));
        }
        items.push(back_item());

        let mut menu = MenuUI::new("Choose Your Wash Plan", items)
            .with_context("Select the perfect plan for your car");
        if let Some(id) = picker.selected() {
            menu = menu.with_initial_key(id.as_str());
        }

        match MenuRenderer::new().show(&menu)?.as_deref() {
            Some(CONTINUE_KEY) => {
                if let Some(plan) = picker.selection() {
                    return Ok(ScreenOutcome::Message(WizardMessage::PlanSelected(plan)));
                }
            }
            Some(BACK_KEY) => return Ok(back()),
            Some(key) => {
                if let Some(id) = PlanId::parse(key) {
                    picker.select(id);
                }
            }
            None => {
                if let Some(outcome) = escape_outcome()? {
                    return Ok(outcome);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rupees(amount: i64) -> String {
        format!("₹{amount}")
    }

    #[test]
    fn picker_starts_empty_and_resumes_previous_plan() {
        assert!(PlanPicker::default().selection().is_none());
        let weekly = Plan::find(PlanId::Weekly).unwrap();
        let picker = PlanPicker::resume(Some(weekly));
        assert_eq!(picker.selection().unwrap().price, 999);
    }

    #[test]
    fn reselecting_replaces_choice() {
        let mut picker = PlanPicker::default();
        assert!(picker.select(PlanId::Daily));
        assert!(picker.select(PlanId::Monthly));
        assert_eq!(picker.selected(), Some(PlanId::Monthly));
    }

    #[test]
    fn subscription_rows_compare_against_one_time_price() {
        let daily = Plan::find(PlanId::Daily).unwrap();
        let (label, detail) = plan_row(daily, rupees);
        assert_eq!(label, "Daily (Most Popular)");
        assert!(detail.starts_with("₹199 Per day (vs ₹299 one-time)"));

        let one_time = Plan::find(PlanId::OneTime).unwrap();
        let (_, detail) = plan_row(one_time, rupees);
        assert!(!detail.contains("vs"));
    }
}
