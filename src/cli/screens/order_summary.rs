use tracing::warn;

use crate::cli::io;
use crate::cli::screens::{
    back, back_item, escape_outcome, ScreenContext, ScreenOutcome, BACK_KEY,
};
use crate::cli::ui::menu_renderer::{MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::spinner::ProgressSpinner;
use crate::core::pricing::TAX_PERCENT;
use crate::core::{calculate_pricing, AppState, OrderDetails, PriceBreakdown, WizardMessage};
use crate::domain::{Displayable, PaymentMethod};
use crate::errors::CliError;

const PAY_KEY: &str = "pay";
const METHOD_PREFIX: &str = "method:";

/// Payment method highlighted on the summary. UPI unless changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentPicker {
    method: PaymentMethod,
}

impl PaymentPicker {
    pub fn select(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }
}

/// Service details followed by the price breakdown.
pub fn summary_lines(
    details: &OrderDetails<'_>,
    pricing: &PriceBreakdown,
    money: impl Fn(i64) -> String,
) -> Vec<String> {
    let vehicle = details.vehicle;
    let mut lines = vec![
        "Service Details".to_string(),
        format!("  {} Plan: {}", details.plan.title, details.plan.headline_features()),
        format!(
            "  Vehicle: {} ({})",
            vehicle.display_label(),
            vehicle.vehicle_number
        ),
        format!("  Location: {}", details.location.address),
        format!("  Schedule: {}", details.date_time.short_description()),
        String::new(),
        "Price Breakdown".to_string(),
        format!("  Service charge: {}", money(pricing.base_price)),
        format!("  GST ({TAX_PERCENT}%): {}", money(pricing.tax)),
    ];
    if pricing.has_discount() {
        lines.push(format!(
            "  Discount ({} plan): -{}",
            details.plan.title,
            money(pricing.discount)
        ));
    }
    lines.push(format!("  Total: {}", money(pricing.total)));
    lines
}

pub(super) fn run(state: &AppState, ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let Some(details) = state.order_details() else {
        warn!("order summary opened without a complete booking");
        io::print_warning("Booking details are incomplete");
        return Ok(back());
    };
    let pricing = calculate_pricing(details.plan);
    let context = summary_lines(&details, &pricing, |amount| ctx.money(amount)).join("\n");
    let mut picker = PaymentPicker::default();

    loop {
        let mut items: Vec<MenuUIItem> = PaymentMethod::ALL
            .iter()
            .map(|method| {
                let marker = if *method == picker.method() { "● " } else { "○ " };
                MenuUIItem::new(
                    format!("{METHOD_PREFIX}{}", method.as_str()),
                    format!("{marker}{}", method.display_label()),
                    "Payment method",
                )
            })
            .collect();
        items.push(MenuUIItem::new(
            PAY_KEY,
            format!("Confirm & Pay {}", ctx.money(pricing.total)),
            format!("Pay with {}", picker.method()),
        ));
        items.push(back_item());
        let menu = MenuUI::new("Order Summary", items)
            .with_context(context.clone())
            .with_initial_key(PAY_KEY);

        match MenuRenderer::new().show(&menu)?.as_deref() {
            Some(PAY_KEY) => {
                let result = ProgressSpinner::run("Processing payment...", || {
                    ctx.payments.confirm_payment(picker.method(), pricing.total)
                });
                match result {
                    Ok(receipt) => {
                        io::print_success(format!(
                            "Payment received. Booking #{}",
                            receipt.reference
                        ));
                        ctx.receipt = Some(receipt);
                        return Ok(ScreenOutcome::Message(WizardMessage::OrderConfirmed));
                    }
                    Err(err) => {
                        warn!(error = %err, "payment failed");
                        io::print_warning(err);
                    }
                }
            }
            Some(BACK_KEY) => return Ok(back()),
            Some(key) => {
                if let Some(method) =
                    key.strip_prefix(METHOD_PREFIX).and_then(PaymentMethod::parse)
                {
                    picker.select(method);
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
