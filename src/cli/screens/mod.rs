//! Terminal views, one per wizard screen.
//!
//! Every screen keeps its transient selections in a small struct that is
//! unit tested on its own, and a `run` function that renders it and turns
//! user input into a [`ScreenOutcome`].

mod date_time;
mod location;
mod order_summary;
mod order_tracking;
mod vehicle_details;
mod wash_plan;
mod welcome;

use std::sync::Arc;

pub use date_time::render_calendar;
pub use location::LocationPicker;
pub use order_summary::{summary_lines, PaymentPicker};
pub use order_tracking::status_lines;
pub use wash_plan::{plan_row, PlanPicker};

use crate::cli::io;
use crate::cli::ui::menu_renderer::MenuUIItem;
use crate::config::Config;
use crate::core::services::{
    LocationService, PaymentGateway, SimulatedLocationService, SimulatedPaymentGateway,
};
use crate::core::{AppState, Clock, ScreenId, SystemClock, WizardMessage};
use crate::domain::PaymentReceipt;
use crate::errors::CliError;

const BACK_KEY: &str = "back";
const CONTINUE_KEY: &str = "continue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOutcome {
    Message(WizardMessage),
    Quit,
}

/// Services and settings shared by the screens of one session.
pub struct ScreenContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub locations: Box<dyn LocationService>,
    pub payments: Box<dyn PaymentGateway>,
    /// Receipt of the payment made on the summary screen.
    pub receipt: Option<PaymentReceipt>,
}

impl ScreenContext {
    pub fn new(config: Config) -> Self {
        Self {
            locations: Box::new(SimulatedLocationService::new(config.location_delay())),
            payments: Box::new(SimulatedPaymentGateway::new(config.payment_delay())),
            clock: Arc::new(SystemClock),
            receipt: None,
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn money(&self, amount: i64) -> String {
        self.config.money(amount)
    }
}

pub fn run_screen(state: &AppState, ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    match state.current_screen {
        ScreenId::Welcome => welcome::run(ctx),
        ScreenId::WashPlan => wash_plan::run(state, ctx),
        ScreenId::VehicleDetails => vehicle_details::run(state),
        ScreenId::Location => location::run(state, ctx),
        ScreenId::DateTime => date_time::run(state, ctx),
        ScreenId::OrderSummary => order_summary::run(state, ctx),
        ScreenId::OrderTracking => order_tracking::run(ctx),
    }
}

/// ESC on a screen. `None` means the user chose to stay.
fn escape_outcome() -> Result<Option<ScreenOutcome>, CliError> {
    if io::confirm_exit("Discard this booking and exit?")? {
        Ok(Some(ScreenOutcome::Quit))
    } else {
        Ok(None)
    }
}

fn back_item() -> MenuUIItem {
    MenuUIItem::new(BACK_KEY, "← Back", "Return to the previous step")
}

fn back() -> ScreenOutcome {
    ScreenOutcome::Message(WizardMessage::Back)
}
