//! Booking wizard state and the reducer that owns every transition.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{DateTimeSelection, Location, Plan, Vehicle};

/// Screens of the booking flow, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenId {
    #[default]
    Welcome,
    WashPlan,
    VehicleDetails,
    Location,
    DateTime,
    OrderSummary,
    OrderTracking,
}

impl ScreenId {
    pub const ALL: [ScreenId; 7] = [
        ScreenId::Welcome,
        ScreenId::WashPlan,
        ScreenId::VehicleDetails,
        ScreenId::Location,
        ScreenId::DateTime,
        ScreenId::OrderSummary,
        ScreenId::OrderTracking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenId::Welcome => "welcome",
            ScreenId::WashPlan => "washPlan",
            ScreenId::VehicleDetails => "vehicleDetails",
            ScreenId::Location => "location",
            ScreenId::DateTime => "dateTime",
            ScreenId::OrderSummary => "orderSummary",
            ScreenId::OrderTracking => "orderTracking",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Welcome => "Welcome",
            ScreenId::WashPlan => "Choose Your Wash Plan",
            ScreenId::VehicleDetails => "Vehicle Details",
            ScreenId::Location => "Select Location",
            ScreenId::DateTime => "Choose Date & Time",
            ScreenId::OrderSummary => "Order Summary",
            ScreenId::OrderTracking => "Order Tracking",
        }
    }

    /// Fixed backward edge for each screen. `Welcome` loops onto itself.
    pub fn predecessor(&self) -> ScreenId {
        match self {
            ScreenId::Welcome => ScreenId::Welcome,
            ScreenId::WashPlan => ScreenId::Welcome,
            ScreenId::VehicleDetails => ScreenId::WashPlan,
            ScreenId::Location => ScreenId::VehicleDetails,
            ScreenId::DateTime => ScreenId::Location,
            ScreenId::OrderSummary => ScreenId::DateTime,
            ScreenId::OrderTracking => ScreenId::OrderSummary,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the wizard has accumulated so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_screen: ScreenId,
    pub selected_plan: Option<Plan>,
    pub vehicle_details: Option<Vehicle>,
    pub selected_location: Option<Location>,
    pub selected_date_time: Option<DateTimeSelection>,
}

/// Read-only projection handed to the summary and tracking views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDetails<'a> {
    pub plan: &'a Plan,
    pub vehicle: &'a Vehicle,
    pub location: &'a Location,
    pub date_time: &'a DateTimeSelection,
}

impl AppState {
    pub fn order_details(&self) -> Option<OrderDetails<'_>> {
        Some(OrderDetails {
            plan: self.selected_plan.as_ref()?,
            vehicle: self.vehicle_details.as_ref()?,
            location: self.selected_location.as_ref()?,
            date_time: self.selected_date_time.as_ref()?,
        })
    }

    fn apply(&mut self, patch: StatePatch) {
        if let Some(plan) = patch.selected_plan {
            self.selected_plan = Some(plan);
        }
        if let Some(vehicle) = patch.vehicle_details {
            self.vehicle_details = Some(vehicle);
        }
        if let Some(location) = patch.selected_location {
            self.selected_location = Some(location);
        }
        if let Some(date_time) = patch.selected_date_time {
            self.selected_date_time = Some(date_time);
        }
    }
}

/// Shallow patch merged into [`AppState`]; `None` fields leave state untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub selected_plan: Option<Plan>,
    pub vehicle_details: Option<Vehicle>,
    pub selected_location: Option<Location>,
    pub selected_date_time: Option<DateTimeSelection>,
}

impl StatePatch {
    pub fn plan(plan: Plan) -> Self {
        Self {
            selected_plan: Some(plan),
            ..Self::default()
        }
    }

    pub fn vehicle(vehicle: Vehicle) -> Self {
        Self {
            vehicle_details: Some(vehicle),
            ..Self::default()
        }
    }

    pub fn location(location: Location) -> Self {
        Self {
            selected_location: Some(location),
            ..Self::default()
        }
    }

    pub fn date_time(date_time: DateTimeSelection) -> Self {
        Self {
            selected_date_time: Some(date_time),
            ..Self::default()
        }
    }
}

/// Transitions a screen may request from the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMessage {
    GetStarted,
    PlanSelected(Plan),
    VehicleSubmitted(Vehicle),
    LocationSelected(Location),
    ScheduleSelected(DateTimeSelection),
    OrderConfirmed,
    StartNewOrder,
    Back,
}

impl WizardMessage {
    pub fn name(&self) -> &'static str {
        match self {
            WizardMessage::GetStarted => "get_started",
            WizardMessage::PlanSelected(_) => "plan_selected",
            WizardMessage::VehicleSubmitted(_) => "vehicle_submitted",
            WizardMessage::LocationSelected(_) => "location_selected",
            WizardMessage::ScheduleSelected(_) => "schedule_selected",
            WizardMessage::OrderConfirmed => "order_confirmed",
            WizardMessage::StartNewOrder => "start_new_order",
            WizardMessage::Back => "back",
        }
    }
}

/// Pure transition function. Never fails; every message has a defined target.
pub fn reduce(state: &AppState, message: WizardMessage) -> AppState {
    let mut next = state.clone();
    match message {
        WizardMessage::GetStarted => next.current_screen = ScreenId::WashPlan,
        WizardMessage::PlanSelected(plan) => {
            next.apply(StatePatch::plan(plan));
            next.current_screen = ScreenId::VehicleDetails;
        }
        WizardMessage::VehicleSubmitted(vehicle) => {
            next.apply(StatePatch::vehicle(vehicle));
            next.current_screen = ScreenId::Location;
        }
        WizardMessage::LocationSelected(location) => {
            next.apply(StatePatch::location(location));
            next.current_screen = ScreenId::DateTime;
        }
        WizardMessage::ScheduleSelected(date_time) => {
            next.apply(StatePatch::date_time(date_time));
            next.current_screen = ScreenId::OrderSummary;
        }
        WizardMessage::OrderConfirmed => next.current_screen = ScreenId::OrderTracking,
        WizardMessage::StartNewOrder => next = AppState::default(),
        WizardMessage::Back => next.current_screen = state.current_screen.predecessor(),
    }
    next
}

/// Sole owner of the booking state.
#[derive(Debug, Default)]
pub struct WizardController {
    state: AppState,
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_screen(&self) -> ScreenId {
        self.state.current_screen
    }

    pub fn dispatch(&mut self, message: WizardMessage) -> ScreenId {
        let from = self.state.current_screen;
        let name = message.name();
        self.state = reduce(&self.state, message);
        info!(
            message = name,
            from = %from,
            to = %self.state.current_screen,
            "wizard transition"
        );
        self.state.current_screen
    }

    pub fn navigate_to(&mut self, screen: ScreenId, patch: StatePatch) {
        let from = self.state.current_screen;
        self.state.apply(patch);
        self.state.current_screen = screen;
        info!(from = %from, to = %screen, "wizard navigation");
    }

    pub fn go_back(&mut self) -> ScreenId {
        self.dispatch(WizardMessage::Back)
    }

    pub fn reset(&mut self) {
        self.dispatch(WizardMessage::StartNewOrder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlanId, VehicleKind};

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            vehicle_type: VehicleKind::Car,
            brand: "Honda".into(),
            model: "City".into(),
            vehicle_number: "MH 12 AB 1234".into(),
            save_to_vehicles: true,
        }
    }

    fn daily() -> Plan {
        Plan::find(PlanId::Daily).unwrap().clone()
    }

    fn completed_controller() -> WizardController {
        let mut controller = WizardController::new();
        controller.dispatch(WizardMessage::GetStarted);
        controller.dispatch(WizardMessage::PlanSelected(daily()));
        controller.dispatch(WizardMessage::VehicleSubmitted(sample_vehicle()));
        controller.dispatch(WizardMessage::LocationSelected(Location::detected()));
        controller.dispatch(WizardMessage::ScheduleSelected(DateTimeSelection::new(
            "2026-10-17",
            "10:00",
        )));
        controller
    }

    #[test]
    fn forward_flow_accumulates_selections() {
        let mut controller = completed_controller();
        assert_eq!(controller.current_screen(), ScreenId::OrderSummary);
        let details = controller.state().order_details().unwrap();
        assert_eq!(details.plan.id, PlanId::Daily);
        assert_eq!(details.date_time.time, "10:00");

        controller.dispatch(WizardMessage::OrderConfirmed);
        assert_eq!(controller.current_screen(), ScreenId::OrderTracking);
    }

    #[test]
    fn back_uses_fixed_predecessor_regardless_of_state() {
        let mut state = AppState {
            current_screen: ScreenId::VehicleDetails,
            ..AppState::default()
        };
        state = reduce(&state, WizardMessage::Back);
        assert_eq!(state.current_screen, ScreenId::WashPlan);

        let welcome = reduce(&AppState::default(), WizardMessage::Back);
        assert_eq!(welcome.current_screen, ScreenId::Welcome);
        assert_eq!(
            ScreenId::OrderTracking.predecessor(),
            ScreenId::OrderSummary
        );
    }

    #[test]
    fn going_back_keeps_accumulated_selections() {
        let mut controller = completed_controller();
        let before = controller.state().clone();
        controller.go_back();
        controller.go_back();
        assert_eq!(controller.current_screen(), ScreenId::Location);
        assert_eq!(controller.state().selected_plan, before.selected_plan);
        assert_eq!(
            controller.state().selected_date_time,
            before.selected_date_time
        );
    }

    #[test]
    fn start_new_order_resets_everything() {
        let mut controller = completed_controller();
        controller.dispatch(WizardMessage::OrderConfirmed);
        controller.dispatch(WizardMessage::StartNewOrder);
        assert_eq!(controller.state(), &AppState::default());
        assert!(controller.state().order_details().is_none());
    }

    #[test]
    fn navigate_to_merges_patch_shallowly() {
        let mut controller = WizardController::new();
        controller.navigate_to(ScreenId::VehicleDetails, StatePatch::plan(daily()));
        controller.navigate_to(ScreenId::Location, StatePatch::default());
        assert_eq!(controller.current_screen(), ScreenId::Location);
        assert!(controller.state().selected_plan.is_some());
        assert!(controller.state().vehicle_details.is_none());
    }

    #[test]
    fn unreached_selections_stay_empty() {
        let state = reduce(
            &reduce(&AppState::default(), WizardMessage::GetStarted),
            WizardMessage::PlanSelected(daily()),
        );
        assert!(state.vehicle_details.is_none());
        assert!(state.selected_location.is_none());
        assert!(state.selected_date_time.is_none());
    }
}
