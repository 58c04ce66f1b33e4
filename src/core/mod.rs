pub mod calendar;
pub mod clock;
pub mod periodic;
pub mod pricing;
pub mod schedule_picker;
pub mod services;
pub mod tracking;
pub mod validation;
pub mod wizard;

pub use calendar::{generate_calendar, CalendarCell, MonthCursor, CALENDAR_CELLS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use periodic::{PeriodicTask, TaskControl};
pub use pricing::{calculate_pricing, discount_for, PriceBreakdown};
pub use schedule_picker::SchedulePicker;
pub use tracking::TrackingSimulator;
pub use validation::{
    format_vehicle_number, is_valid_vehicle_number, validate_vehicle, VehicleDraft,
};
pub use wizard::{reduce, AppState, OrderDetails, ScreenId, StatePatch, WizardController, WizardMessage};
