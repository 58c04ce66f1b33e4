pub mod common;
pub mod location;
pub mod order;
pub mod plan;
pub mod schedule;
pub mod vehicle;

pub use common::{find_by_id, CatalogEntry, Displayable};
pub use location::{Location, LocationKind};
pub use order::{OrderStep, PaymentMethod, PaymentReceipt, StepStatus, Technician};
pub use plan::{Plan, PlanId};
pub use schedule::{DateTimeSelection, TimeSlot};
pub use vehicle::{Vehicle, VehicleKind};
