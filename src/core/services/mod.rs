pub mod location_service;
pub mod payment_service;

pub use location_service::{LocationService, SimulatedLocationService};
pub use payment_service::{booking_reference, PaymentGateway, SimulatedPaymentGateway};

use crate::errors::BookingError;

pub type ServiceResult<T> = Result<T, BookingError>;
