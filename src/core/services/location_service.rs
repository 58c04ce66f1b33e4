use std::thread;
use std::time::Duration;

use tracing::info;

use crate::domain::Location;

use super::ServiceResult;

pub trait LocationService {
    fn current_location(&self) -> ServiceResult<Location>;
}

/// Pretends to query the device position; always resolves to Powai.
#[derive(Debug, Clone)]
pub struct SimulatedLocationService {
    delay: Duration,
}

impl SimulatedLocationService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl LocationService for SimulatedLocationService {
    fn current_location(&self) -> ServiceResult<Location> {
        thread::sleep(self.delay);
        let location = Location::detected();
        info!(address = %location.address, "current location detected");
        Ok(location)
    }
}
