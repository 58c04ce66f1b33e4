use tracing::info;

use crate::core::clock::Clock;
use crate::domain::{OrderStep, StepStatus};

pub const ESTIMATED_ARRIVAL: &str = "45 mins";

fn timeline() -> Vec<OrderStep> {
    vec![
        OrderStep::new(
            "assigned",
            "Order Confirmed",
            "Your car wash has been assigned to a technician",
        ),
        OrderStep::new(
            "enroute",
            "En Route",
            "Technician is on the way to your location",
        ),
        OrderStep::new(
            "arrived",
            "Arrived at Location",
            "Technician has arrived and is setting up",
        ),
        OrderStep::new(
            "inprogress",
            "Wash in Progress",
            "Your vehicle is being washed",
        ),
        OrderStep::new(
            "completed",
            "Service Completed",
            "Your car wash has been completed successfully",
        ),
    ]
}

/// Live status of a confirmed order, advanced one step per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSimulator {
    steps: Vec<OrderStep>,
    current_index: usize,
}

impl Default for TrackingSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackingSimulator {
    /// Opens with the order confirmed and the technician already en route.
    pub fn new() -> Self {
        let mut steps = timeline();
        steps[0] = steps[0]
            .clone()
            .with_status(StepStatus::Completed, Some("10:30 AM"));
        steps[1] = steps[1]
            .clone()
            .with_status(StepStatus::Current, Some("11:15 AM"));
        Self {
            steps,
            current_index: 0,
        }
    }

    pub fn steps(&self) -> &[OrderStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_complete(&self) -> bool {
        self.current_index >= self.last_index()
    }

    pub fn technician_visible(&self) -> bool {
        self.current_index >= 1
    }

    pub fn current_step(&self) -> Option<&OrderStep> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Current)
    }

    /// Moves the pointer one step and stamps the newly current step.
    /// Returns `false` once the last step has been reached.
    pub fn advance(&mut self, stamp: &str) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current_index += 1;
        let pointer = self.current_index;
        for (index, step) in self.steps.iter_mut().enumerate() {
            step.status = match index.cmp(&pointer) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => {
                    step.timestamp = Some(stamp.to_string());
                    StepStatus::Current
                }
                std::cmp::Ordering::Greater => StepStatus::Pending,
            };
        }
        info!(step = %self.steps[pointer].id, at = stamp, "order status advanced");
        true
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> bool {
        self.advance(&clock.time_label())
    }
}
