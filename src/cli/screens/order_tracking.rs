use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::cli::screens::{escape_outcome, ScreenContext, ScreenOutcome};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::menu_renderer::{clear_terminal, MenuRenderer, MenuUI, MenuUIItem};
use crate::core::tracking::ESTIMATED_ARRIVAL;
use crate::core::{PeriodicTask, TaskControl, TrackingSimulator, WizardMessage};
use crate::domain::{StepStatus, Technician};
use crate::errors::CliError;

fn step_marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Completed => "✓",
        StepStatus::Current => "●",
        StepStatus::Pending => "○",
    }
}

/// Text snapshot of the tracking view for booking `reference`.
pub fn status_lines(tracker: &TrackingSimulator, reference: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Order ID: #{reference}"),
        format!("Estimated Time: {ESTIMATED_ARRIVAL}"),
    ];
    if let Some(step) = tracker.current_step() {
        lines.push(format!("Status: {}", step.title));
        if let Some(stamp) = &step.timestamp {
            lines.push(format!("Updated at {stamp}"));
        }
    }

    if tracker.technician_visible() {
        let technician = Technician::default();
        lines.push(String::new());
        lines.push(format!("Technician: {} ★ {}", technician.name, technician.rating));
        lines.push(format!("  Phone: {}", technician.phone));
        lines.push(format!("  Van: {}", technician.vehicle_number));
    }

    lines.push(String::new());
    for step in tracker.steps() {
        let stamp = step
            .timestamp
            .as_deref()
            .filter(|_| step.status != StepStatus::Pending)
            .map(|stamp| format!(" ({stamp})"))
            .unwrap_or_default();
        lines.push(format!("{} {}{}", step_marker(step.status), step.title, stamp));
        lines.push(format!("    {}", step.description));
    }

    if tracker.is_complete() {
        lines.push(String::new());
        lines.push("Service Completed!".to_string());
        lines.push("Your car has been professionally cleaned and is ready to go.".to_string());
    }
    lines
}

fn show_snapshot(formatter: &Formatter, tracker: &TrackingSimulator, reference: &str) {
    if let Err(err) = clear_terminal() {
        debug!(error = %err, "could not clear terminal");
    }
    formatter.print_header("Order Tracking");
    for line in status_lines(tracker, reference) {
        println!("{line}");
    }
    println!();
}

/// Streams status updates until the last step is reached.
fn follow_order(ctx: &ScreenContext, reference: &str) {
    let formatter = Formatter::new();
    let tracker = Arc::new(Mutex::new(TrackingSimulator::new()));
    if let Ok(initial) = tracker.lock() {
        show_snapshot(&formatter, &initial, reference);
    }

    let (snapshot_tx, snapshot_rx) = mpsc::channel::<TrackingSimulator>();
    let shared = Arc::clone(&tracker);
    let clock = Arc::clone(&ctx.clock);
    let mut task = PeriodicTask::spawn(ctx.config.tracking_interval(), move || {
        let Ok(mut tracker) = shared.lock() else {
            return TaskControl::Stop;
        };
        tracker.tick(clock.as_ref());
        if snapshot_tx.send(tracker.clone()).is_err() || tracker.is_complete() {
            TaskControl::Stop
        } else {
            TaskControl::Continue
        }
    });

    // The sender is dropped with the ticker closure, which ends this loop.
    for snapshot in snapshot_rx {
        show_snapshot(&formatter, &snapshot, reference);
    }
    task.stop();
    info!(reference, "order tracking finished");
}

pub(super) fn run(ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let reference = ctx
        .receipt
        .as_ref()
        .map(|receipt| receipt.reference.clone())
        .unwrap_or_else(|| "PENDING".to_string());
    follow_order(ctx, &reference);

    let menu = MenuUI::new(
        "Order Tracking",
        vec![
            MenuUIItem::new("again", "Book Again", "Start a new booking"),
            MenuUIItem::new("exit", "Exit", "Close ParkQwik"),
        ],
    );
    loop {
        match MenuRenderer::new().show(&menu)?.as_deref() {
            Some("again") => {
                ctx.receipt = None;
                return Ok(ScreenOutcome::Message(WizardMessage::StartNewOrder));
            }
            Some(_) => return Ok(ScreenOutcome::Quit),
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

    #[test]
    fn opening_snapshot_hides_technician() {
        let tracker = TrackingSimulator::new();
        let lines = status_lines(&tracker, "PQ1234ABCD");
        assert_eq!(lines[0], "Order ID: #PQ1234ABCD");
        assert!(lines.contains(&"Status: En Route".to_string()));
        assert!(lines.contains(&"Updated at 11:15 AM".to_string()));
        assert!(!lines.iter().any(|line| line.starts_with("Technician")));
        assert!(lines.contains(&"✓ Order Confirmed (10:30 AM)".to_string()));
    }

    #[test]
    fn technician_appears_after_first_tick() {
        let mut tracker = TrackingSimulator::new();
        tracker.advance("11:20 AM");
        let lines = status_lines(&tracker, "PQ1");
        assert!(lines.contains(&"Technician: Prabu Dhayalan ★ 4.8".to_string()));
        assert!(!lines.contains(&"Service Completed!".to_string()));
    }

    #[test]
    fn completion_panel_shown_at_last_step() {
        let mut tracker = TrackingSimulator::new();
        while tracker.advance("12:00 PM") {}
        let lines = status_lines(&tracker, "PQ1");
        assert_eq!(
            lines.last().unwrap(),
            "Your car has been professionally cleaned and is ready to go."
        );
        assert!(lines.contains(&"● Service Completed (12:00 PM)".to_string()));
    }
}
