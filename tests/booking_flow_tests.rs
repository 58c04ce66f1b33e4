mod common;

use common::BookingHarness;

/// Menu keys for a daily-plan booking of a Honda City from the detected
/// location, today at 10:00 AM, paid by UPI, then leaving after tracking.
const DAILY_BOOKING: &[&str] = &[
    // welcome: Get Started
    "ENTER",
    // plan: highlight Daily, then Continue
    "DOWN,ENTER",
    "DOWN,DOWN,DOWN,ENTER",
    // vehicle: Car, Honda, City, (plate is text), keep save flag, confirm
    "ENTER",
    "ENTER",
    "ENTER",
    "ENTER",
    "ENTER",
    // location: Use Current Location, then Continue
    "ENTER",
    "END,UP,ENTER",
    // date & time: pick today, pick 10:00 AM, Continue
    "ENTER",
    "ENTER",
    "DOWN,ENTER",
    "ENTER",
    "END,UP,ENTER",
    // summary: Confirm & Pay is highlighted
    "ENTER",
    // tracking: Exit
    "DOWN,ENTER",
];

#[test]
fn daily_booking_runs_to_completed_service() {
    let harness = BookingHarness::new();
    let output = harness.run_wizard(DAILY_BOOKING, &["mh12ab1234"], &[]);
    let stdout = output.stdout;

    assert!(stdout.contains("Choose Your Wash Plan"), "{stdout}");
    assert!(stdout.contains("Detected: Powai, Mumbai, Maharashtra"));
    assert!(stdout.contains("MH 12 AB 1234"));
    assert!(stdout.contains("Discount (Daily plan): -₹100"));
    assert!(stdout.contains("Confirm & Pay ₹135"));
    assert!(stdout.contains("Order ID: #PQ"));
    assert!(stdout.contains("Service Completed!"));
    assert!(stdout.contains("Thanks for using ParkQwik."));
}

#[test]
fn invalid_plate_is_reported_and_asked_again() {
    let harness = BookingHarness::new();
    let menus = [
        "ENTER",
        "DOWN,ENTER",
        "DOWN,DOWN,DOWN,ENTER",
        // type, brand, model, save flag, first review
        "ENTER",
        "ENTER",
        "ENTER",
        "ENTER",
        "ENTER",
        // review after the rejected plate was fixed
        "ENTER",
        // location: leave
        "ESC",
    ];
    let output = harness.run_wizard(&menus, &["12AB", "MH12AB1234"], &["y"]);

    assert!(output
        .stdout
        .contains("Please enter valid vehicle number (e.g., MH 12 AB 1234)"));
    assert!(output.stdout.contains("Select Location"));
}

#[test]
fn back_from_plan_returns_to_welcome() {
    let harness = BookingHarness::new();
    let output = harness.run_wizard(&["ENTER", "END,ENTER", "DOWN,ENTER"], &[], &[]);

    let welcome_count = output.stdout.matches("Professional car wash service").count();
    assert_eq!(welcome_count, 2, "{}", output.stdout);
    assert!(output.stdout.contains("Thanks for using ParkQwik."));
}

#[test]
fn escape_asks_before_discarding_booking() {
    let harness = BookingHarness::new();
    // First ESC is declined, the second is accepted.
    let output = harness.run_wizard(&["ENTER", "ESC", "ESC"], &[], &["n", "y"]);

    let plan_screens = output.stdout.matches("Choose Your Wash Plan").count();
    assert_eq!(plan_screens, 2, "{}", output.stdout);
    assert!(output.stdout.contains("Thanks for using ParkQwik."));
}
