mod common;

use common::BookingHarness;
use predicates::str::contains;

#[test]
fn quote_prints_daily_breakdown_as_json() {
    let harness = BookingHarness::new();
    let output = harness
        .command()
        .args(["quote", "daily"])
        .output()
        .expect("run quote");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["planId"], "daily");
    assert_eq!(json["basePrice"], 199);
    assert_eq!(json["tax"], 36);
    assert_eq!(json["discount"], 100);
    assert_eq!(json["total"], 135);
}

#[test]
fn unknown_plan_exits_with_error() {
    let harness = BookingHarness::new();
    harness
        .command()
        .args(["quote", "hourly"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Unknown plan: hourly"));
}

#[test]
fn plans_lists_catalog_with_totals() {
    let harness = BookingHarness::new();
    harness
        .command()
        .arg("plans")
        .assert()
        .success()
        .stdout(contains("Daily (Most Popular)"))
        .stdout(contains("Total ₹135"))
        .stdout(contains("Total ₹353"));
}

#[test]
fn plate_formats_valid_numbers() {
    let harness = BookingHarness::new();
    harness
        .command()
        .args(["plate", "ka01mj2022"])
        .assert()
        .success()
        .stdout(contains("KA 01 MJ 2022"));

    harness
        .command()
        .args(["plate", "ABC123"])
        .assert()
        .failure()
        .stderr(contains("not a valid vehicle number"));
}

#[test]
fn calendar_renders_requested_month() {
    let harness = BookingHarness::new();
    harness
        .command()
        .args(["calendar", "2031-02"])
        .assert()
        .success()
        .stdout(contains("February 2031"))
        .stdout(contains("Sun  Mon  Tue"))
        .stdout(contains(" 28"));
}

#[test]
fn config_reports_file_and_values() {
    let harness = BookingHarness::new();
    harness
        .command()
        .arg("config")
        .assert()
        .success()
        .stdout(contains("config.json"))
        .stdout(contains("\"tracking_interval_ms\": 0"));
}

#[test]
fn config_init_fills_in_missing_keys() {
    let harness = BookingHarness::new();
    harness
        .command()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(contains("Configuration written to"));
    let written = std::fs::read_to_string(harness.home().join("config.json")).unwrap();
    assert!(written.contains("\"currency_symbol\": \"₹\""));
    assert!(written.contains("\"tracking_interval_ms\": 0"));
}

#[test]
fn unknown_command_is_rejected() {
    let harness = BookingHarness::new();
    harness
        .command()
        .arg("refund")
        .assert()
        .failure()
        .stderr(contains("unknown command `refund`"));
}
