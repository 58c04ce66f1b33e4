use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Clock abstracts access to the current local time so the calendar and
/// tracking timestamps stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Returns the current local date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Wall-clock label used to stamp tracking steps, e.g. `11:15 AM`.
    fn time_label(&self) -> String {
        self.now().format("%-I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Local>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self { instant }
    }

    /// Pins the clock to a local wall-clock time. Ambiguous or skipped local
    /// times (DST transitions) resolve to the earliest valid instant, falling
    /// back to the current time when none exists.
    pub fn at(naive: NaiveDateTime) -> Self {
        let instant = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(Local::now);
        Self { instant }
    }

    pub fn on(date: NaiveDate) -> Self {
        Self::at(date.and_hms_opt(9, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_pinned_date_and_label() {
        let naive = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(11, 15, 0)
            .unwrap();
        let clock = FixedClock::at(naive);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(clock.time_label(), "11:15 AM");
    }

    #[test]
    fn on_pins_morning_of_date() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(FixedClock::on(date).today(), date);
    }
}
