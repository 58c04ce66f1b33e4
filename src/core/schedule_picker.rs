use chrono::NaiveDate;
use tracing::debug;

use crate::core::calendar::{generate_calendar, CalendarCell, MonthCursor, ISO_DATE};
use crate::domain::{DateTimeSelection, TimeSlot};

/// Transient state of the date & time screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePicker {
    today: NaiveDate,
    month: MonthCursor,
    selected_date: String,
    selected_time: String,
}

impl SchedulePicker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            month: MonthCursor::containing(today),
            selected_date: String::new(),
            selected_time: String::new(),
        }
    }

    /// Reopens the picker on a previous selection, e.g. after navigating back.
    pub fn resume(today: NaiveDate, previous: &DateTimeSelection) -> Self {
        let mut picker = Self::new(today);
        if let Some(date) = previous.parsed_date() {
            if picker.select_date(date) {
                picker.month = MonthCursor::containing(date);
            }
        }
        picker.select_time(&previous.time);
        picker
    }

    pub fn month(&self) -> MonthCursor {
        self.month
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn selected_time(&self) -> &str {
        &self.selected_time
    }

    pub fn has_date(&self) -> bool {
        !self.selected_date.is_empty()
    }

    pub fn calendar(&self) -> Vec<CalendarCell> {
        generate_calendar(self.month, &self.selected_date, self.today)
    }

    /// Days of the shown month that can still be picked.
    pub fn selectable_days(&self) -> Vec<CalendarCell> {
        self.calendar()
            .into_iter()
            .filter(CalendarCell::is_selectable)
            .collect()
    }

    /// Returns `false` and leaves the selection alone for past dates.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if date < self.today {
            debug!(date = %date, "ignoring past date");
            return false;
        }
        self.selected_date = date.format(ISO_DATE).to_string();
        true
    }

    pub fn select_cell(&mut self, cell: &CalendarCell) -> bool {
        if cell.is_past || !cell.is_current_month {
            debug!(date = %cell.date, "ignoring disabled calendar cell");
            return false;
        }
        match NaiveDate::parse_from_str(&cell.date, ISO_DATE) {
            Ok(date) => self.select_date(date),
            Err(_) => false,
        }
    }

    /// Returns `false` for unknown or booked slots.
    pub fn select_time(&mut self, slot_id: &str) -> bool {
        match TimeSlot::find(slot_id) {
            Some(slot) if slot.available => {
                self.selected_time = slot.id.clone();
                true
            }
            _ => {
                debug!(slot = slot_id, "ignoring unavailable time slot");
                false
            }
        }
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn previous_month(&mut self) {
        self.month = self.month.previous();
    }

    pub fn can_continue(&self) -> bool {
        !self.selected_date.is_empty() && !self.selected_time.is_empty()
    }

    pub fn selection(&self) -> Option<DateTimeSelection> {
        self.can_continue()
            .then(|| DateTimeSelection::new(self.selected_date.clone(), self.selected_time.clone()))
    }
}
