use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::{find_by_id, CatalogEntry, Displayable};

/// Fixed service window with a static availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub label: String,
    pub available: bool,
}

impl TimeSlot {
    fn new(id: &str, label: &str, available: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            available,
        }
    }

    pub fn catalog() -> &'static [TimeSlot] {
        &SLOTS
    }

    pub fn find(id: &str) -> Option<&'static TimeSlot> {
        find_by_id(SLOTS.as_slice(), id)
    }

    /// Human label for a slot id; unknown ids are shown verbatim.
    pub fn label_for(id: &str) -> String {
        Self::find(id)
            .map(|slot| slot.label.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

impl CatalogEntry for TimeSlot {
    fn id_str(&self) -> &str {
        &self.id
    }
}

impl Displayable for TimeSlot {
    fn display_label(&self) -> String {
        if self.available {
            self.label.clone()
        } else {
            format!("{} (Booked)", self.label)
        }
    }
}

static SLOTS: Lazy<Vec<TimeSlot>> = Lazy::new(|| {
    vec![
        TimeSlot::new("10:00", "10:00 AM", true),
        TimeSlot::new("12:00", "12:00 PM", true),
        TimeSlot::new("14:00", "2:00 PM", false),
        TimeSlot::new("16:00", "4:00 PM", true),
        TimeSlot::new("18:00", "6:00 PM", true),
        TimeSlot::new("20:00", "8:00 PM", false),
    ]
});

/// Confirmed date (ISO `YYYY-MM-DD`) and slot id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeSelection {
    pub date: String,
    pub time: String,
}

impl DateTimeSelection {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Short form used on the order summary, e.g. `Fri, Oct 16 at 4:00 PM`.
    pub fn short_description(&self) -> String {
        let date = self
            .parsed_date()
            .map(|d| d.format("%a, %b %-d").to_string())
            .unwrap_or_else(|| self.date.clone());
        format!("{} at {}", date, TimeSlot::label_for(&self.time))
    }

    /// Long form used on the date screen, e.g. `Friday, October 16, 2026 at 4:00 PM`.
    pub fn long_description(&self) -> String {
        let date = self
            .parsed_date()
            .map(|d| d.format("%A, %B %-d, %Y").to_string())
            .unwrap_or_else(|| self.date.clone());
        format!("{} at {}", date, TimeSlot::label_for(&self.time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_slots_are_booked() {
        let booked: Vec<_> = TimeSlot::catalog()
            .iter()
            .filter(|slot| !slot.available)
            .map(|slot| slot.id.as_str())
            .collect();
        assert_eq!(booked, vec!["14:00", "20:00"]);
    }

    #[test]
    fn descriptions_use_slot_labels() {
        let selection = DateTimeSelection::new("2026-10-16", "16:00");
        assert_eq!(selection.short_description(), "Fri, Oct 16 at 4:00 PM");
        assert_eq!(
            selection.long_description(),
            "Friday, October 16, 2026 at 4:00 PM"
        );
    }

    #[test]
    fn unknown_slot_falls_back_to_id() {
        assert_eq!(TimeSlot::label_for("07:30"), "07:30");
        assert_eq!(
            TimeSlot::find("14:00").unwrap().display_label(),
            "2:00 PM (Booked)"
        );
    }
}
