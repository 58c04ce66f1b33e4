use chrono::NaiveDate;

use crate::cli::io;
use crate::cli::screens::{
    back, back_item, escape_outcome, ScreenContext, ScreenOutcome, BACK_KEY, CONTINUE_KEY,
};
use crate::cli::ui::menu_renderer::{MenuRenderer, MenuUI, MenuUIItem};
use crate::core::calendar::ISO_DATE;
use crate::core::{AppState, CalendarCell, MonthCursor, SchedulePicker, WizardMessage};
use crate::domain::{Displayable, TimeSlot};
use crate::errors::CliError;

const PICK_DATE_KEY: &str = "pick-date";
const PICK_TIME_KEY: &str = "pick-time";
const PREVIOUS_KEY: &str = "previous-month";
const NEXT_KEY: &str = "next-month";
const CELL_WIDTH: usize = 5;
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn cell_text(cell: &CalendarCell) -> String {
    let text = if !cell.is_current_month {
        String::new()
    } else if cell.is_selected {
        format!("[{:02}]", cell.day)
    } else if cell.is_today {
        format!("({:02})", cell.day)
    } else if cell.is_past {
        "--".to_string()
    } else {
        format!("{:02}", cell.day)
    };
    format!("{text:^CELL_WIDTH$}")
}

/// Month grid as text: title, weekday header, six week rows and a legend.
pub fn render_calendar(month: MonthCursor, cells: &[CalendarCell]) -> Vec<String> {
    let mut lines = vec![month.title()];
    lines.push(
        WEEKDAYS
            .iter()
            .map(|day| format!("{day:^CELL_WIDTH$}"))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    lines.extend(cells.chunks(WEEKDAYS.len()).map(|week| {
        week.iter()
            .map(cell_text)
            .collect::<String>()
            .trim_end()
            .to_string()
    }));
    lines.push("[dd] selected  (dd) today  -- unavailable".to_string());
    lines
}

fn selection_line(picker: &SchedulePicker) -> String {
    match picker.selection() {
        Some(selection) => format!("Scheduled for {}", selection.long_description()),
        None if picker.has_date() => match NaiveDate::parse_from_str(picker.selected_date(), ISO_DATE) {
            Ok(date) => format!("Date: {} (pick a time)", date.format("%A, %B %-d, %Y")),
            Err(_) => "Pick a time".to_string(),
        },
        None => "Pick a date and a time slot".to_string(),
    }
}

fn menu_for(picker: &SchedulePicker) -> MenuUI {
    let mut context = render_calendar(picker.month(), &picker.calendar());
    context.push(String::new());
    context.push(selection_line(picker));

    let mut items = vec![
        MenuUIItem::new(PICK_DATE_KEY, "Pick a date", "Choose a day from this month"),
        MenuUIItem::new(PICK_TIME_KEY, "Pick a time", "Choose an available slot"),
        MenuUIItem::new(PREVIOUS_KEY, "‹ Previous month", ""),
        MenuUIItem::new(NEXT_KEY, "Next month ›", ""),
    ];
    if picker.can_continue() {
        items.push(MenuUIItem::new(
            CONTINUE_KEY,
            "Continue to Summary",
            "Review your booking",
        ));
    }
    items.push(back_item());
    MenuUI::new("Choose Date & Time", items).with_context(context.join("\n"))
}

fn pick_day(picker: &mut SchedulePicker) -> Result<(), CliError> {
    let days = picker.selectable_days();
    if days.is_empty() {
        io::print_warning("No available dates this month");
        return Ok(());
    }
    let items = days
        .iter()
        .map(|cell| {
            let label = NaiveDate::parse_from_str(&cell.date, ISO_DATE)
                .map(|date| date.format("%a %-d %b").to_string())
                .unwrap_or_else(|_| cell.date.clone());
            let note = if cell.is_today { "Today" } else { "" };
            MenuUIItem::new(cell.date.clone(), label, note)
        })
        .collect();
    let mut menu = MenuUI::new(picker.month().title(), items);
    if picker.has_date() {
        menu = menu.with_initial_key(picker.selected_date());
    }

    if let Some(key) = MenuRenderer::new().show(&menu)? {
        if let Some(cell) = days.iter().find(|cell| cell.date == key) {
            picker.select_cell(cell);
        }
    }
    Ok(())
}

fn pick_time(picker: &mut SchedulePicker) -> Result<(), CliError> {
    if !picker.has_date() {
        io::print_warning("Please select a date first");
        return Ok(());
    }
    let items = TimeSlot::catalog()
        .iter()
        .map(|slot| {
            let note = if slot.available { "Available" } else { "Unavailable" };
            MenuUIItem::new(slot.id.clone(), slot.display_label(), note)
        })
        .collect();
    let mut menu = MenuUI::new("Available Time Slots", items);
    if !picker.selected_time().is_empty() {
        menu = menu.with_initial_key(picker.selected_time());
    }

    if let Some(key) = MenuRenderer::new().show(&menu)? {
        if !picker.select_time(&key) {
            io::print_warning(format!(
                "{} is already booked",
                TimeSlot::label_for(&key)
            ));
        }
    }
    Ok(())
}

pub(super) fn run(state: &AppState, ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let today = ctx.clock.today();
    let mut picker = match state.selected_date_time.as_ref() {
        Some(previous) => SchedulePicker::resume(today, previous),
        None => SchedulePicker::new(today),
    };

    loop {
        match MenuRenderer::new().show(&menu_for(&picker))?.as_deref() {
            Some(PICK_DATE_KEY) => pick_day(&mut picker)?,
            Some(PICK_TIME_KEY) => pick_time(&mut picker)?,
            Some(PREVIOUS_KEY) => picker.previous_month(),
            Some(NEXT_KEY) => picker.next_month(),
            Some(CONTINUE_KEY) => {
                if let Some(selection) = picker.selection() {
                    return Ok(ScreenOutcome::Message(WizardMessage::ScheduleSelected(
                        selection,
                    )));
                }
            }
            Some(BACK_KEY) => return Ok(back()),
            Some(_) => {}
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

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn calendar_marks_today_past_and_selection() {
        let mut picker = SchedulePicker::new(today());
        picker.select_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        let lines = render_calendar(picker.month(), &picker.calendar());

        assert_eq!(lines[0], "October 2026");
        assert!(lines[1].starts_with(" Sun "));
        assert_eq!(lines.len(), 2 + 6 + 1);
        // Oct 1 2026 is a Thursday, so the first week has four blank cells.
        assert!(lines[2].starts_with(&" ".repeat(CELL_WIDTH * 4)));
        assert!(lines[2].contains("--"));
        let body = lines[2..8].join("\n");
        assert!(body.contains("(16)"));
        assert!(body.contains("[20]"));
    }

    #[test]
    fn selection_line_tracks_progress() {
        let mut picker = SchedulePicker::new(today());
        assert_eq!(selection_line(&picker), "Pick a date and a time slot");

        picker.select_date(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(
            selection_line(&picker),
            "Date: Saturday, October 17, 2026 (pick a time)"
        );

        picker.select_time("16:00");
        assert_eq!(
            selection_line(&picker),
            "Scheduled for Saturday, October 17, 2026 at 4:00 PM"
        );
    }

    #[test]
    fn continue_appears_once_both_parts_are_set() {
        let mut picker = SchedulePicker::new(today());
        let has_continue =
            |picker: &SchedulePicker| menu_for(picker).items.iter().any(|i| i.key == CONTINUE_KEY);
        assert!(!has_continue(&picker));
        picker.select_date(today());
        assert!(!picker.select_time("14:00"));
        assert!(!has_continue(&picker));
        picker.select_time("10:00");
        assert!(has_continue(&picker));
    }
}
