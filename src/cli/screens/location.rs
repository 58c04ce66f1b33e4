use tracing::warn;

use crate::cli::io;
use crate::cli::screens::{
    back, back_item, escape_outcome, ScreenContext, ScreenOutcome, BACK_KEY, CONTINUE_KEY,
};
use crate::cli::ui::menu_renderer::{MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{text_input, TextPromptResult};
use crate::cli::ui::spinner::ProgressSpinner;
use crate::core::{AppState, WizardMessage};
use crate::domain::{find_by_id, Displayable, Location};
use crate::errors::CliError;

const CURRENT_KEY: &str = "use-current";
const ADD_KEY: &str = "add-address";
const SAVED_PREFIX: &str = "saved:";

/// Address chosen on the location screen. Each choice replaces the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPicker {
    selected: Option<Location>,
}

impl LocationPicker {
    pub fn resume(previous: Option<&Location>) -> Self {
        Self {
            selected: previous.cloned(),
        }
    }

    pub fn select_saved(&mut self, id: &str) -> bool {
        match find_by_id(Location::saved_addresses(), id) {
            Some(location) => {
                self.selected = Some(location.clone());
                true
            }
            None => false,
        }
    }

    pub fn use_detected(&mut self, location: Location) {
        self.selected = Some(location);
    }

    /// Blank input leaves the current selection alone.
    pub fn add_custom(&mut self, address: &str) -> bool {
        match Location::custom(address) {
            Some(location) => {
                self.selected = Some(location);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_ref()
    }

    fn is_selected(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|location| location.id == id)
    }
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "● "
    } else {
        "○ "
    }
}

fn menu_for(picker: &LocationPicker) -> MenuUI {
    let mut items = vec![MenuUIItem::new(
        CURRENT_KEY,
        format!("{}Use Current Location", marker(picker.is_selected("current"))),
        "Detect where you are right now",
    )];
    items.extend(Location::saved_addresses().iter().map(|location| {
        MenuUIItem::new(
            format!("{SAVED_PREFIX}{}", location.id),
            format!("{}{}", marker(picker.is_selected(&location.id)), location.name),
            location.address.clone(),
        )
    }));
    let custom_label = match picker.selected() {
        Some(location) if location.id == "custom" => {
            format!("{}{}", marker(true), location.display_label())
        }
        _ => format!("{}Add New Address", marker(false)),
    };
    items.push(MenuUIItem::new(ADD_KEY, custom_label, "Type any address"));
    if picker.selected().is_some() {
        items.push(MenuUIItem::new(
            CONTINUE_KEY,
            "Continue to Date & Time",
            "Keep the highlighted address",
        ));
    }
    items.push(back_item());

    let context = match picker.selected() {
        Some(location) => format!("Selected: {}", location.display_label()),
        None => "Where should we wash your vehicle?".to_string(),
    };
    MenuUI::new("Select Location", items).with_context(context)
}

fn detect_location(ctx: &ScreenContext, picker: &mut LocationPicker) {
    let result = ProgressSpinner::run("Detecting location...", || {
        ctx.locations.current_location()
    });
    match result {
        Ok(location) => picker.use_detected(location),
        Err(err) => {
            warn!(error = %err, "location lookup failed");
            io::print_warning(err);
        }
    }
}

fn prompt_custom(picker: &mut LocationPicker) -> Result<(), CliError> {
    io::print_info("Enter your address (:back to cancel)");
    if let TextPromptResult::Value(address) = text_input("Address", None, None)? {
        if !picker.add_custom(&address) {
            io::print_warning("Address cannot be empty");
        }
    }
    Ok(())
}

pub(super) fn run(state: &AppState, ctx: &mut ScreenContext) -> Result<ScreenOutcome, CliError> {
    let mut picker = LocationPicker::resume(state.selected_location.as_ref());

    loop {
        match MenuRenderer::new().show(&menu_for(&picker))?.as_deref() {
            Some(CURRENT_KEY) => detect_location(ctx, &mut picker),
            Some(ADD_KEY) => prompt_custom(&mut picker)?,
            Some(CONTINUE_KEY) => {
                if let Some(location) = picker.selected().cloned() {
                    return Ok(ScreenOutcome::Message(WizardMessage::LocationSelected(
                        location,
                    )));
                }
            }
            Some(BACK_KEY) => return Ok(back()),
            Some(key) => {
                if let Some(id) = key.strip_prefix(SAVED_PREFIX) {
                    picker.select_saved(id);
                }
            }
            None => {
                if let Some(outcome) = escape_outcome()? {
                    return Ok(outcome);
                }
            }
        }
    }
}
