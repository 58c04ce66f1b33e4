use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::vehicle::models_for;
use crate::domain::{Vehicle, VehicleKind};
use crate::errors::FieldErrors;

pub const VEHICLE_NUMBER_MAX_LEN: usize = 13;
pub const VEHICLE_NUMBER_EXAMPLE: &str = "MH 12 AB 1234";

pub const FIELD_VEHICLE_TYPE: &str = "vehicleType";
pub const FIELD_BRAND: &str = "brand";
pub const FIELD_MODEL: &str = "model";
pub const FIELD_VEHICLE_NUMBER: &str = "vehicleNumber";

/// Matched against the formatter's `XX 00 XX 0000` grouping, so every group
/// has to land in its own slot.
static PLATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2} \d{2} [A-Z]{2} \d{4}$").expect("plate pattern compiles")
});

fn strip_spaces(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Groups a plate as `XX 00 XX 0000` while it is typed.
pub fn format_vehicle_number(raw: &str) -> String {
    let cleaned: Vec<char> = strip_spaces(raw).to_uppercase().chars().collect();
    let mut formatted = String::with_capacity(VEHICLE_NUMBER_MAX_LEN);
    for (index, ch) in cleaned.iter().enumerate() {
        if matches!(index, 2 | 4 | 6) {
            formatted.push(' ');
        }
        formatted.push(*ch);
        if formatted.chars().count() >= VEHICLE_NUMBER_MAX_LEN {
            break;
        }
    }
    formatted
}

/// Checks the plate as the formatter groups it. Input the formatter would
/// truncate is rejected.
pub fn is_valid_vehicle_number(raw: &str) -> bool {
    let formatted = format_vehicle_number(raw);
    let typed = strip_spaces(raw).chars().count();
    typed == strip_spaces(&formatted).chars().count() && PLATE_PATTERN.is_match(&formatted)
}

/// Vehicle form entries before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub vehicle_type: Option<VehicleKind>,
    pub brand: String,
    pub model: String,
    pub vehicle_number: String,
    pub save_to_vehicles: bool,
    errors: FieldErrors,
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self {
            vehicle_type: None,
            brand: String::new(),
            model: String::new(),
            vehicle_number: String::new(),
            save_to_vehicles: true,
            errors: FieldErrors::new(),
        }
    }
}

impl VehicleDraft {
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_vehicle_type(&mut self, kind: VehicleKind) {
        self.vehicle_type = Some(kind);
        self.errors.clear_field(FIELD_VEHICLE_TYPE);
    }

    /// A new brand invalidates the chosen model.
    pub fn set_brand(&mut self, brand: &str) {
        if self.brand != brand {
            self.model.clear();
        }
        self.brand = brand.to_string();
        self.errors.clear_field(FIELD_BRAND);
    }

    pub fn set_model(&mut self, model: &str) {
        self.model = model.to_string();
        self.errors.clear_field(FIELD_MODEL);
    }

    pub fn set_vehicle_number(&mut self, raw: &str) {
        self.vehicle_number = format_vehicle_number(raw);
        self.errors.clear_field(FIELD_VEHICLE_NUMBER);
    }

    pub fn set_save_to_vehicles(&mut self, save: bool) {
        self.save_to_vehicles = save;
    }

    pub fn available_models(&self) -> &'static [&'static str] {
        models_for(&self.brand)
    }

    /// Validates and records the outcome; errors stay on the draft for display.
    pub fn submit(&mut self) -> Option<Vehicle> {
        match validate_vehicle(self) {
            Ok(vehicle) => {
                self.errors = FieldErrors::new();
                Some(vehicle)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

pub fn validate_vehicle(draft: &VehicleDraft) -> Result<Vehicle, FieldErrors> {
    let mut errors = FieldErrors::new();

    if draft.vehicle_type.is_none() {
        errors.insert(FIELD_VEHICLE_TYPE, "Please select vehicle type");
    }
    if draft.brand.trim().is_empty() {
        errors.insert(FIELD_BRAND, "Please enter brand name");
    }
    if draft.model.trim().is_empty() {
        errors.insert(FIELD_MODEL, "Please enter model");
    }
    if draft.vehicle_number.trim().is_empty() {
        errors.insert(FIELD_VEHICLE_NUMBER, "Please enter vehicle number");
    } else if !is_valid_vehicle_number(&draft.vehicle_number) {
        errors.insert(
            FIELD_VEHICLE_NUMBER,
            format!("Please enter valid vehicle number (e.g., {VEHICLE_NUMBER_EXAMPLE})"),
        );
    }

    match draft.vehicle_type {
        Some(vehicle_type) if errors.is_empty() => Ok(Vehicle {
            vehicle_type,
            brand: draft.brand.trim().to_string(),
            model: draft.model.trim().to_string(),
            vehicle_number: draft.vehicle_number.trim().to_string(),
            save_to_vehicles: draft.save_to_vehicles,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> VehicleDraft {
        let mut draft = VehicleDraft::default();
        draft.set_vehicle_type(VehicleKind::Car);
        draft.set_brand("Hyundai");
        draft.set_model("Creta");
        draft.set_vehicle_number("mh12ab1234");
        draft
    }

    #[test]
    fn formats_plate_while_typing() {
        assert_eq!(format_vehicle_number("mh12ab1234"), "MH 12 AB 1234");
        assert_eq!(format_vehicle_number("mh 1"), "MH 1");
        assert_eq!(format_vehicle_number("ka01"), "KA 01");
        assert_eq!(format_vehicle_number("MH12AB123456789"), "MH 12 AB 1234");
    }

    #[test]
    fn plate_pattern_ignores_case_and_spaces() {
        assert!(is_valid_vehicle_number("MH 12 AB 1234"));
        assert!(is_valid_vehicle_number("dl01ca9876"));
        assert!(is_valid_vehicle_number("  ka 01mj 2022 "));
        assert!(!is_valid_vehicle_number("MH12A123"));
        assert!(!is_valid_vehicle_number("123AB1234"));
    }

    #[test]
    fn plate_groups_follow_formatter_slots() {
        assert!(!is_valid_vehicle_number("MH12A1234"));
        assert_eq!(format_vehicle_number("MH12A1234"), "MH 12 A1 234");
        assert!(!is_valid_vehicle_number("dl1c9876"));
        assert!(!is_valid_vehicle_number("MH12AB12345"));
    }

    #[test]
    fn valid_draft_produces_vehicle() {
        let vehicle = validate_vehicle(&filled()).unwrap();
        assert_eq!(vehicle.vehicle_number, "MH 12 AB 1234");
        assert!(vehicle.save_to_vehicles);
    }

    #[test]
    fn malformed_plate_reports_example() {
        let mut draft = filled();
        draft.set_vehicle_number("MH12A1234");
        let errors = validate_vehicle(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FIELD_VEHICLE_NUMBER),
            Some("Please enter valid vehicle number (e.g., MH 12 AB 1234)")
        );
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let mut draft = VehicleDraft::default();
        assert!(draft.submit().is_none());
        let errors = draft.errors();
        assert_eq!(errors.get(FIELD_VEHICLE_TYPE), Some("Please select vehicle type"));
        assert_eq!(errors.get(FIELD_BRAND), Some("Please enter brand name"));
        assert_eq!(errors.get(FIELD_MODEL), Some("Please enter model"));
        assert_eq!(
            errors.get(FIELD_VEHICLE_NUMBER),
            Some("Please enter vehicle number")
        );

        draft.set_brand("Tata");
        assert!(!draft.errors().contains(FIELD_BRAND));
        assert!(draft.errors().contains(FIELD_MODEL));
    }

    #[test]
    fn changing_brand_resets_model() {
        let mut draft = filled();
        draft.set_brand("Hyundai");
        assert_eq!(draft.model, "Creta");
        draft.set_brand("Toyota");
        assert!(draft.model.is_empty());
        assert!(draft.available_models().contains(&"Innova"));
    }
}
