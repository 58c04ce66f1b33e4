use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Car,
    Suv,
    Bike,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Car, VehicleKind::Suv, VehicleKind::Bike];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Suv => "suv",
            VehicleKind::Bike => "bike",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Suv => "SUV",
            VehicleKind::Bike => "Bike",
        }
    }

    /// Accepts either the id (`suv`) or the display label (`SUV`).
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.as_str().eq_ignore_ascii_case(needle) || kind.label().eq_ignore_ascii_case(needle)
        })
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated vehicle handed to the wizard controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vehicle_type: VehicleKind,
    pub brand: String,
    pub model: String,
    pub vehicle_number: String,
    pub save_to_vehicles: bool,
}

impl Displayable for Vehicle {
    fn display_label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

const BRAND_MODELS: &[(&str, &[&str])] = &[
    ("Honda", &["City", "Civic", "Amaze", "WR-V", "Jazz"]),
    (
        "Maruti Suzuki",
        &["Alto", "Swift", "Baleno", "Dzire", "Wagon R", "Vitara Brezza"],
    ),
    ("Hyundai", &["i20", "Creta", "Verna", "Grand i10", "Elite i20"]),
    ("Tata", &["Nexon", "Harrier", "Tiago", "Tigor", "Safari"]),
    ("Mahindra", &["XUV500", "Scorpio", "Bolero", "XUV300", "Thar"]),
    ("Toyota", &["Innova", "Fortuner", "Camry", "Corolla", "Etios"]),
    ("BMW", &["3 Series", "5 Series", "X1", "X3", "X5"]),
    ("Audi", &["A4", "A6", "Q3", "Q5", "Q7"]),
    ("Mercedes", &["C-Class", "E-Class", "GLA", "GLC", "S-Class"]),
];

/// Brands offered in the brand picker, in display order.
pub fn brands() -> Vec<&'static str> {
    BRAND_MODELS.iter().map(|(brand, _)| *brand).collect()
}

/// Models for a brand; unknown brands have none.
pub fn models_for(brand: &str) -> &'static [&'static str] {
    BRAND_MODELS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(brand.trim()))
        .map(|(_, models)| *models)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_id_or_label() {
        assert_eq!(VehicleKind::parse("SUV"), Some(VehicleKind::Suv));
        assert_eq!(VehicleKind::parse("bike"), Some(VehicleKind::Bike));
        assert_eq!(VehicleKind::parse("truck"), None);
    }

    #[test]
    fn models_follow_brand() {
        assert_eq!(brands().len(), 9);
        assert!(models_for("Hyundai").contains(&"Creta"));
        assert!(models_for("maruti suzuki").contains(&"Swift"));
        assert!(models_for("Tesla").is_empty());
    }

    #[test]
    fn vehicle_json_uses_camel_case() {
        let vehicle = Vehicle {
            vehicle_type: VehicleKind::Suv,
            brand: "Hyundai".into(),
            model: "Creta".into(),
            vehicle_number: "MH 12 AB 1234".into(),
            save_to_vehicles: true,
        };
        let json = serde_json::to_value(&vehicle).unwrap();
        assert_eq!(json["vehicleType"], "suv");
        assert_eq!(json["vehicleNumber"], "MH 12 AB 1234");
        assert_eq!(json["saveToVehicles"], true);
        assert_eq!(serde_json::from_value::<Vehicle>(json).unwrap(), vehicle);
    }
}
