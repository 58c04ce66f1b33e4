use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::{CatalogEntry, Displayable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Current,
    Saved,
    Custom,
}

/// Service address for the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        kind: LocationKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            kind,
        }
    }

    /// Location reported by the simulated geolocation lookup.
    pub fn detected() -> Self {
        Self::new(
            "current",
            "Current Location",
            "Detected: Powai, Mumbai, Maharashtra",
            LocationKind::Current,
        )
    }

    /// Builds a custom location from free text; blank input yields `None`.
    pub fn custom(address: &str) -> Option<Self> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::new(
            "custom",
            "Custom Address",
            trimmed,
            LocationKind::Custom,
        ))
    }

    pub fn saved_addresses() -> &'static [Location] {
        &SAVED
    }
}

impl CatalogEntry for Location {
    fn id_str(&self) -> &str {
        &self.id
    }
}

impl Displayable for Location {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.address)
    }
}

static SAVED: Lazy<Vec<Location>> = Lazy::new(|| {
    vec![
        Location::new(
            "home",
            "Home",
            "123 Main Street, Andheri West, Mumbai",
            LocationKind::Saved,
        ),
        Location::new(
            "office",
            "Office",
            "456 Business Park, Bandra East, Mumbai",
            LocationKind::Saved,
        ),
    ]
});
