use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// One entry of the order-tracking timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStep {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub status: StepStatus,
}

impl OrderStep {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            timestamp: None,
            status: StepStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: StepStatus, timestamp: Option<&str>) -> Self {
        self.status = status;
        self.timestamp = timestamp.map(str::to_string);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Upi,
    Card,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Upi, PaymentMethod::Card, PaymentMethod::Wallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Wallet => "wallet",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::Wallet => "Wallet",
        }
    }

    pub fn is_popular(&self) -> bool {
        matches!(self, PaymentMethod::Upi)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Displayable for PaymentMethod {
    fn display_label(&self) -> String {
        if self.is_popular() {
            format!("{} (Popular)", self.name())
        } else {
            self.name().to_string()
        }
    }
}

/// Confirmation issued once payment succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount: i64,
}

/// Technician assigned to every booking in the simulated flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    pub name: String,
    pub phone: String,
    pub rating: f32,
    pub vehicle_number: String,
}

impl Default for Technician {
    fn default() -> Self {
        Self {
            name: "Prabu Dhayalan".into(),
            phone: "+91 98989 89898".into(),
            rating: 4.8,
            vehicle_number: "MH 02 XX 1234".into(),
        }
    }
}
