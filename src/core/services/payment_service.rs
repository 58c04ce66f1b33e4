use std::thread;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::domain::{PaymentMethod, PaymentReceipt};

use super::ServiceResult;

pub trait PaymentGateway {
    fn confirm_payment(&self, method: PaymentMethod, amount: i64) -> ServiceResult<PaymentReceipt>;
}

/// Booking reference such as `PQ3F9A1C07`.
pub fn booking_reference() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("PQ{}", hex[..8].to_ascii_uppercase())
}

#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl PaymentGateway for SimulatedPaymentGateway {
    fn confirm_payment(&self, method: PaymentMethod, amount: i64) -> ServiceResult<PaymentReceipt> {
        thread::sleep(self.delay);
        let receipt = PaymentReceipt {
            reference: booking_reference(),
            method,
            amount,
        };
        info!(
            reference = %receipt.reference,
            method = method.as_str(),
            amount,
            "payment confirmed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_has_prefix_and_eight_hex_digits() {
        let reference = booking_reference();
        assert_eq!(reference.len(), 10);
        assert!(reference.starts_with("PQ"));
        assert!(reference[2..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn simulated_payment_echoes_method_and_amount() {
        let gateway = SimulatedPaymentGateway::new(Duration::ZERO);
        let receipt = gateway.confirm_payment(PaymentMethod::Card, 135).unwrap();
        assert_eq!(receipt.method, PaymentMethod::Card);
        assert_eq!(receipt.amount, 135);
    }
}
