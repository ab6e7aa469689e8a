use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, Money};

/// Surcharge on bank transfers, as a percentage of the products subtotal.
pub const BANK_TRANSFER_FEE_PERCENT: u8 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    BankTransfer,
}

impl PaymentMethod {
    /// Fee added on top of the order; floored to whole units.
    pub fn fee(self, subtotal: Money) -> DomainResult<Money> {
        match self {
            PaymentMethod::Cash => Ok(Money::ZERO),
            PaymentMethod::BankTransfer => subtotal.percent_floor(BANK_TRANSFER_FEE_PERCENT),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Pago en Efectivo",
            PaymentMethod::BankTransfer => "Transferencia Bancaria",
        }
    }
}
