/// Payment intent, cashout and withdrawal shapes
use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::common::{open_string_enum, MESSAGE_SUCCESS};

/// Where withdrawn earnings are paid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Stripe,
    Paypal,
    Bank,
}

impl PaymentMethod {
    /// Manual methods need payout details and are settled by the operators
    pub fn requires_details(&self) -> bool {
        !matches!(self, PaymentMethod::Stripe)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Stripe => write!(f, "stripe"),
            PaymentMethod::Paypal => write!(f, "paypal"),
            PaymentMethod::Bank => write!(f, "bank"),
        }
    }
}

/// Body of `create_payment_intent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentIntentRequest {
    pub username: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounty_id: Option<String>,
}

/// Body of `create_cashout_intent`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashoutIntentRequest {
    pub username: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Payment intent created by the backend on the processor's side
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentIntentResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "clientSecret")]
    pub client_secret: Option<String>,
}

impl PaymentIntentResponse {
    pub fn is_success(&self) -> bool {
        self.message.as_deref() == Some(MESSAGE_SUCCESS)
    }
}

/// Body of `process_withdrawal` for manual payout methods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalRequest {
    pub username: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_details: String,
}

open_string_enum! {
    /// Settlement state of a past withdrawal
    pub enum WithdrawalStatus {
        Completed => "completed",
        Pending => "pending",
        Failed => "failed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdrawal {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub date: String,
    pub status: WithdrawalStatus,
}

impl Withdrawal {
    /// Calendar date of the withdrawal, or the raw value when it is not a timestamp
    pub fn display_date(&self) -> String {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.date) {
            return parsed.date_naive().to_string();
        }
        if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S%.f") {
            return parsed.date().to_string();
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return parsed.to_string();
        }
        self.date.clone()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WithdrawHistoryResponse {
    #[serde(default)]
    pub history: Vec<Withdrawal>,
}

/// Formats a dollar amount rounded half away from zero to cents, e.g. `$12.50`
pub fn format_usd(amount: Decimal) -> String {
    format!(
        "${:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
