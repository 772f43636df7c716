//! Client-side form validation.
//!
//! Every check here runs before a request is sent; the error messages are
//! the exact texts shown to the user.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::{CreateBountyRequest, PaymentMethod};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    RequiredFieldMissing(String),
    #[error("Reward must be a positive number: {0}")]
    InvalidReward(String),
    #[error("Number of submissions needed must be a positive whole number: {0}")]
    InvalidSubmissionCount(String),
    #[error("Amounts may have at most two decimal places: {0}")]
    InvalidAmountFormat(String),
    #[error("Please enter a valid withdrawal amount")]
    InvalidWithdrawalAmount,
    #[error("You cannot withdraw more than your available earnings")]
    InsufficientEarnings,
    #[error("Please enter your PayPal email")]
    MissingPaypalEmail,
    #[error("Please enter your bank account details")]
    MissingBankDetails,
    #[error("Please upload an image")]
    MissingImage,
    #[error("Please provide a location or make it optional")]
    MissingEventLocation,
    #[error("Please provide a date or make it optional")]
    MissingEventDate,
    #[error("Latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d{0,2})?$").expect("amount pattern is valid"))
}

/// Registration requires the password to be typed twice identically
pub fn validate_registration(password: &str, confirm_password: &str) -> ValidationResult<()> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing(field.to_string()));
    }
    Ok(())
}

/// Bounty creation form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BountyForm {
    pub title: String,
    pub description: String,
    pub plant_species: String,
    pub reward: String,
    pub num_submissions_needed: String,
    pub additional_notes: String,
}

impl BountyForm {
    /// Checks the required fields and parses reward and submission count
    pub fn into_request(self, username: &str) -> ValidationResult<CreateBountyRequest> {
        require("Title", &self.title)?;
        require("Description", &self.description)?;
        require("Plant species", &self.plant_species)?;

        let reward = Decimal::from_str(self.reward.trim())
            .ok()
            .filter(|reward| *reward > Decimal::ZERO)
            .ok_or_else(|| ValidationError::InvalidReward(self.reward.clone()))?;

        let num_submissions_needed = self
            .num_submissions_needed
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|count| *count > 0)
            .ok_or_else(|| ValidationError::InvalidSubmissionCount(self.num_submissions_needed.clone()))?;

        Ok(CreateBountyRequest {
            title: self.title,
            description: self.description,
            plant_species: self.plant_species,
            reward,
            num_submissions_needed,
            additional_notes: self.additional_notes,
            username: username.to_string(),
        })
    }
}

/// Parses a typed withdrawal amount: digits with at most two decimals, above zero
pub fn parse_withdraw_amount(input: &str) -> ValidationResult<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::InvalidWithdrawalAmount);
    }
    if !amount_pattern().is_match(input) {
        return Err(ValidationError::InvalidAmountFormat(input.to_string()));
    }
    let amount = Decimal::from_str(input.trim_end_matches('.'))
        .map_err(|_| ValidationError::InvalidWithdrawalAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidWithdrawalAmount);
    }
    Ok(amount)
}

/// Checks a withdrawal against the available earnings and payout details
pub fn validate_withdrawal(
    amount: Decimal,
    earnings: Decimal,
    method: PaymentMethod,
    payment_details: &str,
) -> ValidationResult<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidWithdrawalAmount);
    }
    if amount > earnings {
        return Err(ValidationError::InsufficientEarnings);
    }
    let missing_details = payment_details.trim().is_empty();
    match method {
        PaymentMethod::Paypal if missing_details => Err(ValidationError::MissingPaypalEmail),
        PaymentMethod::Bank if missing_details => Err(ValidationError::MissingBankDetails),
        _ => Ok(()),
    }
}

/// Fixed locations and times must be filled in
pub fn validate_event(
    location: &str,
    date: &str,
    is_location_fixed: bool,
    is_time_fixed: bool,
) -> ValidationResult<()> {
    if location.trim().is_empty() && is_location_fixed {
        return Err(ValidationError::MissingEventLocation);
    }
    if date.trim().is_empty() && is_time_fixed {
        return Err(ValidationError::MissingEventDate);
    }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> ValidationResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::InvalidLongitude(longitude));
    }
    Ok(())
}
