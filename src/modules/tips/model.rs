use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::address::{validate_address, validate_tx_hash};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tip {
    pub id: Uuid,
    pub sender: String,
    pub receiver: String,
    /// Decimal string; token amounts are never stored as floats.
    pub amount: String,
    pub currency: String,
    pub message: Option<String>,
    pub tx_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Amount must be a positive decimal string like "5" or "2.50".
pub fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    let positive = amount.parse::<f64>().map(|v| v.is_finite() && v > 0.0);
    let well_formed = !amount.is_empty()
        && amount.chars().all(|c| c.is_ascii_digit() || c == '.')
        && amount.chars().filter(|&c| c == '.').count() <= 1;

    if well_formed && positive == Ok(true) {
        Ok(())
    } else {
        Err(ValidationError::new("amount")
            .with_message("amount must be a positive decimal".into()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTipDto {
    #[validate(custom(function = validate_address))]
    pub sender: String,
    #[validate(custom(function = validate_address))]
    pub receiver: String,
    #[validate(custom(function = validate_amount))]
    pub amount: String,
    #[validate(length(min = 1, max = 10))]
    pub currency: Option<String>,
    #[validate(length(max = 500))]
    pub message: Option<String>,
    #[validate(custom(function = validate_tx_hash))]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, utoipa::IntoParams)]
pub struct TipFilterParams {
    pub receiver: Option<String>,
    pub sender: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_positive_decimals() {
        assert!(validate_amount("5").is_ok());
        assert!(validate_amount("2.50").is_ok());
        assert!(validate_amount("0.000001").is_ok());
    }

    #[test]
    fn test_amount_rejects_bad_input() {
        assert!(validate_amount("").is_err());
        assert!(validate_amount("0").is_err());
        assert!(validate_amount("-5").is_err());
        assert!(validate_amount("1e18").is_err());
        assert!(validate_amount("1.2.3").is_err());
        assert!(validate_amount("abc").is_err());
    }
}
