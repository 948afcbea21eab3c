//! Write-time field checks shared by every store.
//!
//! Both stores call [`Validate::validate`] before touching any state, so a rejected write
//! never leaves a partial change behind.

use rust_decimal::Decimal;
use thiserror::Error;

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const MEMO_MAX_LEN: usize = 255;
pub const OFX_ID_MAX_LEN: usize = 255;
pub const OFX_TYPE_MAX_LEN: usize = 50;
pub const KEYWORD_MAX_LEN: usize = 100;
pub const SORT_CODE_MAX_LEN: usize = 20;
pub const ACCOUNT_NUMBER_MAX_LEN: usize = 50;

/// Amounts are stored as `NUMERIC(10, 2)`.
pub const AMOUNT_SCALE: u32 = 2;
const AMOUNT_INTEGER_DIGITS: u32 = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("{field} is {actual} characters long, the maximum is {max}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("{field} {value} has more than 2 decimal places")]
    TooPrecise { field: &'static str, value: Decimal },
    #[error("{field} {value} has more than 8 integer digits")]
    OutOfRange { field: &'static str, value: Decimal },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn check_name(value: &str) -> Result<(), ValidationError> {
    check_not_blank("name", value)?;
    check_length("name", value, NAME_MAX_LEN)
}

pub(crate) fn check_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Lengths are counted in characters, not bytes, to match `VARCHAR(n)`.
pub(crate) fn check_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

pub(crate) fn check_optional_length(
    field: &'static str,
    value: &Option<String>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_length(field, v, max),
        None => Ok(()),
    }
}

pub(crate) fn check_not_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn check_amount(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    // trailing zeros are not precision: 19.990 fits in two places
    if value.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::TooPrecise { field, value });
    }
    if value.abs() >= Decimal::from(10_i64.pow(AMOUNT_INTEGER_DIGITS)) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(())
}

/// Brings a checked amount to the stored scale, e.g. `19.9` becomes `19.90`.
pub(crate) fn normalize_amount(mut value: Decimal) -> Decimal {
    value.rescale(AMOUNT_SCALE);
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn name_limits() {
        assert!(check_name("Checking").is_ok());
        assert!(check_name(&"a".repeat(NAME_MAX_LEN)).is_ok());
        assert_eq!(
            check_name(&"a".repeat(NAME_MAX_LEN + 1)),
            Err(ValidationError::TooLong {
                field: "name",
                max: NAME_MAX_LEN,
                actual: NAME_MAX_LEN + 1
            })
        );
        assert_eq!(
            check_name("   "),
            Err(ValidationError::Blank { field: "name" })
        );
    }

    #[test]
    fn length_counts_characters() {
        let accented = "é".repeat(DESCRIPTION_MAX_LEN);
        assert!(accented.len() > DESCRIPTION_MAX_LEN);
        assert!(check_length("description", &accented, DESCRIPTION_MAX_LEN).is_ok());
    }

    #[test]
    fn amount_precision() {
        assert!(check_amount("amount", Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(check_amount("amount", Decimal::from_str("19.990").unwrap()).is_ok());
        assert!(check_amount("amount", Decimal::from_str("-0.01").unwrap()).is_ok());
        assert!(matches!(
            check_amount("amount", Decimal::from_str("19.999").unwrap()),
            Err(ValidationError::TooPrecise { .. })
        ));
    }

    #[test]
    fn amount_range() {
        assert!(check_amount("amount", Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(check_amount("amount", Decimal::from_str("-99999999.99").unwrap()).is_ok());
        assert!(matches!(
            check_amount("amount", Decimal::from_str("100000000").unwrap()),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn negative_counts() {
        assert!(check_not_negative("limit", 0).is_ok());
        assert_eq!(
            check_not_negative("limit", -1),
            Err(ValidationError::Negative {
                field: "limit",
                value: -1
            })
        );
    }

    #[test]
    fn normalize_pads_to_two_places() {
        let amount = normalize_amount(Decimal::from_str("19.9").unwrap());
        assert_eq!(amount.to_string(), "19.90");
        let amount = normalize_amount(Decimal::from_str("19.990").unwrap());
        assert_eq!(amount.to_string(), "19.99");
    }
}
