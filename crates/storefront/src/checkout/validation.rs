//! Checkout form validation.
//!
//! Pure field checks, applied in a fixed order with only the first
//! violation reported. Runs server-side on every submission - the browser
//! form is a convenience, not a trust boundary.

use chrono::{NaiveDate, Utc};
use esales_mart_core::Email;
use serde::Deserialize;

/// Raw checkout form fields as posted by the browser.
///
/// Everything arrives as text; parsing and constraint checks happen in
/// [`validate`]. Card number, expiry date, and CVV are checked and then
/// discarded - they are never stored or logged.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// First failing checkout rule.
///
/// Display strings are the exact messages surfaced to the customer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Enter a valid 10 digit phone number")]
    InvalidPhone,
    #[error("Quantity is not available")]
    QuantityUnavailable,
    #[error("Enter a valid card 16 digit number")]
    InvalidCardNumber,
    #[error("Enter a valid 3 digit CVV number")]
    InvalidCvv,
    #[error("Enter a valid expiry date")]
    InvalidExpiryDate,
}

/// A checkout submission that has passed every rule.
///
/// Holds only what the rest of the order flow needs - payment fields are
/// validated but deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub quantity: u32,
}

/// Validate a checkout form against the product's available stock.
///
/// Rules run in a fixed order and only the first violation is returned:
/// required fields, email shape, phone digits, quantity vs. stock, card
/// digits, CVV digits, expiry freshness.
///
/// # Errors
///
/// Returns the first [`ValidationError`] the form violates.
pub fn validate(form: &CheckoutForm, stock: u32) -> Result<ValidatedOrder, ValidationError> {
    validate_at(form, stock, Utc::now().date_naive())
}

/// [`validate`] with an explicit "today" for the expiry-date rule.
pub fn validate_at(
    form: &CheckoutForm,
    stock: u32,
    today: NaiveDate,
) -> Result<ValidatedOrder, ValidationError> {
    let required = [
        &form.name,
        &form.email,
        &form.phone,
        &form.address,
        &form.city,
        &form.state,
        &form.zip,
        &form.card_number,
        &form.expiry_date,
        &form.cvv,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ValidationError::MissingFields);
    }

    let email = Email::parse(&form.email.trim().to_lowercase())
        .map_err(|_| ValidationError::InvalidEmail)?;

    if !is_exact_digits(form.phone.trim(), 10) {
        return Err(ValidationError::InvalidPhone);
    }

    // Checked once at submission time; stock may change between requests
    if form.quantity == 0 || form.quantity > stock {
        return Err(ValidationError::QuantityUnavailable);
    }

    if !is_exact_digits(form.card_number.trim(), 16) {
        return Err(ValidationError::InvalidCardNumber);
    }

    if !is_exact_digits(form.cvv.trim(), 3) {
        return Err(ValidationError::InvalidCvv);
    }

    let expiry = NaiveDate::parse_from_str(form.expiry_date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidExpiryDate)?;
    if expiry <= today {
        return Err(ValidationError::InvalidExpiryDate);
    }

    Ok(ValidatedOrder {
        name: form.name.trim().to_string(),
        email,
        phone: form.phone.trim().to_string(),
        address: form.address.trim().to_string(),
        city: form.city.trim().to_string(),
        state: form.state.trim().to_string(),
        zip: form.zip.trim().to_string(),
        quantity: form.quantity,
    })
}

/// True if `s` is exactly `len` ASCII digits.
fn is_exact_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5551234567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip: "12345".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry_date: "2031-01-01".to_string(),
            cvv: "123".to_string(),
            quantity: 1,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()
    }

    #[test]
    fn test_valid_form_passes() {
        let order = validate_at(&valid_form(), 10, today()).unwrap();
        assert_eq!(order.name, "Ada Lovelace");
        assert_eq!(order.email.as_str(), "ada@example.com");
        assert_eq!(order.quantity, 1);
    }

    #[test]
    fn test_any_missing_field_fails_first() {
        let fields: [fn(&mut CheckoutForm) -> &mut String; 10] = [
            |f| &mut f.name,
            |f| &mut f.email,
            |f| &mut f.phone,
            |f| &mut f.address,
            |f| &mut f.city,
            |f| &mut f.state,
            |f| &mut f.zip,
            |f| &mut f.card_number,
            |f| &mut f.expiry_date,
            |f| &mut f.cvv,
        ];
        for clear in fields {
            let mut form = valid_form();
            clear(&mut form).clear();
            assert_eq!(
                validate_at(&form, 10, today()),
                Err(ValidationError::MissingFields)
            );
        }
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let mut form = valid_form();
        form.city = "   ".to_string();
        assert_eq!(
            validate_at(&form, 10, today()),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_invalid_email_shapes() {
        for bad in ["not-an-email", "a@b", "a@@b.com", "a b@c.com", "@c.com"] {
            let mut form = valid_form();
            form.email = bad.to_string();
            assert_eq!(
                validate_at(&form, 10, today()),
                Err(ValidationError::InvalidEmail),
                "should reject {bad}"
            );
        }
    }

    #[test]
    fn test_email_is_normalized() {
        let mut form = valid_form();
        form.email = "  Ada@Example.COM ".to_string();
        let order = validate_at(&form, 10, today()).unwrap();
        assert_eq!(order.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_phone_must_be_ten_digits() {
        for bad in ["123456789", "12345678901", "555123456a", "555-123-456"] {
            let mut form = valid_form();
            form.phone = bad.to_string();
            assert_eq!(
                validate_at(&form, 10, today()),
                Err(ValidationError::InvalidPhone),
                "should reject {bad}"
            );
        }
    }

    #[test]
    fn test_quantity_exceeding_stock_fails() {
        let mut form = valid_form();
        form.quantity = 4;
        assert_eq!(
            validate_at(&form, 3, today()),
            Err(ValidationError::QuantityUnavailable)
        );
    }

    #[test]
    fn test_quantity_equal_to_stock_passes() {
        let mut form = valid_form();
        form.quantity = 3;
        assert!(validate_at(&form, 3, today()).is_ok());
    }

    #[test]
    fn test_zero_quantity_fails() {
        let mut form = valid_form();
        form.quantity = 0;
        assert_eq!(
            validate_at(&form, 3, today()),
            Err(ValidationError::QuantityUnavailable)
        );
    }

    #[test]
    fn test_quantity_check_runs_before_card_checks() {
        // Rule order is fixed: a bad card number is not reported while the
        // quantity rule is already violated
        let mut form = valid_form();
        form.quantity = 99;
        form.card_number = "1234".to_string();
        assert_eq!(
            validate_at(&form, 3, today()),
            Err(ValidationError::QuantityUnavailable)
        );
    }

    #[test]
    fn test_card_number_must_be_sixteen_digits() {
        for bad in ["4111", "41111111111111111", "4111-1111-1111-1111"] {
            let mut form = valid_form();
            form.card_number = bad.to_string();
            assert_eq!(
                validate_at(&form, 10, today()),
                Err(ValidationError::InvalidCardNumber),
                "should reject {bad}"
            );
        }
    }

    #[test]
    fn test_cvv_must_be_three_digits() {
        for bad in ["12", "1234", "12a"] {
            let mut form = valid_form();
            form.cvv = bad.to_string();
            assert_eq!(
                validate_at(&form, 10, today()),
                Err(ValidationError::InvalidCvv),
                "should reject {bad}"
            );
        }
    }

    #[test]
    fn test_expiry_must_be_strictly_in_the_future() {
        let mut form = valid_form();
        form.expiry_date = "2026-08-27".to_string();
        assert_eq!(
            validate_at(&form, 10, today()),
            Err(ValidationError::InvalidExpiryDate)
        );

        form.expiry_date = "2020-01-01".to_string();
        assert_eq!(
            validate_at(&form, 10, today()),
            Err(ValidationError::InvalidExpiryDate)
        );

        form.expiry_date = "2026-08-28".to_string();
        assert!(validate_at(&form, 10, today()).is_ok());
    }

    #[test]
    fn test_unparseable_expiry_fails() {
        let mut form = valid_form();
        form.expiry_date = "08/31".to_string();
        assert_eq!(
            validate_at(&form, 10, today()),
            Err(ValidationError::InvalidExpiryDate)
        );
    }

    #[test]
    fn test_error_messages_match_ui_copy() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all fields"
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Invalid email address"
        );
        assert_eq!(
            ValidationError::QuantityUnavailable.to_string(),
            "Quantity is not available"
        );
        assert_eq!(
            ValidationError::InvalidCardNumber.to_string(),
            "Enter a valid card 16 digit number"
        );
        assert_eq!(
            ValidationError::InvalidCvv.to_string(),
            "Enter a valid 3 digit CVV number"
        );
    }
}
