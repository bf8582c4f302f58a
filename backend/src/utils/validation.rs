use crate::error::AppError;
use marblecraft_shared::{
    CreateEnquiryRequest, MAX_ENQUIRY_QUANTITY, MAX_PRODUCT_IMAGES, MIN_ENQUIRY_QUANTITY,
    MIN_PRODUCT_IMAGES, PHONE_DIGIT_COUNT,
};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Strip formatting characters from a phone number, keeping digits only.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_phone(phone: &str) -> Result<String, AppError> {
    let digits = normalize_phone(phone);
    if digits.len() != PHONE_DIGIT_COUNT {
        return Err(AppError::Validation(
            "Phone must be exactly 10 digits".to_string(),
        ));
    }
    Ok(digits)
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if email.len() > 254 || !email_regex().is_match(email) {
        return Err(AppError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if !(MIN_ENQUIRY_QUANTITY..=MAX_ENQUIRY_QUANTITY).contains(&quantity) {
        return Err(AppError::Validation(
            "Quantity must be between 1 and 9999".to_string(),
        ));
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Validate a quote-request submission. All checks run before any
/// persistence attempt; the first failing field rejects the request with
/// its field-level message. Returns the normalized phone digits.
pub fn validate_enquiry(request: &CreateEnquiryRequest) -> Result<String, AppError> {
    require_non_empty(&request.first_name, "First name")?;
    require_non_empty(&request.last_name, "Last name")?;
    require_non_empty(&request.product_name, "Product name")?;
    validate_email(&request.email)?;
    let phone = validate_phone(&request.phone)?;
    validate_quantity(request.quantity)?;
    Ok(phone)
}

/// Write-time product invariants: 1..=7 images, non-negative price.
pub fn validate_product_write(images: &[String], price: Decimal) -> Result<(), AppError> {
    if !(MIN_PRODUCT_IMAGES..=MAX_PRODUCT_IMAGES).contains(&images.len()) {
        return Err(AppError::Validation(
            "A product must have between 1 and 7 images".to_string(),
        ));
    }
    if price < Decimal::ZERO {
        return Err(AppError::Validation(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}
