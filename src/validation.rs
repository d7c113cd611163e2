//! Form validation shared by the client and the server
//!
//! The client runs these checks before sending anything; the server runs the
//! same checks again and answers 400 on failure.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::{BookingRequest, SearchQuery, ShippingRoute};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern"));

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field \"{0}\" is required")]
    MissingField(&'static str),

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Enter a valid phone number")]
    InvalidPhone,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Station \"{0}\" not found. Please pick one of the suggestions.")]
    UnknownStation(String),

    #[error("Origin and destination must be different stations")]
    SameEndpoints,

    #[error("Departure window ends before it starts")]
    InvalidDateRange,

    #[error("At least one container is required")]
    NoContainers,

    #[error("Unknown delivery term \"{0}\"")]
    UnknownDeliveryTerm(String),
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Station codes compare trimmed and case-insensitively
fn same_station(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

pub fn validate_search(query: &SearchQuery) -> Result<(), ValidationError> {
    require("origin_port", &query.origin_port)?;
    require("destination_port", &query.destination_port)?;
    require("container_type", &query.container_type)?;

    if same_station(&query.origin_port, &query.destination_port) {
        return Err(ValidationError::SameEndpoints);
    }
    if query.departure_date_to < query.departure_date_from {
        return Err(ValidationError::InvalidDateRange);
    }
    if query.containers_count == 0 {
        return Err(ValidationError::NoContainers);
    }
    Ok(())
}

/// Required fields first, in form order, then the email and phone shapes
pub fn validate_booking(request: &BookingRequest) -> Result<(), ValidationError> {
    require("company_name", &request.company_name)?;
    require("contact_person", &request.contact_person)?;
    require("email", &request.email)?;
    require("phone", &request.phone)?;
    require("pickup_address", &request.pickup_address)?;
    require("delivery_address", &request.delivery_address)?;
    require("cargo_description", &request.cargo_description)?;
    require("delivery_term", &request.delivery_term)?;

    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(&request.phone) {
        return Err(ValidationError::InvalidPhone);
    }
    if request.containers_count == 0 {
        return Err(ValidationError::NoContainers);
    }
    Ok(())
}

pub fn validate_registration(email: &str, password: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_route(route: &ShippingRoute) -> Result<(), ValidationError> {
    require("origin_port", &route.origin_port)?;
    require("destination_port", &route.destination_port)?;
    require("carrier", &route.carrier)?;
    if same_station(&route.origin_port, &route.destination_port) {
        return Err(ValidationError::SameEndpoints);
    }
    Ok(())
}
