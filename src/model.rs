//! Data models for the cargo search platform
//!
//! This module defines the records stored in the database and the
//! request/response payloads exchanged over the `/api` surface. The same types
//! are used by the server handlers and by the client library.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transport mode label for sea freight
pub const TRANSPORT_SEA: &str = "Море";

/// Transport mode label for rail freight
pub const TRANSPORT_RAIL: &str = "ЖД";

/// Transport mode label for air freight
pub const TRANSPORT_AIR: &str = "Авиа";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_transport_types() -> Vec<String> {
    vec![
        TRANSPORT_SEA.to_string(),
        TRANSPORT_RAIL.to_string(),
        TRANSPORT_AIR.to_string(),
    ]
}

fn default_transport_type() -> String {
    TRANSPORT_SEA.to_string()
}

fn default_price_modifier() -> f64 {
    1.0
}

fn default_containers_count() -> u32 {
    1
}

/// A port or rail terminal usable as a search endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Port {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,

    /// Short terminal code submitted in searches (e.g. "CTU")
    pub code: String,
    pub country: String,
    pub city: String,

    /// Supported transport modes, see `TRANSPORT_*`
    #[serde(default = "default_transport_types")]
    pub transport_types: Vec<String>,
}

impl Port {
    pub fn supports(&self, transport: &str) -> bool {
        self.transport_types.iter().any(|t| t == transport)
    }
}

/// Standard container reference record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContainerType {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,

    /// Nominal size label: "20ft", "40ft", "40ft HC"
    pub size: String,
    pub capacity_m3: f64,
    pub max_weight_kg: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_price_modifier")]
    pub price_modifier: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CargoType {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

/// Incoterms rule offered on the booking form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeliveryTerm {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// A scheduled carrier service between two terminals
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShippingRoute {
    #[serde(default = "new_id")]
    pub id: String,
    pub origin_port: String,
    pub destination_port: String,
    #[serde(default = "default_transport_type")]
    pub transport_type: String,
    pub carrier: String,
    pub transit_time_days: u32,
    pub base_price_usd: f64,
    pub available_container_types: Vec<String>,

    /// Departure frequency label: "Daily", "Weekly"
    pub frequency: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Search form submission
///
/// # Example
/// ```json
/// {
///   "origin_port": "CTU",
///   "destination_port": "LED",
///   "departure_date_from": "2025-03-01",
///   "departure_date_to": "2025-03-15",
///   "container_type": "40ft",
///   "is_dangerous_cargo": false,
///   "containers_count": 2
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub origin_port: String,
    pub destination_port: String,
    pub departure_date_from: NaiveDate,
    pub departure_date_to: NaiveDate,
    pub container_type: String,
    #[serde(default)]
    pub is_dangerous_cargo: bool,
    #[serde(default = "default_containers_count")]
    pub containers_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_weight_kg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_volume_m3: Option<u32>,
}

/// One priced offer returned by a search
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub origin_port: String,
    pub destination_port: String,
    pub carrier: String,

    /// Formatted as "dd.mm - dd.mm.yyyy"
    pub departure_date_range: String,
    pub transit_time_days: u32,
    pub container_type: String,
    pub price_from_usd: f64,
    #[serde(default)]
    pub is_dangerous_cargo: bool,
    pub available_containers: u32,
    pub booking_deadline: NaiveDate,

    /// Set when the offer came from the configured webhook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_success: Option<bool>,

    /// Set when the offer is generated test data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_error: Option<String>,
}

/// Stored customer account
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,

    /// bcrypt hash, see `auth::hash_password`
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdminLoginRequest {
    pub login: String,
    pub password: String,
}

/// Issued bearer token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebhookSettings {
    pub webhook_url: String,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebhookUrl {
    #[serde(default)]
    pub webhook_url: String,
}

/// Booking form submission for a previously searched offer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BookingRequest {
    /// `SearchResult::id` of the selected offer
    pub route_id: String,
    pub origin_port: String,
    pub destination_port: String,
    pub container_type: String,
    pub containers_count: u32,
    pub price_usd: f64,

    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub cargo_description: String,

    /// `DeliveryTerm::code`
    pub delivery_term: String,

    /// Customs commodity code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hs_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customs_broker: Option<String>,

    /// Names of the files attached to the request
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
}

/// Stored booking
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub user_email: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub request: BookingRequest,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookingResponse {
    pub booking_id: String,
    pub status: BookingStatus,
}

/// Generic `{"message": ...}` acknowledgement
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
